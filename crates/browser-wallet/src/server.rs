use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use parking_lot::Mutex;
use tokio::{net::TcpListener, sync::oneshot, time::Instant};

use crate::{
    error::BrowserWalletError,
    router::build_router,
    state::BrowserWalletState,
    types::{InjectedReport, ProviderMethod, ProviderRequest, ProviderResponse},
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Local HTTP server the bridge page talks to.
#[derive(Debug, Clone)]
pub struct BrowserWalletServer {
    port: u16,
    timeout: Duration,
    state: Arc<BrowserWalletState>,
    shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl BrowserWalletServer {
    /// Creates a server for `port` (0 picks a free one). `timeout` bounds every wait on the page.
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self {
            port,
            timeout,
            state: Arc::new(BrowserWalletState::new()),
            shutdown_tx: Arc::new(Mutex::new(None)),
        }
    }

    /// Binds to the loopback interface and serves in the background.
    pub async fn start(&mut self) -> Result<(), BrowserWalletError> {
        let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, self.port)))
            .await
            .map_err(|e| BrowserWalletError::ServerError(e.to_string()))?;
        self.port = listener
            .local_addr()
            .map_err(|e| BrowserWalletError::ServerError(e.to_string()))?
            .port();

        let router = build_router(self.state.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        *self.shutdown_tx.lock() = Some(shutdown_tx);

        tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(err) = server.await {
                error!(%err, "browser bridge stopped");
            }
        });

        debug!(port = self.port, "browser bridge listening");
        Ok(())
    }

    /// Stops the background server. Idempotent.
    pub async fn stop(&mut self) -> Result<(), BrowserWalletError> {
        if let Some(tx) = self.shutdown_tx.lock().take() {
            let _ = tx.send(());
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.lock().is_some()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Address to open in the browser.
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    /// Token required in the `X-Session-Token` header of every `/api` call.
    pub fn session_token(&self) -> Arc<String> {
        self.state.session_token()
    }

    /// Wallet objects reported by the page, if it has loaded.
    pub fn injected(&self) -> Option<InjectedReport> {
        self.state.injected()
    }

    /// Waits until the page reports which wallet objects it found.
    pub async fn wait_for_providers(&self) -> Result<InjectedReport, BrowserWalletError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(report) = self.state.injected() {
                return Ok(report);
            }
            if Instant::now() >= deadline {
                return Err(BrowserWalletError::Timeout { operation: "page load" });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Queues `method` for the page and waits for its result.
    pub async fn request(
        &self,
        method: ProviderMethod,
    ) -> Result<serde_json::Value, BrowserWalletError> {
        if !self.is_running() {
            return Err(BrowserWalletError::NotRunning);
        }

        let request = ProviderRequest::new(method);
        let id = request.id;
        self.state.add_request(request);
        debug!(%id, method = method.as_str(), "queued wallet request");

        let deadline = Instant::now() + self.timeout;
        let response = loop {
            if let Some(response) = self.state.take_response(&id) {
                break response;
            }
            if Instant::now() >= deadline {
                if let Some(response) = self.state.expire_request(&id) {
                    break response;
                }
                return Err(BrowserWalletError::Timeout { operation: method.as_str() });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        };

        Self::into_result(method, response)
    }

    fn into_result(
        method: ProviderMethod,
        response: ProviderResponse,
    ) -> Result<serde_json::Value, BrowserWalletError> {
        match response.error {
            Some(err) if err.code == diam_wallets::USER_REJECTED_REQUEST => {
                Err(BrowserWalletError::Rejected { operation: method.as_str(), reason: err.message })
            }
            Some(err) => Err(BrowserWalletError::Rpc { code: err.code, message: err.message }),
            None => Ok(response.result.unwrap_or_default()),
        }
    }
}
