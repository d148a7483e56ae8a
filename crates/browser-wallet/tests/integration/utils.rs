use diam_browser_wallet::{
    BrowserApiResponse, BrowserWalletServer, InjectedReport, ProviderMethod, ProviderRequest,
    ProviderResponse, ProviderRpcError,
};
use serde_json::Value;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const ALICE: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const DIAM_KEY: &str = "GDLXVQJ5MFQUBZ4XSFDN7HZ6HJN2ILC6BTXO4RN5XHE24JFVXKSNJGFH";

pub async fn spawn_server(timeout: Duration) -> BrowserWalletServer {
    let mut server = BrowserWalletServer::new(0, timeout);
    server.start().await.unwrap();
    server
}

/// Plays the part of the bridge page.
#[derive(Clone)]
pub struct TestPage {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl TestPage {
    pub fn new(server: &BrowserWalletServer) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: server.url(),
            token: server.session_token().to_string(),
        }
    }

    pub async fn report(&self, report: InjectedReport) -> BrowserApiResponse {
        self.client
            .post(format!("{}/api/providers", self.url))
            .header("X-Session-Token", &self.token)
            .json(&report)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    pub async fn next_request(&self) -> Option<ProviderRequest> {
        let api: BrowserApiResponse<ProviderRequest> = self
            .client
            .get(format!("{}/api/request", self.url))
            .header("X-Session-Token", &self.token)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        match api {
            BrowserApiResponse::Ok { data } => Some(data),
            BrowserApiResponse::Error { .. } => None,
        }
    }

    pub async fn answer(&self, response: &ProviderResponse) -> BrowserApiResponse {
        self.client
            .post(format!("{}/api/response", self.url))
            .header("X-Session-Token", &self.token)
            .json(response)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    /// Answers every queued request with `wallet` until the handle is aborted.
    pub fn serve<F>(self, wallet: F) -> JoinHandle<()>
    where
        F: Fn(ProviderMethod) -> Result<Value, ProviderRpcError> + Send + 'static,
    {
        tokio::spawn(async move {
            loop {
                if let Some(request) = self.next_request().await {
                    let response = match wallet(request.method) {
                        Ok(result) => {
                            ProviderResponse { id: request.id, result: Some(result), error: None }
                        }
                        Err(error) => {
                            ProviderResponse { id: request.id, result: None, error: Some(error) }
                        }
                    };
                    self.answer(&response).await;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
    }
}

pub fn rpc_error(code: i64, message: &str) -> ProviderRpcError {
    ProviderRpcError { code, message: message.to_string() }
}
