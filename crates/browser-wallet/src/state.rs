use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::{
    queue::RequestQueue,
    types::{InjectedReport, ProviderRequest, ProviderResponse},
};

#[derive(Debug, Clone)]
pub(crate) struct BrowserWalletState {
    /// Wallet objects reported by the page, `None` until it has loaded.
    injected: Arc<Mutex<Option<InjectedReport>>>,
    /// Request/response queue for provider calls.
    requests: Arc<Mutex<RequestQueue>>,
    /// Token the page must echo in `X-Session-Token`.
    session_token: Arc<String>,
}

impl Default for BrowserWalletState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserWalletState {
    pub fn new() -> Self {
        Self {
            injected: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(RequestQueue::new())),
            session_token: Arc::new(Uuid::new_v4().to_string()),
        }
    }

    pub fn session_token(&self) -> Arc<String> {
        self.session_token.clone()
    }

    pub fn injected(&self) -> Option<InjectedReport> {
        *self.injected.lock()
    }

    pub fn set_injected(&self, report: InjectedReport) {
        *self.injected.lock() = Some(report);
    }

    pub fn add_request(&self, request: ProviderRequest) {
        self.requests.lock().add_request(request);
    }

    pub fn read_next_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().read_request().cloned()
    }

    /// Withdraws `id`, returning an answer that arrived just before it expired.
    pub fn expire_request(&self, id: &Uuid) -> Option<ProviderResponse> {
        self.requests.lock().expire(id)
    }

    /// Stores the answer, returning `false` if nothing is waiting for it.
    pub fn add_response(&self, response: ProviderResponse) -> bool {
        let mut requests = self.requests.lock();
        if !requests.has_request(&response.id) {
            return false;
        }
        requests.add_response(response);
        true
    }

    /// Takes the answer to `id`, if it arrived.
    pub fn take_response(&self, id: &Uuid) -> Option<ProviderResponse> {
        self.requests.lock().get_response(id)
    }
}
