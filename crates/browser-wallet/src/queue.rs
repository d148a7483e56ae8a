use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

use crate::types::{ProviderRequest, ProviderResponse};

/// Pending requests in arrival order plus the answers not yet collected.
#[derive(Debug, Default)]
pub(crate) struct RequestQueue {
    requests: VecDeque<ProviderRequest>,
    responses: HashMap<Uuid, ProviderResponse>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_request(&mut self, request: ProviderRequest) {
        self.requests.push_back(request);
    }

    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.iter().any(|request| request.id == *id)
    }

    /// The oldest pending request, left in the queue until it is answered.
    pub fn read_request(&self) -> Option<&ProviderRequest> {
        self.requests.front()
    }

    pub fn remove_request(&mut self, id: &Uuid) {
        self.requests.retain(|request| request.id != *id);
    }

    /// Stores the answer and drops the request it belongs to.
    pub fn add_response(&mut self, response: ProviderResponse) {
        self.remove_request(&response.id);
        self.responses.insert(response.id, response);
    }

    pub fn get_response(&mut self, id: &Uuid) -> Option<ProviderResponse> {
        self.responses.remove(id)
    }

    /// Withdraws `id` entirely, handing back an answer stored after the caller last looked.
    pub fn expire(&mut self, id: &Uuid) -> Option<ProviderResponse> {
        self.remove_request(id);
        self.get_response(id)
    }
}
