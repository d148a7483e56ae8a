use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{Html, IntoResponse},
};

use crate::{
    app::contents,
    state::BrowserWalletState,
    types::{BrowserApiResponse, InjectedReport, ProviderRequest, ProviderResponse},
};

pub(crate) async fn serve_index(
    State(state): State<Arc<BrowserWalletState>>,
) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    (headers, Html(contents::index_html(&state.session_token())))
}

pub(crate) async fn get_next_request(
    State(state): State<Arc<BrowserWalletState>>,
) -> Json<BrowserApiResponse<ProviderRequest>> {
    match state.read_next_request() {
        Some(request) => Json(BrowserApiResponse::with_data(request)),
        None => Json(BrowserApiResponse::error("No pending request")),
    }
}

pub(crate) async fn post_response(
    State(state): State<Arc<BrowserWalletState>>,
    Json(response): Json<ProviderResponse>,
) -> Json<BrowserApiResponse> {
    let id = response.id;
    if !state.add_response(response) {
        debug!(%id, "response for unknown request");
        return Json(BrowserApiResponse::error("Unknown request id"));
    }
    trace!(%id, "response received");
    Json(BrowserApiResponse::ok())
}

pub(crate) async fn get_providers(
    State(state): State<Arc<BrowserWalletState>>,
) -> Json<BrowserApiResponse<Option<InjectedReport>>> {
    Json(BrowserApiResponse::with_data(state.injected()))
}

pub(crate) async fn post_providers(
    State(state): State<Arc<BrowserWalletState>>,
    Json(report): Json<InjectedReport>,
) -> Json<BrowserApiResponse> {
    debug!(ethereum = report.ethereum, diam = report.diam, "browser reported wallets");
    state.set_injected(report);
    Json(BrowserApiResponse::ok())
}
