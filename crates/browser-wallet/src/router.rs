use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use crate::{handlers, state::BrowserWalletState};

pub(crate) const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

pub(crate) fn build_router(state: Arc<BrowserWalletState>) -> Router {
    let api = Router::new()
        .route("/request", get(handlers::get_next_request))
        .route("/response", post(handlers::post_response))
        .route("/providers", get(handlers::get_providers).post(handlers::post_providers))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session_token))
        .with_state(state.clone());

    Router::new().route("/", get(handlers::serve_index)).nest("/api", api).with_state(state)
}

async fn require_session_token(
    State(state): State<Arc<BrowserWalletState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected = state.session_token();
    let ok = req
        .headers()
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected.as_str());

    if !ok {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}
