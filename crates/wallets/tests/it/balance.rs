use crate::utils::DIAM_KEY;
use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use diam_config::{BalanceSourceKind, Config};
use diam_wallets::{BalanceUpdate, ConnectTarget, ProviderKind, SessionError, WalletSession};
use serde_json::{Value, json};

async fn account(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    if id != DIAM_KEY {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "id": id,
        "balances": [{ "balance": "1.5000000", "asset_type": "native" }]
    })))
}

async fn spawn_horizon() -> String {
    let app = Router::new().route("/accounts/{id}", get(account));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
}

#[tokio::test]
async fn session_from_config_reads_horizon() {
    crate::init_tracing();
    let config = Config {
        horizon_url: Some(spawn_horizon().await),
        providers: vec![ProviderKind::Manual],
        ..Default::default()
    };
    assert_eq!(config.resolved_balance_source(), BalanceSourceKind::Horizon);

    let session = WalletSession::from_config(&config).unwrap();
    assert_eq!(session.token().decimals, 7);
    assert_eq!(session.token().symbol.as_deref(), Some("DIAM"));
    assert!(!session.is_enabled(ProviderKind::MetaMask));

    let state = session.connect(ConnectTarget::Manual(DIAM_KEY.into())).await.unwrap();
    assert_eq!(state.balance(), 1.5);
    assert_eq!(state.profile().name, "John Doe");

    session.edit_address("GUNFUNDED").unwrap();
    assert!(matches!(
        session.fetch_balance().await,
        Err(SessionError::BalanceFetchFailed { .. })
    ));
    assert_eq!(session.state().balance(), 1.5);
}

#[tokio::test]
async fn fallback_balance_without_source() {
    let config = Config { fallback_balance: Some(100.0), ..Default::default() };
    let session = WalletSession::from_config(&config).unwrap();
    session.connect(ConnectTarget::Manual(DIAM_KEY.into())).await.unwrap();
    assert_eq!(session.state().balance(), 100.0);
    assert_eq!(session.fetch_balance().await.unwrap(), BalanceUpdate::Applied(100.0));
}
