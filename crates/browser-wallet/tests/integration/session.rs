use crate::utils::*;
use diam_browser_wallet::{InjectedReport, ProviderMethod, ProviderRpcError};
use diam_wallets::{
    ConnectTarget, ConnectionOrigin, ProviderError, ProviderKind, SessionError, UserProfile,
    WalletSession,
};
use serde_json::json;
use std::time::Duration;

fn wallet(method: ProviderMethod) -> Result<serde_json::Value, ProviderRpcError> {
    Ok(match method {
        ProviderMethod::RequestAccounts | ProviderMethod::Accounts => json!([ALICE]),
        ProviderMethod::DiamConnect => {
            json!({ "status": 200, "message": [{ "diamPublicKey": DIAM_KEY }] })
        }
    })
}

async fn bridged_session(report: InjectedReport, timeout: Duration) -> WalletSession {
    let server = spawn_server(timeout).await;
    TestPage::new(&server).report(report).await;
    let report = server.wait_for_providers().await.unwrap();
    WalletSession::new(UserProfile::new("John Doe", "john.doe@example.com"))
        .with_injected(server.injected_providers(report))
}

#[tokio::test]
async fn test_connect_through_bridge() {
    let server = spawn_server(Duration::from_secs(5)).await;
    let page = TestPage::new(&server);
    page.report(InjectedReport { ethereum: true, diam: true }).await;
    let _page = page.serve(wallet);

    let session = WalletSession::new(UserProfile::new("John Doe", "john.doe@example.com"))
        .with_injected(server.injected_providers(server.wait_for_providers().await.unwrap()));

    let state = session.connect(ConnectTarget::MetaMask).await.unwrap();
    assert_eq!(state.wallet_address(), ALICE);

    let state = session.connect(ConnectTarget::Diam).await.unwrap();
    assert_eq!(state.wallet_address(), DIAM_KEY);
    assert_eq!(state.provider_public_key(), Some(DIAM_KEY));
    assert_eq!(state.provider(), Some(ProviderKind::Diam));

    session.disconnect();
    assert!(session.restore().await.unwrap());
    assert_eq!(session.state().origin(), Some(ConnectionOrigin::Restored));
    assert_eq!(session.state().wallet_address(), ALICE);
}

#[tokio::test]
async fn test_missing_extension_is_unavailable() {
    let session =
        bridged_session(InjectedReport { ethereum: true, diam: false }, Duration::from_secs(5))
            .await;
    assert!(matches!(
        session.connect(ConnectTarget::Diam).await,
        Err(SessionError::ProviderUnavailable(ProviderKind::Diam))
    ));
}

#[tokio::test]
async fn test_unanswered_prompt_times_out() {
    let session = bridged_session(
        InjectedReport { ethereum: true, diam: false },
        Duration::from_millis(300),
    )
    .await;
    let err = session.connect(ConnectTarget::MetaMask).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Provider { source: ProviderError::Timeout { .. }, .. }
    ));
    assert!(!session.state().is_connected());
}

#[tokio::test]
async fn test_declined_through_bridge() {
    let server = spawn_server(Duration::from_secs(5)).await;
    let page = TestPage::new(&server);
    page.report(InjectedReport { ethereum: true, diam: false }).await;
    let _page = page.serve(|_| Err(rpc_error(4001, "User rejected the request.")));

    let session = WalletSession::new(UserProfile::default())
        .with_injected(server.injected_providers(server.wait_for_providers().await.unwrap()));
    assert!(matches!(
        session.connect(ConnectTarget::MetaMask).await,
        Err(SessionError::UserDeclined { kind: ProviderKind::MetaMask, .. })
    ));
}

#[tokio::test]
async fn test_malformed_accounts() {
    let server = spawn_server(Duration::from_secs(5)).await;
    let page = TestPage::new(&server);
    page.report(InjectedReport { ethereum: true, diam: false }).await;
    let _page = page.serve(|_| Ok(json!({ "accounts": [ALICE] })));

    let session = WalletSession::new(UserProfile::default())
        .with_injected(server.injected_providers(server.wait_for_providers().await.unwrap()));
    assert!(matches!(
        session.connect(ConnectTarget::MetaMask).await,
        Err(SessionError::MalformedProviderResponse { kind: ProviderKind::MetaMask, .. })
    ));
    assert!(!session.state().is_connected());
}
