use crate::utils::*;
use diam_browser_wallet::{
    BrowserApiResponse, BrowserWalletError, InjectedReport, ProviderMethod, ProviderResponse,
};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_providers_report() {
    crate::init_tracing();
    let server = spawn_server(Duration::from_secs(5)).await;
    let page = TestPage::new(&server);

    let waiting = tokio::spawn({
        let server = server.clone();
        async move { server.wait_for_providers().await }
    });
    let report = InjectedReport { ethereum: true, diam: false };
    assert_eq!(page.report(report).await, BrowserApiResponse::ok());

    assert_eq!(waiting.await.unwrap().unwrap(), report);
    assert_eq!(server.injected(), Some(report));

    let injected = server.injected_providers(report);
    assert!(injected.ethereum.is_some());
    assert!(injected.diam.is_none());
}

#[tokio::test]
async fn test_request_roundtrip() {
    let server = spawn_server(Duration::from_secs(5)).await;
    let page = TestPage::new(&server);

    let pending = tokio::spawn({
        let server = server.clone();
        async move { server.request(ProviderMethod::DiamConnect).await }
    });

    let request = loop {
        if let Some(request) = page.next_request().await {
            break request;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    };
    assert_eq!(request.method, ProviderMethod::DiamConnect);

    let result = json!({ "status": 200, "message": [{ "diamPublicKey": DIAM_KEY }] });
    let response = ProviderResponse { id: request.id, result: Some(result.clone()), error: None };
    assert_eq!(page.answer(&response).await, BrowserApiResponse::ok());
    assert_eq!(pending.await.unwrap().unwrap(), result);

    // answered requests leave the queue, repeated answers are unknown
    assert!(page.next_request().await.is_none());
    assert_eq!(page.answer(&response).await, BrowserApiResponse::error("Unknown request id"));
}

#[tokio::test]
async fn test_request_rejected() {
    let server = spawn_server(Duration::from_secs(5)).await;
    let _page = TestPage::new(&server)
        .serve(|_| Err(rpc_error(4001, "User rejected the request.")));

    match server.request(ProviderMethod::RequestAccounts).await {
        Err(BrowserWalletError::Rejected { operation, reason }) => {
            assert_eq!(operation, "eth_requestAccounts");
            assert_eq!(reason, "User rejected the request.");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_request_rpc_error() {
    let server = spawn_server(Duration::from_secs(5)).await;
    let _page = TestPage::new(&server).serve(|_| Err(rpc_error(-32002, "Request already pending")));

    assert!(matches!(
        server.request(ProviderMethod::Accounts).await,
        Err(BrowserWalletError::Rpc { code: -32002, .. })
    ));
}
