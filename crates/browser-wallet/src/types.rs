use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Calls the page forwards to the injected wallet objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderMethod {
    /// `window.ethereum.request({ method: "eth_requestAccounts" })`
    #[serde(rename = "eth_requestAccounts")]
    RequestAccounts,
    /// `window.ethereum.request({ method: "eth_accounts" })`
    #[serde(rename = "eth_accounts")]
    Accounts,
    /// `window.diam.connect()`
    #[serde(rename = "diam_connect")]
    DiamConnect,
}

impl ProviderMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequestAccounts => "eth_requestAccounts",
            Self::Accounts => "eth_accounts",
            Self::DiamConnect => "diam_connect",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRequest {
    pub id: Uuid,
    pub method: ProviderMethod,
}

impl ProviderRequest {
    pub fn new(method: ProviderMethod) -> Self {
        Self { id: Uuid::new_v4(), method }
    }
}

/// EIP-1193 `ProviderRpcError`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub id: Uuid,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<ProviderRpcError>,
}

/// Which wallet objects the page found on `window`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedReport {
    pub ethereum: bool,
    pub diam: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BrowserApiResponse<T = ()> {
    Ok { data: T },
    Error { message: String },
}

impl<T> BrowserApiResponse<T> {
    pub fn with_data(data: T) -> Self {
        Self::Ok { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}

impl BrowserApiResponse {
    pub fn ok() -> Self {
        Self::Ok { data: () }
    }
}
