//! Contracts of the browser-injected wallet objects.
//!
//! - [`Eip1193Provider`] mirrors `window.ethereum` as defined by
//!   [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193).
//! - [`DiamProvider`] mirrors the Diam extension's `window.diam`.
//!
//! Presence is resolved once, into [`InjectedProviders`]; a missing handle means the extension is
//! not installed.

use crate::ProviderError;
use async_trait::async_trait;
use diam_config::ProviderKind;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// A `window.ethereum`-like provider.
#[async_trait]
pub trait Eip1193Provider: Send + Sync {
    /// `eth_requestAccounts`: prompts the user for consent, returns the authorized accounts.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// `eth_accounts`: the already-authorized accounts, without prompting.
    async fn accounts(&self) -> Result<Vec<String>, ProviderError>;
}

/// A `window.diam`-like provider.
#[async_trait]
pub trait DiamProvider: Send + Sync {
    /// `diam.connect()`, returning the raw response object.
    ///
    /// The shape is owned by the extension, see [`DiamConnectResponse`] for what is accepted.
    async fn connect(&self) -> Result<serde_json::Value, ProviderError>;
}

/// Handles to the wallet objects found in the browser.
#[derive(Clone, Default)]
pub struct InjectedProviders {
    pub ethereum: Option<Arc<dyn Eip1193Provider>>,
    pub diam: Option<Arc<dyn DiamProvider>>,
}

impl InjectedProviders {
    pub fn with_ethereum(mut self, provider: Arc<dyn Eip1193Provider>) -> Self {
        self.ethereum = Some(provider);
        self
    }

    pub fn with_diam(mut self, provider: Arc<dyn DiamProvider>) -> Self {
        self.diam = Some(provider);
        self
    }

    /// Whether the provider backing `kind` was injected. Manual entry is always available.
    pub fn is_available(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::MetaMask => self.ethereum.is_some(),
            ProviderKind::Diam => self.diam.is_some(),
            ProviderKind::Manual => true,
        }
    }
}

impl fmt::Debug for InjectedProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectedProviders")
            .field("ethereum", &self.ethereum.is_some())
            .field("diam", &self.diam.is_some())
            .finish()
    }
}

/// Response of `diam.connect()`.
///
/// Only `status == 200` with a non-empty `message` list is a successful connection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiamConnectResponse {
    pub status: i64,
    #[serde(default)]
    pub message: Vec<DiamAccount>,
}

/// One entry of [`DiamConnectResponse::message`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiamAccount {
    #[serde(rename = "diamPublicKey")]
    pub diam_public_key: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DiamConnectResponse {
    pub const STATUS_OK: i64 = 200;

    /// Decodes the raw response and extracts the first account.
    ///
    /// The error is a human readable reason, any failure is treated as a malformed response.
    pub fn account(raw: serde_json::Value) -> Result<DiamAccount, String> {
        let response: Self =
            serde_json::from_value(raw).map_err(|err| format!("invalid connect response: {err}"))?;
        if response.status != Self::STATUS_OK {
            return Err(format!("connect returned status {}", response.status));
        }
        let account = response
            .message
            .into_iter()
            .next()
            .ok_or_else(|| "connect returned no accounts".to_string())?;
        if account.diam_public_key.is_empty() {
            return Err("connect returned an empty public key".to_string());
        }
        Ok(account)
    }
}
