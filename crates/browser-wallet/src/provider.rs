use std::sync::Arc;

use async_trait::async_trait;
use diam_wallets::{DiamProvider, Eip1193Provider, InjectedProviders, ProviderError};

use crate::{
    error::BrowserWalletError,
    server::BrowserWalletServer,
    types::{InjectedReport, ProviderMethod},
};

/// `window.ethereum` of the bridge page.
#[derive(Clone, Debug)]
pub struct BrowserEthereum {
    server: BrowserWalletServer,
}

impl BrowserEthereum {
    pub fn new(server: BrowserWalletServer) -> Self {
        Self { server }
    }

    async fn accounts_of(&self, method: ProviderMethod) -> Result<Vec<String>, ProviderError> {
        let value = self.server.request(method).await?;
        serde_json::from_value(value).map_err(|err| {
            BrowserWalletError::InvalidResponse { operation: method.as_str(), reason: err.to_string() }
                .into()
        })
    }
}

#[async_trait]
impl Eip1193Provider for BrowserEthereum {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.accounts_of(ProviderMethod::RequestAccounts).await
    }

    async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.accounts_of(ProviderMethod::Accounts).await
    }
}

/// `window.diam` of the bridge page.
#[derive(Clone, Debug)]
pub struct BrowserDiam {
    server: BrowserWalletServer,
}

impl BrowserDiam {
    pub fn new(server: BrowserWalletServer) -> Self {
        Self { server }
    }
}

#[async_trait]
impl DiamProvider for BrowserDiam {
    async fn connect(&self) -> Result<serde_json::Value, ProviderError> {
        Ok(self.server.request(ProviderMethod::DiamConnect).await?)
    }
}

impl BrowserWalletServer {
    /// Provider handles for the wallet objects in `report`.
    pub fn injected_providers(&self, report: InjectedReport) -> InjectedProviders {
        let mut injected = InjectedProviders::default();
        if report.ethereum {
            injected = injected.with_ethereum(Arc::new(BrowserEthereum::new(self.clone())));
        }
        if report.diam {
            injected = injected.with_diam(Arc::new(BrowserDiam::new(self.clone())));
        }
        injected
    }
}
