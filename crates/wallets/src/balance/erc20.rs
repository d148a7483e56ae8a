use super::{BalanceSource, TokenInfo};
use crate::BalanceError;
use alloy_primitives::{Address, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_sol_types::sol;
use async_trait::async_trait;
use std::str::FromStr;
use url::Url;

sol! {
    #[sol(rpc)]
    interface IERC20 {
        #[derive(Debug)]
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// Reads `balanceOf(owner)` from an ERC20 contract over JSON-RPC.
#[derive(Clone, Debug)]
pub struct Erc20BalanceSource<P = DynProvider> {
    provider: P,
}

/// Default local RPC endpoint
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

impl Erc20BalanceSource {
    /// Connects to an HTTP JSON-RPC endpoint.
    pub fn connect_http(url: &str) -> Result<Self, BalanceError> {
        let url = Url::parse(url).map_err(|err| BalanceError::InvalidUrl(format!("{url}: {err}")))?;
        Ok(Self::new(ProviderBuilder::new().connect_http(url).erased()))
    }
}

impl<P: Provider> Erc20BalanceSource<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: Provider + Send + Sync> BalanceSource for Erc20BalanceSource<P> {
    async fn balance_of(&self, owner: &str, token: &TokenInfo) -> Result<U256, BalanceError> {
        let owner =
            Address::from_str(owner.trim()).map_err(|_| BalanceError::InvalidAddress(owner.to_string()))?;
        let token = token.address.ok_or(BalanceError::MissingToken)?;
        trace!(%owner, %token, "balanceOf");
        Ok(IERC20::new(token, &self.provider).balanceOf(owner).call().await?)
    }
}
