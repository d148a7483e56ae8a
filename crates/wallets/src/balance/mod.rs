//! Balance sources.
//!
//! A [`BalanceSource`] returns the raw on-chain amount, an integer scaled by the token's
//! decimals. [`to_display`] turns it into the value shown to the user.

use crate::BalanceError;
use alloy_primitives::{Address, U256, utils::format_units};
use async_trait::async_trait;
use diam_config::{BalanceSourceKind, Config};
use std::sync::Arc;

mod erc20;
pub use erc20::{Erc20BalanceSource, IERC20, LOCAL_RPC_URL};

mod horizon;
pub use horizon::{HORIZON_DECIMALS, HorizonBalanceSource};

/// The token whose balance is displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenInfo {
    /// Contract address, absent for a network's native asset.
    pub address: Option<Address>,
    /// Number of decimals the raw amount is scaled by.
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl TokenInfo {
    pub fn native(decimals: u8, symbol: impl Into<String>) -> Self {
        Self { address: None, decimals, symbol: Some(symbol.into()) }
    }
}

impl Default for TokenInfo {
    fn default() -> Self {
        Self { address: None, decimals: 18, symbol: None }
    }
}

/// Reads the raw token balance of an account.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn balance_of(&self, owner: &str, token: &TokenInfo) -> Result<U256, BalanceError>;
}

/// Converts a raw amount to a display value by dividing by `10^decimals`.
pub fn to_display(raw: U256, decimals: u8) -> Result<f64, BalanceError> {
    let formatted = format_units(raw, decimals)?;
    formatted.parse().map_err(|err| BalanceError::Malformed(format!("{formatted}: {err}")))
}

/// Builds the balance source selected by `config`, if any.
pub fn from_config(
    config: &Config,
) -> Result<Option<(Arc<dyn BalanceSource>, TokenInfo)>, BalanceError> {
    let source = match config.resolved_balance_source() {
        BalanceSourceKind::Erc20 => {
            let token = config.token.as_ref().ok_or(BalanceError::MissingToken)?;
            let url = config.eth_rpc_url.as_deref().unwrap_or(LOCAL_RPC_URL);
            let info = TokenInfo {
                address: Some(token.address),
                decimals: token.decimals,
                symbol: token.symbol.clone(),
            };
            debug!(%url, token = %token.address, "using erc20 balance source");
            (Arc::new(Erc20BalanceSource::connect_http(url)?) as Arc<dyn BalanceSource>, info)
        }
        BalanceSourceKind::Horizon => {
            let url = config
                .horizon_url
                .as_deref()
                .ok_or_else(|| BalanceError::InvalidUrl("horizon_url is not set".to_string()))?;
            let symbol = config.token.as_ref().and_then(|token| token.symbol.clone());
            let info = TokenInfo {
                address: None,
                decimals: HORIZON_DECIMALS,
                symbol: Some(symbol.unwrap_or_else(|| "DIAM".to_string())),
            };
            debug!(%url, "using horizon balance source");
            (Arc::new(HorizonBalanceSource::new(url)?) as Arc<dyn BalanceSource>, info)
        }
        BalanceSourceKind::None | BalanceSourceKind::Auto => return Ok(None),
    };
    Ok(Some(source))
}
