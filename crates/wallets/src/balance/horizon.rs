use super::{BalanceSource, TokenInfo};
use crate::BalanceError;
use alloy_primitives::{U256, utils::parse_units};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

/// Decimal places of amounts served by Horizon.
pub const HORIZON_DECIMALS: u8 = 7;

/// Reads native (or `symbol`-coded) balances from a Horizon-compatible `accounts` endpoint.
#[derive(Clone, Debug)]
pub struct HorizonBalanceSource {
    client: reqwest::Client,
    url: Url,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    balances: Vec<AccountBalance>,
}

#[derive(Debug, Deserialize)]
struct AccountBalance {
    balance: String,
    asset_type: String,
    #[serde(default)]
    asset_code: Option<String>,
}

impl HorizonBalanceSource {
    pub fn new(url: &str) -> Result<Self, BalanceError> {
        let url = Url::parse(url).map_err(|err| BalanceError::InvalidUrl(format!("{url}: {err}")))?;
        if url.cannot_be_a_base() {
            return Err(BalanceError::InvalidUrl(url.to_string()));
        }
        Ok(Self { client: reqwest::Client::new(), url })
    }

    fn account_url(&self, owner: &str) -> Url {
        let mut url = self.url.clone();
        // checked in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("accounts").push(owner);
        }
        url
    }
}

#[async_trait]
impl BalanceSource for HorizonBalanceSource {
    async fn balance_of(&self, owner: &str, token: &TokenInfo) -> Result<U256, BalanceError> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(BalanceError::InvalidAddress(owner.to_string()));
        }
        let url = self.account_url(owner);
        trace!(%url, "fetching account");

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(BalanceError::AccountNotFound(owner.to_string()));
        }
        let account: AccountResponse = response.error_for_status()?.json().await?;

        let wanted = token.symbol.as_deref().filter(|symbol| !symbol.eq_ignore_ascii_case("DIAM"));
        let entry = account
            .balances
            .iter()
            .find(|entry| match wanted {
                Some(code) => entry.asset_code.as_deref() == Some(code),
                None => entry.asset_type == "native",
            })
            .ok_or_else(|| {
                BalanceError::Malformed(format!(
                    "account has no {} balance",
                    wanted.unwrap_or("native")
                ))
            })?;

        Ok(parse_units(&entry.balance, token.decimals)?.get_absolute())
    }
}
