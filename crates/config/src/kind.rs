use serde::{Deserialize, Serialize};

/// The wallet providers a session can connect through.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    /// An EIP-1193 provider injected as `window.ethereum`.
    #[serde(alias = "ethereum")]
    #[strum(to_string = "metamask", serialize = "ethereum")]
    MetaMask,
    /// The Diam wallet extension injected as `window.diam`.
    Diam,
    /// A wallet address typed in by the user.
    Manual,
}

impl ProviderKind {
    /// Human readable name used in prompts and alerts.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MetaMask => "MetaMask",
            Self::Diam => "Diam Wallet",
            Self::Manual => "manual entry",
        }
    }
}

/// Where account balances are read from.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BalanceSourceKind {
    /// `erc20` when a token is configured, otherwise `horizon` when a Horizon URL is set.
    #[default]
    Auto,
    /// `balanceOf(owner)` on the configured token contract.
    Erc20,
    /// Native balance from a Horizon-compatible account endpoint.
    Horizon,
    /// Never fetch; apply the fallback balance instead.
    None,
}
