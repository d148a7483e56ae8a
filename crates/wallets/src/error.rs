use alloy_primitives::utils::UnitsError;
use diam_config::ProviderKind;

/// EIP-1193 error code for a request the user rejected.
pub const USER_REJECTED_REQUEST: i64 = 4001;

/// Failure reported by a wallet provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("user rejected the request: {message}")]
    Rejected { code: i64, message: String },
    #[error("provider error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("timed out waiting for the wallet to answer `{method}`")]
    Timeout { method: &'static str },
    #[error("unexpected result: {0}")]
    Malformed(String),
    #[error("{0}")]
    Transport(String),
}

impl ProviderError {
    /// Classifies an EIP-1193 `{code, message}` error.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        if code == USER_REJECTED_REQUEST {
            Self::Rejected { code, message }
        } else {
            Self::Rpc { code, message }
        }
    }

    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Failure of a [`BalanceSource`](crate::BalanceSource) query.
#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    #[error("`{0}` is not a valid account for this balance source")]
    InvalidAddress(String),
    #[error("no token contract configured")]
    MissingToken,
    #[error("account `{0}` does not exist")]
    AccountNotFound(String),
    #[error("malformed balance response: {0}")]
    Malformed(String),
    #[error("invalid endpoint `{0}`")]
    InvalidUrl(String),
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Units(#[from] UnitsError),
}

/// Non-fatal failure of a [`WalletSession`](crate::WalletSession) operation.
///
/// Every variant leaves the session usable; the UI decides whether to alert or only log.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("{} is not installed", .0.display_name())]
    ProviderUnavailable(ProviderKind),
    #[error("{} is not enabled", .0.display_name())]
    ProviderDisabled(ProviderKind),
    #[error("{} request was declined: {reason}", .kind.display_name())]
    UserDeclined { kind: ProviderKind, reason: String },
    #[error("unexpected response from {}: {reason}", .kind.display_name())]
    MalformedProviderResponse { kind: ProviderKind, reason: String },
    #[error("{} request failed", .kind.display_name())]
    Provider {
        kind: ProviderKind,
        #[source]
        source: ProviderError,
    },
    #[error("failed to fetch balance of `{address}`")]
    BalanceFetchFailed {
        address: String,
        #[source]
        source: BalanceError,
    },
    #[error("wallet address must not be empty")]
    EmptyAddress,
    #[error("no wallet is connected")]
    NotConnected,
}

impl SessionError {
    pub(crate) fn from_provider(kind: ProviderKind, err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { message, .. } => Self::UserDeclined { kind, reason: message },
            ProviderError::Malformed(reason) => Self::MalformedProviderResponse { kind, reason },
            source => Self::Provider { kind, source },
        }
    }

    /// Whether the UI should block on an alert rather than log the failure.
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_) | Self::ProviderDisabled(_))
    }
}
