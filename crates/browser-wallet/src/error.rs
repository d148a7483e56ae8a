use diam_wallets::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum BrowserWalletError {
    #[error("{operation} rejected: {reason}")]
    Rejected { operation: &'static str, reason: String },

    #[error("wallet error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("timed out waiting for the browser to answer {operation}")]
    Timeout { operation: &'static str },

    #[error("browser bridge is not running")]
    NotRunning,

    #[error("server error: {0}")]
    ServerError(String),

    #[error("unexpected {operation} result: {reason}")]
    InvalidResponse { operation: &'static str, reason: String },
}

impl From<BrowserWalletError> for ProviderError {
    fn from(err: BrowserWalletError) -> Self {
        match err {
            BrowserWalletError::Rejected { reason, .. } => {
                Self::from_rpc(diam_wallets::USER_REJECTED_REQUEST, reason)
            }
            BrowserWalletError::Rpc { code, message } => Self::from_rpc(code, message),
            BrowserWalletError::Timeout { operation } => Self::Timeout { method: operation },
            BrowserWalletError::InvalidResponse { operation, reason } => {
                Self::Malformed(format!("{operation}: {reason}"))
            }
            err => Self::transport(err),
        }
    }
}
