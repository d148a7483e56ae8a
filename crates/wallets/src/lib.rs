//! # diam-wallets
//!
//! Wallet session state for the Diam wallet.
//!
//! A [`WalletSession`] connects a user's profile to an account obtained from an injected
//! EIP-1193 provider (`window.ethereum`), from the Diam extension (`window.diam`), or from a
//! manually typed address, and keeps the account's token balance alongside it.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

pub mod balance;
pub use balance::{BalanceSource, TokenInfo};

mod error;
pub use error::{BalanceError, ProviderError, SessionError, USER_REJECTED_REQUEST};

mod provider;
pub use provider::{DiamAccount, DiamConnectResponse, DiamProvider, Eip1193Provider, InjectedProviders};

mod session;
pub use session::{BalanceTicket, BalanceUpdate, ConnectTarget, WalletSession};

mod state;
pub use state::{ConnectionOrigin, SessionState, UserProfile};

pub use diam_config::ProviderKind;
