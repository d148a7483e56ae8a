//! # Browser wallet bridge for Diam
//!
//! Wallet extensions live in the browser, as `window.ethereum`
//! ([EIP-1193](https://eips.ethereum.org/EIPS/eip-1193)) and `window.diam`. This crate lets a
//! terminal session use them:
//!
//! 1. [`BrowserWalletServer`] serves a bridge page on the loopback interface
//! 2. The page reports which wallet objects it found
//! 3. Provider calls are queued by the server and polled by the page
//! 4. The page forwards each call to the extension and posts the result back
//!
//! Every `/api` route requires the per-server token embedded in the page, sent as
//! `X-Session-Token`.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod app;
mod error;
mod handlers;
mod provider;
mod queue;
mod router;
mod server;
mod state;
mod types;

pub use app::contents::DIAM_EXTENSION_URL;
pub use error::BrowserWalletError;
pub use provider::{BrowserDiam, BrowserEthereum};
pub use server::BrowserWalletServer;
pub use types::{
    BrowserApiResponse, InjectedReport, ProviderMethod, ProviderRequest, ProviderResponse,
    ProviderRpcError,
};
