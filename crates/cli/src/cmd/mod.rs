//! Subcommands of the `diam` binary.

use crate::{handler::hint, utils::dedup_chain};
use diam_browser_wallet::BrowserWalletServer;
use diam_config::Config;
use diam_wallets::{InjectedProviders, ProviderKind, SessionError, SessionState, TokenInfo};
use eyre::Result;
use yansi::Paint;

pub mod balance;
pub mod connect;
pub mod install;
pub mod session;

/// Serves the bridge page and waits until it reports the wallets of the browser.
pub(crate) async fn open_bridge(
    config: &Config,
) -> Result<(BrowserWalletServer, InjectedProviders)> {
    let mut server = BrowserWalletServer::new(config.bridge_port, config.bridge_timeout());
    server.start().await?;
    sh_status!("Open {} in a browser with your wallet extension to continue.", server.url().cyan());

    let report = server.wait_for_providers().await?;
    debug!(ethereum = report.ethereum, diam = report.diam, "bridge page loaded");
    let injected = server.injected_providers(report);
    Ok((server, injected))
}

/// Prints the profile card.
pub(crate) fn print_profile(state: &SessionState, token: &TokenInfo) {
    let profile = state.profile();
    sh_println!("{}", profile.name.bold());
    sh_println!("  email    {}", profile.email);
    if !state.is_connected() {
        sh_println!("  wallet   {}", "not connected".dim());
        return;
    }
    let provider = state.provider().map(ProviderKind::display_name).unwrap_or_default();
    sh_println!("  wallet   {} ({provider})", state.wallet_address().green());
    if let Some(key) = state.provider_public_key() {
        sh_println!("  key      {key}");
    }
    let symbol = token.symbol.as_deref().unwrap_or_default();
    sh_println!("  balance  {} {symbol}", state.balance());
}

/// Shows a failed session operation; the session stays usable.
pub(crate) fn report(err: &SessionError) {
    if err.is_alert() {
        sh_err!("{err}");
    } else {
        sh_warn!("{}", dedup_chain(err).join(": "));
    }
    if let Some(hint) = hint(err) {
        sh_println!("{hint}");
    }
}
