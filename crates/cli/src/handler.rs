//! Terminal rendering of the errors `diam` exits with.

use crate::utils::dedup_chain;
use diam_browser_wallet::DIAM_EXTENSION_URL;
use diam_wallets::{ProviderKind, SessionError};
use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt};

/// Prints the deduplicated cause chain on one line and, when a wallet has to be installed or
/// enabled first, what to do about it.
///
/// With `DIAM_DEBUG` set the full `color-eyre` report is printed instead.
#[derive(Default)]
pub struct Handler {
    debug_handler: Option<Box<dyn EyreHandler>>,
}

impl Handler {
    pub fn new(debug_handler: Option<Box<dyn EyreHandler>>) -> Self {
        Self { debug_handler }
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        dedup_chain(error).iter().format(": ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(debug_handler) = &self.debug_handler {
            return debug_handler.debug(error, f);
        }
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        self.display(error, f)?;
        if let Some(hint) = session_error(error).and_then(hint) {
            write!(f, "\n\n{hint}")?;
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(debug_handler) = &mut self.debug_handler {
            debug_handler.track_caller(location);
        }
    }
}

fn session_error<'a>(error: &'a (dyn Error + 'static)) -> Option<&'a SessionError> {
    eyre::Chain::new(error).find_map(|cause| cause.downcast_ref::<SessionError>())
}

/// What the user can do about a failure the session cannot recover from on its own.
pub fn hint(err: &SessionError) -> Option<String> {
    match err {
        SessionError::ProviderUnavailable(ProviderKind::Diam) => {
            Some(format!("Install Diam Wallet from {DIAM_EXTENSION_URL} and reload the bridge page."))
        }
        SessionError::ProviderUnavailable(kind) => Some(format!(
            "Install the {} extension in the browser and reload the bridge page.",
            kind.display_name()
        )),
        SessionError::ProviderDisabled(kind) => {
            Some(format!("Add \"{kind}\" to `providers` in diam.toml or pass `--provider {kind}`."))
        }
        _ => None,
    }
}

/// Installs [`Handler`] as the global `eyre` hook and the `color-eyre` panic hook.
pub fn install() {
    let panic_section = "This is a bug. Consider reporting it to the Diam wallet maintainers.";
    let (panic_hook, debug_hook) =
        color_eyre::config::HookBuilder::default().panic_section(panic_section).into_hooks();
    panic_hook.install();
    let debug_hook = debug_hook.into_eyre_hook();
    let debug = std::env::var_os("DIAM_DEBUG").is_some();
    if let Err(e) =
        eyre::set_hook(Box::new(move |e| Box::new(Handler::new(debug.then(|| debug_hook(e))))))
    {
        debug!("failed to install eyre error hook: {e}");
    }
}
