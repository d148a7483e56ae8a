use clap::Parser;
use diam_browser_wallet::DIAM_EXTENSION_URL;

/// CLI arguments for `diam install`.
#[derive(Clone, Debug, Parser)]
pub struct InstallArgs {}

impl InstallArgs {
    pub fn run(self) {
        sh_status!("Diam Wallet is a browser extension, install it from:");
        sh_println!("{DIAM_EXTENSION_URL}");
    }
}
