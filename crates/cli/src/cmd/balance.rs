use crate::{cmd::print_profile, opts::SessionArgs};
use clap::Parser;
use diam_wallets::{ConnectTarget, WalletSession};
use eyre::Result;

/// CLI arguments for `diam balance`.
#[derive(Clone, Debug, Parser)]
pub struct BalanceArgs {
    /// The wallet address, used as typed.
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    #[command(flatten)]
    pub session: SessionArgs,
}

impl BalanceArgs {
    pub async fn run(self) -> Result<()> {
        let config = self.session.load_config()?;
        let session = WalletSession::from_config(&config)?;

        let state = session.connect(ConnectTarget::Manual(self.address)).await?;
        print_profile(&state, session.token());
        if let Some(err) = state.last_error() {
            sh_warn!("{err}");
        }
        Ok(())
    }
}
