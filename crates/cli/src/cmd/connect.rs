use crate::{
    cmd::{open_bridge, print_profile},
    opts::SessionArgs,
};
use clap::{Parser, ValueEnum};
use diam_wallets::{ConnectTarget, WalletSession};
use eyre::Result;

/// The wallet extensions `diam connect` can use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InjectedWallet {
    /// `window.ethereum`
    #[value(alias = "ethereum")]
    Metamask,
    /// `window.diam`
    Diam,
}

impl From<InjectedWallet> for ConnectTarget {
    fn from(wallet: InjectedWallet) -> Self {
        match wallet {
            InjectedWallet::Metamask => Self::MetaMask,
            InjectedWallet::Diam => Self::Diam,
        }
    }
}

/// CLI arguments for `diam connect`.
#[derive(Clone, Debug, Parser)]
pub struct ConnectArgs {
    /// The wallet extension to connect through.
    #[arg(value_enum)]
    pub wallet: InjectedWallet,

    #[command(flatten)]
    pub session: SessionArgs,
}

impl ConnectArgs {
    pub async fn run(self) -> Result<()> {
        let config = self.session.load_config()?;
        let session = WalletSession::from_config(&config)?;
        let (mut server, injected) = open_bridge(&config).await?;
        let session = session.with_injected(injected);

        let result = session.connect(self.wallet.into()).await;
        server.stop().await?;
        let state = result?;

        print_profile(&state, session.token());
        if let Some(err) = state.last_error() {
            sh_warn!("{err}");
        }
        Ok(())
    }
}
