use clap::{Parser, Subcommand};
use diam_cli::{
    cmd::{
        balance::BalanceArgs, connect::ConnectArgs, install::InstallArgs, session::SessionCmd,
    },
    opts::ShellOptions,
};

/// Connect a wallet to your Diam profile and see its balance.
#[derive(Parser)]
#[command(
    name = "diam",
    version,
    after_help = "Settings are read from diam.toml and DIAM_* environment variables.",
    next_display_order = None,
)]
pub struct Diam {
    #[command(subcommand)]
    pub cmd: DiamSubcommand,

    #[command(flatten)]
    pub shell: ShellOptions,
}

#[derive(Subcommand)]
pub enum DiamSubcommand {
    /// Start an interactive wallet session backed by the browser bridge.
    #[command(visible_alias = "s")]
    Session(SessionCmd),

    /// Connect through MetaMask or Diam Wallet and print the profile.
    #[command(visible_alias = "c")]
    Connect(ConnectArgs),

    /// Show the profile and balance of a wallet address.
    #[command(visible_alias = "b")]
    Balance(BalanceArgs),

    /// Print where to install the Diam Wallet extension.
    Install(InstallArgs),
}
