use crate::{
    cmd::{open_bridge, print_profile, report},
    opts::SessionArgs,
};
use clap::Parser;
use diam_browser_wallet::DIAM_EXTENSION_URL;
use diam_wallets::{BalanceUpdate, ConnectTarget, ProviderKind, WalletSession};
use dialoguer::{Input, Select};
use eyre::Result;
use std::fmt;

/// CLI arguments for `diam session`.
#[derive(Clone, Debug, Parser)]
pub struct SessionCmd {
    #[command(flatten)]
    pub session: SessionArgs,
}

/// Entries of the session menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ConnectMetaMask,
    ConnectDiam,
    EnterAddress,
    EditAddress,
    RefreshBalance,
    Disconnect,
    InstallDiam,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ConnectMetaMask => "Connect MetaMask",
            Self::ConnectDiam => "Connect Diam Wallet",
            Self::EnterAddress => "Enter a wallet address",
            Self::EditAddress => "Edit wallet address",
            Self::RefreshBalance => "Refresh balance",
            Self::Disconnect => "Disconnect",
            Self::InstallDiam => "Install Diam Wallet",
            Self::Quit => "Quit",
        })
    }
}

impl Action {
    /// The actions offered in the current state of `session`.
    pub fn available(session: &WalletSession) -> Vec<Self> {
        if session.state().is_connected() {
            return vec![Self::EditAddress, Self::RefreshBalance, Self::Disconnect, Self::Quit];
        }
        let mut actions: Vec<Self> = session
            .enabled()
            .map(|kind| match kind {
                ProviderKind::MetaMask => Self::ConnectMetaMask,
                ProviderKind::Diam => Self::ConnectDiam,
                ProviderKind::Manual => Self::EnterAddress,
            })
            .collect();
        if session.is_enabled(ProviderKind::Diam)
            && !session.injected().is_available(ProviderKind::Diam)
        {
            actions.push(Self::InstallDiam);
        }
        actions.push(Self::Quit);
        actions
    }
}

impl SessionCmd {
    pub async fn run(self) -> Result<()> {
        let config = self.session.load_config()?;
        let session = WalletSession::from_config(&config)?;
        let (mut server, injected) = open_bridge(&config).await?;
        let session = session.with_injected(injected);

        if config.restore_on_start {
            match session.restore().await {
                Ok(true) => sh_status!("Restored the previously authorized MetaMask account."),
                Ok(false) => {}
                Err(err) => report(&err),
            }
        }

        loop {
            sh_println!();
            print_profile(&session.state(), session.token());
            sh_println!();

            let actions = Action::available(&session);
            let choice = Select::new().with_prompt("Wallet").items(&actions).default(0).interact()?;
            let Some(action) = actions.get(choice).copied() else { continue };
            if action == Action::Quit {
                break;
            }
            Self::apply(&session, action).await?;
        }

        server.stop().await?;
        Ok(())
    }

    async fn apply(session: &WalletSession, action: Action) -> Result<()> {
        let target = match action {
            Action::ConnectMetaMask => ConnectTarget::MetaMask,
            Action::ConnectDiam => ConnectTarget::Diam,
            Action::EnterAddress => {
                let address: String =
                    Input::new().with_prompt("Wallet address").allow_empty(true).interact_text()?;
                ConnectTarget::Manual(address)
            }
            Action::EditAddress => {
                let current = session.state().wallet_address().to_string();
                let address: String = Input::new()
                    .with_prompt("Wallet address")
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()?;
                if let Err(err) = session.edit_address(address) {
                    report(&err);
                }
                return Ok(());
            }
            Action::RefreshBalance => {
                match session.fetch_balance().await {
                    Ok(BalanceUpdate::Applied(balance)) => sh_status!("Balance updated: {balance}"),
                    Ok(BalanceUpdate::Unavailable) => {
                        sh_warn!("no balance source is configured")
                    }
                    Ok(BalanceUpdate::Discarded) => {}
                    Err(err) => report(&err),
                }
                return Ok(());
            }
            Action::Disconnect => {
                session.disconnect();
                sh_status!("Disconnected.");
                return Ok(());
            }
            Action::InstallDiam => {
                sh_println!("Install Diam Wallet from {DIAM_EXTENSION_URL} and reload the bridge page.");
                return Ok(());
            }
            Action::Quit => return Ok(()),
        };

        match session.connect(target).await {
            Ok(state) => {
                if let Some(err) = state.last_error() {
                    sh_warn!("{err}");
                }
            }
            Err(err) => report(&err),
        }
        Ok(())
    }
}
