#[macro_use]
extern crate tracing;

use clap::Parser;
use diam_cli::{handler, utils};
use eyre::Result;

mod args;

use args::{Diam, DiamSubcommand};

fn main() -> Result<()> {
    handler::install();
    let args = Diam::parse();
    args.shell.set_global_shell();
    utils::subscriber(args.shell.log_level());
    main_args(args)
}

#[tokio::main]
async fn main_args(args: Diam) -> Result<()> {
    debug!(version = env!("CARGO_PKG_VERSION"), "starting diam");
    match args.cmd {
        DiamSubcommand::Session(cmd) => cmd.run().await,
        DiamSubcommand::Connect(cmd) => cmd.run().await,
        DiamSubcommand::Balance(cmd) => cmd.run().await,
        DiamSubcommand::Install(cmd) => {
            cmd.run();
            Ok(())
        }
    }
}
