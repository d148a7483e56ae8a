use crate::shell::{ColorChoice, Shell, Verbosity};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

/// Global shell options.
#[derive(Clone, Copy, Debug, Default, Parser)]
pub struct ShellOptions {
    /// Use verbose output.
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Do not print log messages.
    #[arg(long, short, global = true, alias = "silent", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log messages coloring.
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,
}

impl ShellOptions {
    pub fn verbosity(self) -> Verbosity {
        match (self.verbose, self.quiet) {
            (true, _) => Verbosity::Verbose,
            (false, true) => Verbosity::Quiet,
            (false, false) => Verbosity::Normal,
        }
    }

    pub fn shell(self) -> Shell {
        Shell::new_with(self.color.unwrap_or_default(), self.verbosity())
    }

    pub fn set_global_shell(self) {
        self.shell().set();
    }

    /// Default log level, `RUST_LOG` still takes precedence.
    pub fn log_level(self) -> LevelFilter {
        match self.verbosity() {
            Verbosity::Quiet => LevelFilter::OFF,
            Verbosity::Normal => LevelFilter::ERROR,
            Verbosity::Verbose => LevelFilter::DEBUG,
        }
    }
}
