//! Terminal output.
//!
//! Everything the commands print goes through the `sh_*` macros, which honor the global
//! [`Verbosity`] and strip styling when the stream is not a terminal.

use std::{fmt, io::Write, sync::OnceLock};

use yansi::Paint;

/// Prints a line to stdout.
#[macro_export]
macro_rules! sh_println {
    () => {
        $crate::shell::println(format_args!(""))
    };
    ($($arg:tt)*) => {
        $crate::shell::println(format_args!($($arg)*))
    };
}

/// Prints a progress line to stdout, unless quiet.
#[macro_export]
macro_rules! sh_status {
    ($($arg:tt)*) => {
        $crate::shell::status(format_args!($($arg)*))
    };
}

/// Prints a warning to stderr.
#[macro_export]
macro_rules! sh_warn {
    ($($arg:tt)*) => {
        $crate::shell::warn(format_args!($($arg)*))
    };
}

/// Prints an error to stderr.
#[macro_export]
macro_rules! sh_err {
    ($($arg:tt)*) => {
        $crate::shell::error(format_args!($($arg)*))
    };
}

static GLOBAL: OnceLock<Shell> = OnceLock::new();

/// When to color output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when writing to a terminal that supports it.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Shell {
    color: ColorChoice,
    verbosity: Verbosity,
}

impl Shell {
    pub fn new_with(color: ColorChoice, verbosity: Verbosity) -> Self {
        Self { color, verbosity }
    }

    /// The global shell, or the default one if none was set.
    pub fn get() -> Self {
        GLOBAL.get().copied().unwrap_or_default()
    }

    /// Installs this shell globally. Only the first call has an effect.
    pub fn set(self) {
        match self.color {
            ColorChoice::Auto => yansi::whenever(yansi::Condition::TTY_AND_COLOR),
            ColorChoice::Always => yansi::enable(),
            ColorChoice::Never => yansi::disable(),
        }
        if GLOBAL.set(self).is_err() {
            debug!("global shell already set");
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }
}

pub fn println(args: fmt::Arguments<'_>) {
    let _ = writeln!(anstream::stdout(), "{args}");
}

pub fn status(args: fmt::Arguments<'_>) {
    if !Shell::get().is_quiet() {
        println(args);
    }
}

pub fn warn(args: fmt::Arguments<'_>) {
    let _ = writeln!(anstream::stderr(), "{}: {args}", "Warning".yellow().bold());
}

pub fn error(args: fmt::Arguments<'_>) {
    let _ = writeln!(anstream::stderr(), "{}: {args}", "Error".red().bold());
}
