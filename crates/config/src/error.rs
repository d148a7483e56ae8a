//! Errors raised while extracting a [`Config`](crate::Config).

use figment::Profile;
use std::{error::Error, fmt};

/// First line of every rendered [`ExtractConfigError`].
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract diam config:";

/// A failed attempt to extract `Config`, rendered as one line per rejected setting.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    error: figment::Error,
}

impl ExtractConfigError {
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }

    /// The distinct settings that were rejected, in the order they were found.
    pub fn settings(&self) -> Vec<InvalidSetting> {
        let mut settings = Vec::with_capacity(self.error.count());
        for err in self.error.clone() {
            let setting = InvalidSetting::from(err);
            if !settings.contains(&setting) {
                settings.push(setting);
            }
        }
        settings
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for setting in self.settings() {
            writeln!(f, "- {setting}")?;
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {}

/// A setting of `diam.toml`, the `DIAM_` environment or the command line that could not be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidSetting {
    /// Dotted key as written in `[profile.<name>]`, e.g. `token.address`.
    pub key: Option<String>,
    /// Profile the value was read from.
    pub profile: Option<Profile>,
    /// Where the value came from, e.g. ``TOML file `diam.toml` ``.
    pub origin: Option<String>,
    pub message: String,
}

impl From<figment::Error> for InvalidSetting {
    fn from(err: figment::Error) -> Self {
        Self {
            key: (!err.path.is_empty()).then(|| err.path.join(".")),
            profile: err.profile.clone(),
            origin: err.metadata.as_ref().map(|metadata| metadata.name.to_string()),
            message: err.kind.to_string(),
        }
    }
}

impl fmt::Display for InvalidSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.key, &self.profile) {
            (Some(key), Some(profile)) => write!(f, "`{key}` in [profile.{profile}]")?,
            (Some(key), None) => write!(f, "`{key}`")?,
            (None, _) => f.write_str("config")?,
        }
        if let Some(origin) = &self.origin {
            write!(f, " ({origin})")?;
        }
        write!(f, ": {}", self.message)
    }
}
