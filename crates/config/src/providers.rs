//! Custom figment providers.

use crate::Config;
use figment::{
    Error, Metadata, Profile, Provider,
    providers::{Env, Format, Toml},
    value::{Dict, Map, Value},
};
use std::path::{Path, PathBuf};

/// A convenience provider to retrieve a toml file.
///
/// Tables under `[profile.<name>]` become figment profiles. This will return an error if the env
/// var is set but the file does not exist.
pub(crate) struct TomlFileProvider {
    pub env_var: Option<&'static str>,
    pub default: PathBuf,
}

impl TomlFileProvider {
    pub(crate) fn new(env_var: Option<&'static str>, default: impl Into<PathBuf>) -> Self {
        Self { env_var, default: default.into() }
    }

    fn env_val(&self) -> Option<String> {
        self.env_var.and_then(Env::var)
    }

    fn file(&self) -> PathBuf {
        self.env_val().map(PathBuf::from).unwrap_or_else(|| self.default.clone())
    }

    fn read(&self) -> Result<Map<Profile, Dict>, Error> {
        use serde::de::Error as _;
        let path = self.file();
        if let Some(file) = self.env_val()
            && !Path::new(&file).exists()
        {
            return Err(Error::custom(format!(
                "Config file `{file}` set in env var `{}` does not exist",
                self.env_var.unwrap_or_default()
            )));
        }
        if !path.exists() {
            return Ok(Map::new());
        }

        let mut data = Toml::file(&path).data()?;
        let Some(mut top) = data.remove(&Profile::Default) else { return Ok(Map::new()) };
        let Some(profiles) = top.remove(Config::PROFILE_SECTION) else {
            warn!(path = %path.display(), "config file has no `[profile]` section");
            return Ok(Map::new());
        };
        let Value::Dict(_, profiles) = profiles else {
            return Err(Error::custom(format!(
                "`{}` in `{}` must be a table",
                Config::PROFILE_SECTION,
                path.display()
            )));
        };

        profiles
            .into_iter()
            .map(|(name, value)| match value {
                Value::Dict(_, dict) => Ok((Profile::new(&name), dict)),
                _ => Err(Error::custom(format!("`[profile.{name}]` must be a table"))),
            })
            .collect()
    }
}

impl Provider for TomlFileProvider {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("TOML file `{}`", self.file().display()))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        self.read()
    }
}
