//! # diam-config
//!
//! Diam wallet configuration.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::Address;
use figment::{
    Error, Figment, Metadata, Profile, Provider,
    providers::{Env, Serialized},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub mod error;
pub use error::{ExtractConfigError, InvalidSetting};

mod kind;
pub use kind::{BalanceSourceKind, ProviderKind};

mod providers;
use providers::TomlFileProvider;

// reexport so cli types can implement `figment::Provider` to merge their arguments
pub use figment;

/// Diam wallet configuration
///
/// # Defaults
///
/// All configuration values have a default, documented in the [fields](#fields) section below.
/// [`Config::default()`] returns the default values for the default profile while
/// [`Config::with_root()`] returns the values based on the given directory.
///
/// # Profiles
///
/// Configuration can be arbitrarily namespaced by profiles in `diam.toml` under
/// `[profile.<name>]`. The active profile is selected with the `DIAM_PROFILE` env var; any
/// non-default profile inherits from `[profile.default]`.
///
/// # Environment
///
/// Every setting can be overridden with a `DIAM_` prefixed env var, e.g. `DIAM_ETH_RPC_URL`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The selected profile. **(default: _default_ `default`)**
    #[serde(skip)]
    pub profile: Profile,
    /// Directory `diam.toml` is read from.
    #[serde(skip)]
    pub root: PathBuf,

    /// Display name shown on the profile card.
    pub name: String,
    /// Display email shown on the profile card.
    pub email: String,

    /// Provider kinds the session may connect through.
    pub providers: Vec<ProviderKind>,
    /// Silently query already-authorized accounts when a session starts.
    pub restore_on_start: bool,

    /// Which balance source to use.
    pub balance_source: BalanceSourceKind,
    /// JSON-RPC endpoint used for ERC20 balance queries.
    pub eth_rpc_url: Option<String>,
    /// The token whose balance is displayed.
    pub token: Option<TokenConfig>,
    /// Horizon-compatible REST endpoint used for native Diam balances.
    pub horizon_url: Option<String>,
    /// Balance applied when no balance source is available.
    pub fallback_balance: Option<f64>,

    /// Port of the local browser bridge, `0` picks a free port.
    pub bridge_port: u16,
    /// Seconds to wait for the browser to answer a wallet request.
    pub bridge_timeout: u64,
}

/// A token contract reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// The token contract address.
    pub address: Address,
    /// Number of decimals the on-chain amount is scaled by.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Optional ticker used when printing balances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

const fn default_decimals() -> u8 {
    18
}

impl Config {
    /// The default profile: "default"
    pub const DEFAULT_PROFILE: Profile = Profile::const_new("default");

    /// File name of config toml file
    pub const FILE_NAME: &'static str = "diam.toml";

    /// The table holding all profiles in the config file.
    pub const PROFILE_SECTION: &'static str = "profile";

    /// Env var that overrides the location of the config file.
    pub const CONFIG_ENV: &'static str = "DIAM_CONFIG";

    /// Prefix of all env var overrides.
    pub const ENV_PREFIX: &'static str = "DIAM_";

    /// Returns the current `Config` of the current working directory.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::from_provider(Self::figment())
    }

    /// Returns the current `Config` of the given directory.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::from_provider(Self::figment_with_root(root))
    }

    /// Extract a `Config` from `provider`, keeping the profile the provider selected.
    pub fn from_provider<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        let figment = Figment::from(provider);
        let mut config = figment.extract::<Self>().map_err(ExtractConfigError::new)?;
        config.profile = figment.profile().clone();
        if let Ok(root) = figment.extract_inner::<PathBuf>("root") {
            config.root = root;
        }
        Ok(config)
    }

    /// Returns the default figment of the current working directory.
    pub fn figment() -> Figment {
        Self::default().to_figment()
    }

    /// Returns the default figment of the given directory.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        Self::with_root(root).to_figment()
    }

    /// Creates a new Config that reads `diam.toml` from `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf(), ..Self::default() }
    }

    /// Returns the selected profile.
    ///
    /// If the `DIAM_PROFILE` env variable is not set, this returns the `DEFAULT_PROFILE`.
    pub fn selected_profile() -> Profile {
        Profile::from_env_or("DIAM_PROFILE", Self::DEFAULT_PROFILE)
    }

    /// Layers defaults, `diam.toml` and the `DIAM_` environment.
    ///
    /// The active profile falls back to `[profile.default]` for keys it does not set.
    pub fn to_figment(self) -> Figment {
        let profile = Self::selected_profile();
        let toml = TomlFileProvider::new(Some(Self::CONFIG_ENV), self.root.join(Self::FILE_NAME));

        Figment::from(&self)
            .merge(toml)
            .merge(
                Env::prefixed(Self::ENV_PREFIX)
                    .ignore(&["PROFILE", "CONFIG", "LOG"])
                    .map(|key| {
                        let key = key.as_str();
                        match key.get(..6) {
                            Some(prefix) if prefix.eq_ignore_ascii_case("token_") => {
                                format!("token.{}", &key[6..]).into()
                            }
                            _ => key.into(),
                        }
                    })
                    .global(),
            )
            .select(profile)
    }

    /// Bridge request timeout as a [`Duration`].
    pub fn bridge_timeout(&self) -> Duration {
        Duration::from_secs(self.bridge_timeout)
    }

    /// Whether the given provider kind is enabled.
    pub fn is_enabled(&self, kind: ProviderKind) -> bool {
        self.providers.contains(&kind)
    }

    /// Resolves [`BalanceSourceKind::Auto`] to the concrete source the settings allow.
    pub fn resolved_balance_source(&self) -> BalanceSourceKind {
        match self.balance_source {
            BalanceSourceKind::Auto if self.token.is_some() => BalanceSourceKind::Erc20,
            BalanceSourceKind::Auto if self.horizon_url.is_some() => BalanceSourceKind::Horizon,
            BalanceSourceKind::Auto => BalanceSourceKind::None,
            other => other,
        }
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Diam Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut data = Serialized::defaults(self).data()?;
        if let Some(entry) = data.get_mut(&Profile::Default) {
            entry.insert("root".to_string(), figment::value::Value::serialize(&self.root)?);
        }
        Ok(data)
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.profile.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Self::DEFAULT_PROFILE,
            root: PathBuf::from("."),
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            providers: vec![ProviderKind::MetaMask, ProviderKind::Diam, ProviderKind::Manual],
            restore_on_start: true,
            balance_source: BalanceSourceKind::Auto,
            eth_rpc_url: None,
            token: None,
            horizon_url: None,
            fallback_balance: None,
            bridge_port: 0,
            bridge_timeout: 300,
        }
    }
}
