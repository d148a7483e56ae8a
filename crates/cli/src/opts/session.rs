use clap::Parser;
use diam_config::{
    Config, ExtractConfigError, ProviderKind,
    figment::{
        self, Figment, Metadata, Profile,
        value::{Dict, Map, Value},
    },
};

/// Settings that override `diam.toml` and the `DIAM_` environment.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Session options")]
pub struct SessionArgs {
    /// The RPC endpoint used to read ERC20 balances.
    #[arg(short, long = "rpc-url", env = "ETH_RPC_URL", value_name = "URL")]
    pub rpc_url: Option<String>,

    /// Port of the local browser bridge, 0 picks a free one.
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Seconds to wait for the browser to answer a wallet prompt.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Only offer the given wallet providers. Can be repeated.
    #[arg(long = "provider", value_name = "PROVIDER")]
    pub providers: Vec<ProviderKind>,
}

impl figment::Provider for SessionArgs {
    fn metadata(&self) -> Metadata {
        Metadata::named("SessionArgs")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Map::from([(Config::selected_profile(), self.dict()?)]))
    }
}

impl SessionArgs {
    pub fn dict(&self) -> Result<Dict, figment::Error> {
        let mut dict = Dict::new();
        if let Some(url) = &self.rpc_url {
            dict.insert("eth_rpc_url".into(), url.clone().into());
        }
        if let Some(port) = self.port {
            dict.insert("bridge_port".into(), Value::serialize(port)?);
        }
        if let Some(timeout) = self.timeout {
            dict.insert("bridge_timeout".into(), Value::serialize(timeout)?);
        }
        if !self.providers.is_empty() {
            dict.insert("providers".into(), Value::serialize(&self.providers)?);
        }
        Ok(dict)
    }

    /// The figment of the current directory with these arguments merged on top.
    pub fn figment(&self) -> Figment {
        Config::figment().merge(self.clone())
    }

    pub fn load_config(&self) -> Result<Config, ExtractConfigError> {
        Config::from_provider(self.figment())
    }
}
