use diam_config::ProviderKind;
use serde::Serialize;

/// Profile card data.
///
/// `name` and `email` are static display strings; the wallet fields follow the connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    /// The active account, empty while disconnected.
    pub wallet_address: String,
    /// Set only when the Diam provider produced the connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_public_key: Option<String>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into(), ..Default::default() }
    }
}

/// How a connected session was entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionOrigin {
    /// The user asked for the connection (provider consent or manual entry).
    Explicit,
    /// A silent account query found an existing authorization.
    Restored,
}

/// Snapshot of a wallet session.
///
/// Transitions consume the state and return the next one. `connected` implies a non-empty
/// `wallet_address`; disconnecting clears the address, public key and balance together.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    profile: UserProfile,
    connected: bool,
    balance: f64,
    provider: Option<ProviderKind>,
    origin: Option<ConnectionOrigin>,
    /// Bumped whenever the active address changes.
    generation: u64,
    last_error: Option<String>,
}

impl SessionState {
    /// A disconnected session for the given profile.
    pub fn new(profile: UserProfile) -> Self {
        let profile = UserProfile { wallet_address: String::new(), provider_public_key: None, ..profile };
        Self {
            profile,
            connected: false,
            balance: 0.0,
            provider: None,
            origin: None,
            generation: 0,
            last_error: None,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn wallet_address(&self) -> &str {
        &self.profile.wallet_address
    }

    pub fn provider_public_key(&self) -> Option<&str> {
        self.profile.provider_public_key.as_deref()
    }

    /// Display balance, only meaningful while connected.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn provider(&self) -> Option<ProviderKind> {
        self.provider
    }

    pub fn origin(&self) -> Option<ConnectionOrigin> {
        self.origin
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The most recent non-fatal failure, cleared by the next connection change.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Enters the connected state with a fresh balance.
    ///
    /// Callers guarantee `address` is not empty.
    pub fn connected(
        self,
        provider: ProviderKind,
        address: String,
        public_key: Option<String>,
        origin: ConnectionOrigin,
    ) -> Self {
        debug_assert!(!address.is_empty());
        Self {
            profile: UserProfile {
                wallet_address: address,
                provider_public_key: public_key,
                ..self.profile
            },
            connected: true,
            balance: 0.0,
            provider: Some(provider),
            origin: Some(origin),
            generation: self.generation + 1,
            last_error: None,
        }
    }

    /// Resets everything but the static profile fields.
    pub fn disconnected(self) -> Self {
        Self { generation: self.generation + 1, ..Self::new(self.profile) }
    }

    /// Replaces the address in place, leaving `connected` and `balance` untouched.
    pub fn with_address(self, address: String) -> Self {
        Self {
            profile: UserProfile { wallet_address: address, ..self.profile },
            generation: self.generation + 1,
            ..self
        }
    }

    /// Stores a balance fetched under `generation`; stale results leave the state unchanged.
    pub fn with_balance(self, generation: u64, balance: f64) -> Self {
        if !self.accepts(generation) {
            return self;
        }
        Self { balance, ..self }
    }

    pub fn with_error(self, error: impl ToString) -> Self {
        Self { last_error: Some(error.to_string()), ..self }
    }

    /// Whether a result issued under `generation` still applies.
    pub fn accepts(&self, generation: u64) -> bool {
        self.connected && self.generation == generation
    }
}
