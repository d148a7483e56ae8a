use crate::{
    BalanceError, BalanceSource, ConnectionOrigin, DiamConnectResponse, InjectedProviders,
    SessionError, SessionState, TokenInfo, UserProfile, balance,
};
use diam_config::{Config, ProviderKind};
use parking_lot::Mutex;
use std::{collections::BTreeSet, fmt, sync::Arc};

/// What to connect through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectTarget {
    MetaMask,
    Diam,
    /// A free-form address typed by the user. Only emptiness is checked.
    Manual(String),
}

impl ConnectTarget {
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::MetaMask => ProviderKind::MetaMask,
            Self::Diam => ProviderKind::Diam,
            Self::Manual(_) => ProviderKind::Manual,
        }
    }
}

/// A balance fetch bound to the session generation it was issued under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceTicket {
    pub address: String,
    pub generation: u64,
}

/// Result of applying a balance fetch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BalanceUpdate {
    /// The balance was stored.
    Applied(f64),
    /// The session moved on while the fetch was in flight, the value was dropped.
    Discarded,
    /// No balance source and no fallback balance are configured.
    Unavailable,
}

/// Connection state of a user's wallet plus the derived balance.
///
/// Cloning is cheap and every clone drives the same session. The state lock is never held across
/// an `.await`; results of provider calls and balance fetches are applied afterwards, and balance
/// fetches that outlive an address change are discarded.
#[derive(Clone)]
pub struct WalletSession {
    state: Arc<Mutex<SessionState>>,
    enabled: BTreeSet<ProviderKind>,
    injected: InjectedProviders,
    balances: Option<Arc<dyn BalanceSource>>,
    token: TokenInfo,
    fallback_balance: Option<f64>,
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("state", &*self.state.lock())
            .field("enabled", &self.enabled)
            .field("injected", &self.injected)
            .field("balances", &self.balances.is_some())
            .field("token", &self.token)
            .field("fallback_balance", &self.fallback_balance)
            .finish()
    }
}

impl WalletSession {
    /// A disconnected session with every provider kind enabled and nothing injected.
    pub fn new(profile: UserProfile) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new(profile))),
            enabled: [ProviderKind::MetaMask, ProviderKind::Diam, ProviderKind::Manual].into(),
            injected: InjectedProviders::default(),
            balances: None,
            token: TokenInfo::default(),
            fallback_balance: None,
        }
    }

    /// Builds a session from the profile, provider and balance settings of `config`.
    pub fn from_config(config: &Config) -> Result<Self, BalanceError> {
        let mut session = Self::new(UserProfile::new(&config.name, &config.email))
            .with_enabled(config.providers.iter().copied())
            .with_fallback_balance(config.fallback_balance);
        if let Some((source, token)) = balance::from_config(config)? {
            session = session.with_balance_source(source, token);
        }
        Ok(session)
    }

    pub fn with_enabled(mut self, kinds: impl IntoIterator<Item = ProviderKind>) -> Self {
        self.enabled = kinds.into_iter().collect();
        self
    }

    pub fn with_injected(mut self, injected: InjectedProviders) -> Self {
        self.injected = injected;
        self
    }

    pub fn with_balance_source(mut self, source: Arc<dyn BalanceSource>, token: TokenInfo) -> Self {
        self.balances = Some(source);
        self.token = token;
        self
    }

    pub fn with_fallback_balance(mut self, balance: Option<f64>) -> Self {
        self.fallback_balance = balance;
        self
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.lock().clone()
    }

    pub fn token(&self) -> &TokenInfo {
        &self.token
    }

    pub fn injected(&self) -> &InjectedProviders {
        &self.injected
    }

    pub fn is_enabled(&self, kind: ProviderKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Enabled provider kinds in display order.
    pub fn enabled(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        self.enabled.iter().copied()
    }

    /// Connects through `target`, then fetches the balance of the new address.
    ///
    /// On failure the session keeps its previous state and records the error. A failing balance
    /// fetch does not fail the connection.
    pub async fn connect(&self, target: ConnectTarget) -> Result<SessionState, SessionError> {
        let kind = target.kind();
        let (address, public_key) = match self.authorize(target).await {
            Ok(account) => account,
            Err(err) => return Err(self.fail(err)),
        };

        let state = self.transition(|state| {
            state.connected(kind, address, public_key, ConnectionOrigin::Explicit)
        });
        info!(provider = %kind, address = state.wallet_address(), "wallet connected");

        let _ = self.refresh(self.ticket_of(&state)).await;
        Ok(self.state())
    }

    /// Mount-time entry: silently asks the injected `window.ethereum` for accounts it already
    /// authorized and, if there is one, enters the connected state without a prompt.
    ///
    /// Returns whether the session was restored. A missing or disabled provider is not an error.
    pub async fn restore(&self) -> Result<bool, SessionError> {
        let kind = ProviderKind::MetaMask;
        if !self.is_enabled(kind) {
            return Ok(false);
        }
        let Some(provider) = self.injected.ethereum.clone() else {
            debug!("no injected ethereum provider, nothing to restore");
            return Ok(false);
        };
        let before = self.state();
        if before.is_connected() {
            return Ok(false);
        }

        let accounts = match provider.accounts().await {
            Ok(accounts) => accounts,
            Err(err) => return Err(self.fail(SessionError::from_provider(kind, err))),
        };
        let Some(address) = accounts.into_iter().next().filter(|account| !account.is_empty())
        else {
            debug!("no previously authorized account");
            return Ok(false);
        };

        let mut restored = None;
        self.transition(|state| {
            // an explicit connection made while the query was in flight wins
            if state.generation() != before.generation() {
                return state;
            }
            let state = state.connected(kind, address, None, ConnectionOrigin::Restored);
            restored = Some(self.ticket_of(&state));
            state
        });
        let Some(ticket) = restored else { return Ok(false) };
        info!(provider = %kind, address = %ticket.address, "wallet restored");

        let _ = self.refresh(ticket).await;
        Ok(true)
    }

    /// Resets the session to its empty form. Idempotent.
    pub fn disconnect(&self) -> SessionState {
        let state = self.transition(SessionState::disconnected);
        info!("wallet disconnected");
        state
    }

    /// Overwrites the address of a connected session without asking any provider.
    ///
    /// The balance is left as is until the next [`fetch_balance`](Self::fetch_balance).
    pub fn edit_address(&self, address: impl Into<String>) -> Result<SessionState, SessionError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(self.fail(SessionError::EmptyAddress));
        }
        let mut edited = false;
        let state = self.transition(|state| {
            if !state.is_connected() {
                return state;
            }
            edited = true;
            state.with_address(address)
        });
        if !edited {
            return Err(self.fail(SessionError::NotConnected));
        }
        info!(address = state.wallet_address(), "wallet address edited");
        Ok(state)
    }

    /// Fetches and stores the balance of the current address.
    pub async fn fetch_balance(&self) -> Result<BalanceUpdate, SessionError> {
        let Some(ticket) = self.begin_fetch() else {
            return Err(self.fail(SessionError::NotConnected));
        };
        self.refresh(ticket).await
    }

    /// Captures the address and generation a balance fetch is issued for.
    pub fn begin_fetch(&self) -> Option<BalanceTicket> {
        let state = self.state.lock();
        state.is_connected().then(|| self.ticket_of(&state))
    }

    /// Applies the outcome of a fetch issued with [`begin_fetch`](Self::begin_fetch).
    ///
    /// Failures leave the previous balance in place and are recorded on the session.
    pub fn complete_fetch(
        &self,
        ticket: &BalanceTicket,
        result: Result<f64, BalanceError>,
    ) -> Result<BalanceUpdate, SessionError> {
        let mut state = self.state.lock();
        if !state.accepts(ticket.generation) {
            debug!(address = %ticket.address, "discarding stale balance result");
            return Ok(BalanceUpdate::Discarded);
        }
        match result {
            Ok(balance) => {
                *state = state.clone().with_balance(ticket.generation, balance);
                debug!(address = %ticket.address, balance, "balance updated");
                Ok(BalanceUpdate::Applied(balance))
            }
            Err(source) => {
                let err =
                    SessionError::BalanceFetchFailed { address: ticket.address.clone(), source };
                warn!(%err, source = %error_source(&err), "keeping previous balance");
                *state = state.clone().with_error(&err);
                Err(err)
            }
        }
    }

    async fn refresh(&self, ticket: BalanceTicket) -> Result<BalanceUpdate, SessionError> {
        let Some(source) = &self.balances else {
            return match self.fallback_balance {
                Some(balance) => self.complete_fetch(&ticket, Ok(balance)),
                None => Ok(BalanceUpdate::Unavailable),
            };
        };
        let result = source
            .balance_of(&ticket.address, &self.token)
            .await
            .and_then(|raw| balance::to_display(raw, self.token.decimals));
        self.complete_fetch(&ticket, result)
    }

    async fn authorize(
        &self,
        target: ConnectTarget,
    ) -> Result<(String, Option<String>), SessionError> {
        let kind = target.kind();
        if !self.is_enabled(kind) {
            return Err(SessionError::ProviderDisabled(kind));
        }
        match target {
            ConnectTarget::MetaMask => {
                let provider =
                    self.injected.ethereum.clone().ok_or(SessionError::ProviderUnavailable(kind))?;
                let accounts = provider
                    .request_accounts()
                    .await
                    .map_err(|err| SessionError::from_provider(kind, err))?;
                let account = accounts.into_iter().next().filter(|account| !account.is_empty());
                let account = account.ok_or_else(|| SessionError::MalformedProviderResponse {
                    kind,
                    reason: "no accounts returned".to_string(),
                })?;
                Ok((account, None))
            }
            ConnectTarget::Diam => {
                let provider =
                    self.injected.diam.clone().ok_or(SessionError::ProviderUnavailable(kind))?;
                let raw =
                    provider.connect().await.map_err(|err| SessionError::from_provider(kind, err))?;
                let account = DiamConnectResponse::account(raw)
                    .map_err(|reason| SessionError::MalformedProviderResponse { kind, reason })?;
                let key = account.diam_public_key;
                Ok((key.clone(), Some(key)))
            }
            ConnectTarget::Manual(address) => {
                if address.trim().is_empty() {
                    return Err(SessionError::EmptyAddress);
                }
                Ok((address, None))
            }
        }
    }

    /// Logs `err`, records it on the session and hands it back.
    fn fail(&self, err: SessionError) -> SessionError {
        match &err {
            SessionError::ProviderUnavailable(_) | SessionError::ProviderDisabled(_) => {
                warn!(%err)
            }
            SessionError::UserDeclined { .. } | SessionError::NotConnected => info!(%err),
            _ => warn!(%err, source = %error_source(&err)),
        }
        self.transition(|state| state.with_error(&err));
        err
    }

    fn transition(&self, f: impl FnOnce(SessionState) -> SessionState) -> SessionState {
        let mut state = self.state.lock();
        *state = f(state.clone());
        state.clone()
    }

    fn ticket_of(&self, state: &SessionState) -> BalanceTicket {
        BalanceTicket { address: state.wallet_address().to_string(), generation: state.generation() }
    }
}

fn error_source(err: &SessionError) -> String {
    std::error::Error::source(err).map(ToString::to_string).unwrap_or_default()
}
