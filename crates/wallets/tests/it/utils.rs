use alloy_primitives::U256;
use async_trait::async_trait;
use diam_wallets::{
    BalanceError, BalanceSource, DiamProvider, Eip1193Provider, InjectedProviders, ProviderError,
    TokenInfo, UserProfile, WalletSession,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::sync::Notify;

pub const ALICE: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const BOB: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";
pub const DIAM_KEY: &str = "GDLXVQJ5MFQUBZ4XSFDN7HZ6HJN2ILC6BTXO4RN5XHE24JFVXKSNJGFH";

pub fn profile() -> UserProfile {
    UserProfile::new("John Doe", "john.doe@example.com")
}

pub fn session() -> WalletSession {
    WalletSession::new(profile())
}

/// An `window.ethereum` stand-in answering from fixed account lists.
#[derive(Default)]
pub struct MockEthereum {
    pub requested: Vec<String>,
    pub authorized: Vec<String>,
    /// EIP-1193 error returned by `eth_requestAccounts`.
    pub reject: Option<(i64, String)>,
    pub calls: AtomicUsize,
}

impl MockEthereum {
    pub fn with_accounts(accounts: &[&str]) -> Self {
        let accounts: Vec<String> = accounts.iter().map(ToString::to_string).collect();
        Self { requested: accounts.clone(), authorized: accounts, ..Default::default() }
    }

    pub fn rejecting(code: i64, message: &str) -> Self {
        Self { reject: Some((code, message.to_string())), ..Default::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Eip1193Provider for MockEthereum {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reject {
            Some((code, message)) => Err(ProviderError::from_rpc(*code, message.clone())),
            None => Ok(self.requested.clone()),
        }
    }

    async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.authorized.clone())
    }
}

/// A `window.diam` stand-in returning a canned `connect()` response.
pub struct MockDiam {
    pub response: Value,
}

#[async_trait]
impl DiamProvider for MockDiam {
    async fn connect(&self) -> Result<Value, ProviderError> {
        Ok(self.response.clone())
    }
}

pub fn injected(ethereum: Option<MockEthereum>, diam: Option<Value>) -> InjectedProviders {
    let mut injected = InjectedProviders::default();
    if let Some(ethereum) = ethereum {
        injected = injected.with_ethereum(Arc::new(ethereum));
    }
    if let Some(response) = diam {
        injected = injected.with_diam(Arc::new(MockDiam { response }));
    }
    injected
}

/// Balances keyed by owner; unknown owners are reported as missing accounts.
#[derive(Default)]
pub struct MockBalances {
    balances: HashMap<String, U256>,
    calls: AtomicUsize,
    owners: Mutex<Vec<String>>,
}

impl MockBalances {
    pub fn new(balances: &[(&str, U256)]) -> Arc<Self> {
        Arc::new(Self {
            balances: balances.iter().map(|(owner, raw)| (owner.to_string(), *raw)).collect(),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn owners(&self) -> Vec<String> {
        self.owners.lock().clone()
    }
}

#[async_trait]
impl BalanceSource for MockBalances {
    async fn balance_of(&self, owner: &str, _token: &TokenInfo) -> Result<U256, BalanceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.owners.lock().push(owner.to_string());
        self.balances.get(owner).copied().ok_or_else(|| BalanceError::AccountNotFound(owner.to_string()))
    }
}

/// Holds every query until [`GatedBalances::release`] is called.
pub struct GatedBalances {
    pub raw: U256,
    pub entered: Notify,
    pub gate: Notify,
}

impl GatedBalances {
    pub fn new(raw: U256) -> Arc<Self> {
        Arc::new(Self { raw, entered: Notify::new(), gate: Notify::new() })
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl BalanceSource for GatedBalances {
    async fn balance_of(&self, _owner: &str, _token: &TokenInfo) -> Result<U256, BalanceError> {
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(self.raw)
    }
}

/// `amount * 10^18`
pub fn ether(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(18u64))
}
