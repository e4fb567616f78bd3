use std::collections::HashMap;
use std::fmt::Display;

use tokio::sync::RwLock;

use crate::error::AppResult;

/// Keys the engine persists, namespaced by client identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Preferences(String),
    OnboardingComplete(String),
    DeviceId(String),
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKey::Preferences(client) => write!(f, "prefs:{}", client),
            StoreKey::OnboardingComplete(client) => write!(f, "onboarded:{}", client),
            StoreKey::DeviceId(client) => write!(f, "device:{}", client),
        }
    }
}

/// Minimal key-value capability the preference store is built on
///
/// Keeps the engine independent of the storage medium.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &StoreKey) -> AppResult<Option<String>>;

    async fn set(&self, key: &StoreKey, value: String) -> AppResult<()>;

    async fn delete(&self, key: &StoreKey) -> AppResult<()>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Process-local store, lost on exit
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &StoreKey) -> AppResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&key.to_string()).cloned())
    }

    async fn set(&self, key: &StoreKey, value: String) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &StoreKey) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(&key.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
