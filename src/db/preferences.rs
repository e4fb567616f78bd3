use std::sync::Arc;

use uuid::Uuid;

use crate::db::kv::{KeyValueStore, StoreKey};
use crate::error::AppResult;
use crate::models::PreferenceSelections;

const ONBOARDED_FLAG: &str = "true";

/// Persistence for onboarding answers and the completion flag
#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Saved selections, empty if never set
    async fn read_preferences(&self) -> AppResult<PreferenceSelections>;

    async fn write_preferences(&self, selections: &PreferenceSelections) -> AppResult<()>;

    async fn read_onboarding_complete(&self) -> AppResult<bool>;

    async fn mark_onboarding_complete(&self) -> AppResult<()>;

    /// Stable identifier of this device, created on first use
    async fn device_id(&self) -> AppResult<String>;
}

/// Preference store over any key-value backend, keyed by a fixed client identity
#[derive(Clone)]
pub struct KvPreferenceStore {
    kv: Arc<dyn KeyValueStore>,
    client_id: String,
}

impl KvPreferenceStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, client_id: impl Into<String>) -> Self {
        Self {
            kv,
            client_id: client_id.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    fn key(&self, make: fn(String) -> StoreKey) -> StoreKey {
        make(self.client_id.clone())
    }
}

#[async_trait::async_trait]
impl PreferenceStore for KvPreferenceStore {
    async fn read_preferences(&self) -> AppResult<PreferenceSelections> {
        let key = self.key(StoreKey::Preferences);
        let Some(json) = self.kv.get(&key).await? else {
            return Ok(PreferenceSelections::new());
        };

        match serde_json::from_str(&json) {
            Ok(selections) => Ok(selections),
            Err(e) => {
                // A corrupt entry must not block the feed; start over with no tags
                tracing::warn!(
                    error = %e,
                    key = %key,
                    backend = self.kv.name(),
                    "Discarding unreadable saved preferences"
                );
                Ok(PreferenceSelections::new())
            }
        }
    }

    async fn write_preferences(&self, selections: &PreferenceSelections) -> AppResult<()> {
        let json = serde_json::to_string(selections)?;
        self.kv.set(&self.key(StoreKey::Preferences), json).await?;
        tracing::info!(client_id = %self.client_id, "Saved onboarding preferences");
        Ok(())
    }

    async fn read_onboarding_complete(&self) -> AppResult<bool> {
        let flag = self.kv.get(&self.key(StoreKey::OnboardingComplete)).await?;
        Ok(flag.as_deref() == Some(ONBOARDED_FLAG))
    }

    async fn mark_onboarding_complete(&self) -> AppResult<()> {
        self.kv
            .set(&self.key(StoreKey::OnboardingComplete), ONBOARDED_FLAG.to_string())
            .await
    }

    async fn device_id(&self) -> AppResult<String> {
        let key = self.key(StoreKey::DeviceId);
        if let Some(id) = self.kv.get(&key).await? {
            return Ok(id);
        }

        let id = Uuid::new_v4().to_string();
        self.kv.set(&key, id.clone()).await?;
        tracing::info!(device_id = %id, "Registered new device");
        Ok(id)
    }
}
