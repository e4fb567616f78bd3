//! Recommendation provider abstraction
//!
//! A provider ranks catalog products for a user profile and writes the greeting
//! shown above the feed. The rule-based provider works offline. Remote providers
//! stand in for hosted models and are bound to the user's credential.
use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    error::AppResult,
    models::{Recommendation, UserProfile},
    services::catalog::Catalog,
};

pub mod remote;
pub mod rule_based;

pub use remote::{RemoteBackend, RemoteFallback, RemoteProvider};
pub use rule_based::RuleBasedProvider;

/// Trait for recommendation providers
///
/// Both operations are asynchronous even for the rule-based variant; callers must
/// not assume immediate completion.
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Picks products for `profile`, in insertion order
    ///
    /// `context` names where the feed is shown (e.g. "home_page").
    async fn get_recommendations(
        &self,
        profile: &UserProfile,
        context: &str,
    ) -> AppResult<Vec<Recommendation>>;

    /// Personalized greeting for the top of the feed
    async fn generate_message(&self, profile: &UserProfile) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Knobs shared by every provider the selector builds
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub recommendation_latency: Duration,
    pub message_latency: Duration,
    pub trending_product_id: String,
    pub remote_fallback: RemoteFallback,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ProviderSettings {
    fn from(config: &Config) -> Self {
        Self {
            recommendation_latency: config.recommendation_latency(),
            message_latency: config.message_latency(),
            trending_product_id: config.trending_product_id.clone(),
            remote_fallback: config.remote_fallback,
        }
    }
}

impl ProviderSettings {
    /// Settings with the simulated latency removed
    pub fn immediate() -> Self {
        Self {
            recommendation_latency: Duration::ZERO,
            message_latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Chooses the provider variant for a profile
///
/// Providers are stateless, so every call builds a fresh instance.
#[derive(Clone)]
pub struct ProviderSelector {
    catalog: Arc<dyn Catalog>,
    settings: ProviderSettings,
}

impl ProviderSelector {
    pub fn new(catalog: Arc<dyn Catalog>, settings: ProviderSettings) -> Self {
        Self { catalog, settings }
    }

    /// Remote provider when one is configured with a non-empty credential,
    /// rule-based otherwise
    pub fn select(&self, profile: &UserProfile) -> Box<dyn RecommendationProvider> {
        let rules = RuleBasedProvider::new(self.catalog.clone())
            .with_latency(
                self.settings.recommendation_latency,
                self.settings.message_latency,
            )
            .with_trending_product(self.settings.trending_product_id.clone());

        let remote = RemoteBackend::from_kind(profile.ai_provider).zip(
            profile
                .ai_api_key
                .as_deref()
                .filter(|key| !key.is_empty()),
        );

        match remote {
            Some((backend, credential)) => {
                tracing::debug!(
                    profile_id = %profile.id,
                    backend = backend.name(),
                    "Selected remote recommendation provider"
                );
                Box::new(RemoteProvider::new(
                    backend,
                    credential.to_string(),
                    self.settings.remote_fallback,
                    rules,
                ))
            }
            None => {
                if profile.ai_provider.is_remote() {
                    tracing::warn!(
                        profile_id = %profile.id,
                        "Remote provider configured without a credential, using rule-based provider"
                    );
                }
                Box::new(rules)
            }
        }
    }
}
