use std::time::Duration;

use serde::Deserialize;

use crate::models::AiProviderKind;
use crate::services::providers::RemoteFallback;

/// Prefix shared by every environment variable the engine reads
pub const ENV_PREFIX: &str = "FEED_";

/// Product recommended when no preference rule matches
pub const DEFAULT_TRENDING_PRODUCT_ID: &str = "6";

/// Engine configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Fixed client identity the preference store is keyed by
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Display name embedded in personalized greetings
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Which recommendation provider the user configured
    #[serde(default)]
    pub ai_provider: AiProviderKind,

    /// Credential for the remote providers
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// What a remote provider does while its backend is not wired
    #[serde(default)]
    pub remote_fallback: RemoteFallback,

    /// Horizontal drag distance that triggers feed navigation
    #[serde(default = "default_gesture_threshold")]
    pub gesture_threshold: f64,

    /// How often the moment ticker re-detects the moment
    #[serde(default = "default_moment_refresh_secs")]
    pub moment_refresh_secs: u64,

    /// Simulated latency of the rule-based recommendation pass
    #[serde(default = "default_recommendation_latency_ms")]
    pub recommendation_latency_ms: u64,

    /// Simulated latency of the rule-based greeting
    #[serde(default = "default_message_latency_ms")]
    pub message_latency_ms: u64,

    /// Product recommended when no preference rule matches
    #[serde(default = "default_trending_product_id")]
    pub trending_product_id: String,

    /// Redis connection URL; in-memory storage is used when absent
    #[serde(default)]
    pub redis_url: Option<String>,

    /// JSON product file; the built-in sample catalog is used when absent
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Default tracing filter, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_client_id() -> String {
    "user_123".to_string()
}

fn default_display_name() -> String {
    "You".to_string()
}

fn default_gesture_threshold() -> f64 {
    100.0
}

fn default_moment_refresh_secs() -> u64 {
    60
}

fn default_recommendation_latency_ms() -> u64 {
    1000
}

fn default_message_latency_ms() -> u64 {
    600
}

fn default_trending_product_id() -> String {
    DEFAULT_TRENDING_PRODUCT_ID.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            display_name: default_display_name(),
            ai_provider: AiProviderKind::default(),
            ai_api_key: None,
            remote_fallback: RemoteFallback::default(),
            gesture_threshold: default_gesture_threshold(),
            moment_refresh_secs: default_moment_refresh_secs(),
            recommendation_latency_ms: default_recommendation_latency_ms(),
            message_latency_ms: default_message_latency_ms(),
            trending_product_id: default_trending_product_id(),
            redis_url: None,
            catalog_path: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that parse but would silently disable a feature
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.gesture_threshold.is_finite() || self.gesture_threshold < 0.0 {
            anyhow::bail!(
                "{}GESTURE_THRESHOLD must be a finite, non-negative number, got {}",
                ENV_PREFIX,
                self.gesture_threshold
            );
        }
        if self.moment_refresh_secs == 0 {
            anyhow::bail!("{}MOMENT_REFRESH_SECS must be at least 1", ENV_PREFIX);
        }
        Ok(())
    }

    pub fn moment_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.moment_refresh_secs)
    }

    pub fn recommendation_latency(&self) -> Duration {
        Duration::from_millis(self.recommendation_latency_ms)
    }

    pub fn message_latency(&self) -> Duration {
        Duration::from_millis(self.message_latency_ms)
    }
}
