use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{AiProviderKind, Recommendation, UserProfile},
    services::providers::{RecommendationProvider, RuleBasedProvider},
};

/// Hosted model family a remote provider targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteBackend {
    OpenAi,
    Gemini,
}

impl RemoteBackend {
    /// `None` for the offline mock provider
    pub fn from_kind(kind: AiProviderKind) -> Option<Self> {
        match kind {
            AiProviderKind::Mock => None,
            AiProviderKind::OpenAi => Some(RemoteBackend::OpenAi),
            AiProviderKind::Gemini => Some(RemoteBackend::Gemini),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RemoteBackend::OpenAi => "openai",
            RemoteBackend::Gemini => "gemini",
        }
    }
}

/// Behavior of a remote provider while no hosted backend is wired in
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RemoteFallback {
    /// Answer with the rule-based provider's output
    #[default]
    Rules,
    /// Report the backend as unavailable so callers show a neutral state
    Unavailable,
}

/// Provider bound to a user credential for a hosted model
///
/// The credential is checked on every call; a missing or malformed one is a
/// configuration error, never a silent downgrade.
pub struct RemoteProvider {
    backend: RemoteBackend,
    credential: String,
    fallback: RemoteFallback,
    rules: RuleBasedProvider,
}

impl RemoteProvider {
    pub fn new(
        backend: RemoteBackend,
        credential: String,
        fallback: RemoteFallback,
        rules: RuleBasedProvider,
    ) -> Self {
        Self {
            backend,
            credential,
            fallback,
            rules,
        }
    }

    pub fn backend(&self) -> RemoteBackend {
        self.backend
    }

    fn validate_credential(&self) -> AppResult<()> {
        if self.credential.trim().is_empty() {
            return Err(AppError::Configuration(format!(
                "{} provider selected without an API key",
                self.backend.name()
            )));
        }
        if self.credential.chars().any(char::is_whitespace) {
            return Err(AppError::Configuration(format!(
                "{} API key contains whitespace",
                self.backend.name()
            )));
        }
        Ok(())
    }

    fn unavailable(&self) -> AppError {
        AppError::Transient(format!("{} backend is not available", self.backend.name()))
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for RemoteProvider {
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    async fn get_recommendations(
        &self,
        profile: &UserProfile,
        context: &str,
    ) -> AppResult<Vec<Recommendation>> {
        self.validate_credential()?;

        match self.fallback {
            RemoteFallback::Rules => {
                tracing::debug!(
                    backend = self.backend.name(),
                    credential_len = self.credential.len(),
                    "Remote backend not wired, answering with rule-based picks"
                );
                self.rules.get_recommendations(profile, context).await
            }
            RemoteFallback::Unavailable => Err(self.unavailable()),
        }
    }

    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    async fn generate_message(&self, profile: &UserProfile) -> AppResult<String> {
        self.validate_credential()?;

        match self.fallback {
            RemoteFallback::Rules => self.rules.generate_message(profile).await,
            RemoteFallback::Unavailable => Err(self.unavailable()),
        }
    }

    fn name(&self) -> &'static str {
        self.backend.name()
    }
}
