use serde::{Deserialize, Serialize};

use super::PreferenceSelections;

/// AI provider the user configured in settings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderKind {
    /// Deterministic rule-based provider, works offline
    #[default]
    Mock,
    OpenAi,
    Gemini,
}

impl AiProviderKind {
    pub fn is_remote(self) -> bool {
        !matches!(self, AiProviderKind::Mock)
    }
}

/// The user as seen by recommendation providers
///
/// Built fresh per feed load from preference store contents; the engine never
/// persists it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    /// Lowercase tags from every onboarding answer. Duplicates allowed.
    pub preferences: Vec<String>,
    /// Reserved, not read by any provider yet
    pub viewed_categories: Vec<String>,
    pub ai_provider: AiProviderKind,
    pub ai_api_key: Option<String>,
}

impl UserProfile {
    /// Assembles a profile from raw onboarding selections
    ///
    /// Every selected label is lowercased and flattened into `preferences`.
    pub fn assemble(
        id: impl Into<String>,
        name: impl Into<String>,
        raw: &PreferenceSelections,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            preferences: raw.flatten_tags(),
            viewed_categories: Vec::new(),
            ai_provider: AiProviderKind::Mock,
            ai_api_key: None,
        }
    }

    /// Applies the configured provider and its credential
    pub fn with_provider(mut self, provider: AiProviderKind, api_key: Option<String>) -> Self {
        self.ai_provider = provider;
        self.ai_api_key = api_key;
        self
    }

    pub fn has_preference(&self, tag: &str) -> bool {
        self.preferences.iter().any(|p| p == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QUESTIONS;

    #[test]
    fn test_assemble_from_empty_selections() {
        let profile = UserProfile::assemble("device-1", "You", &PreferenceSelections::new());
        assert_eq!(profile.id, "device-1");
        assert!(profile.preferences.is_empty());
        assert!(profile.viewed_categories.is_empty());
        assert_eq!(profile.ai_provider, AiProviderKind::Mock);
        assert_eq!(profile.ai_api_key, None);
    }

    #[test]
    fn test_assemble_flattens_and_lowercases() {
        let mut raw = PreferenceSelections::new();
        raw.select(&QUESTIONS[0], "Minimalist").unwrap();
        raw.select(&QUESTIONS[1], "Tech").unwrap();

        let profile = UserProfile::assemble("device-1", "Alex", &raw);
        assert_eq!(profile.preferences, vec!["minimalist", "tech"]);
        assert!(profile.has_preference("tech"));
        assert!(!profile.has_preference("Tech"));
    }

    #[test]
    fn test_with_provider() {
        let profile = UserProfile::assemble("device-1", "Alex", &PreferenceSelections::new())
            .with_provider(AiProviderKind::Gemini, Some("key".to_string()));
        assert!(profile.ai_provider.is_remote());
        assert_eq!(profile.ai_api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_provider_kind_serialization() {
        assert_eq!(serde_json::to_string(&AiProviderKind::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(serde_json::to_string(&AiProviderKind::Mock).unwrap(), "\"mock\"");
    }
}
