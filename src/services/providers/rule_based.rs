use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::{
    config::DEFAULT_TRENDING_PRODUCT_ID,
    error::AppResult,
    models::{Recommendation, UserProfile},
    services::{catalog::Catalog, providers::RecommendationProvider},
};

pub const STYLE_MATCH_REASON: &str = "Matches your 'minimalist' style preference.";
pub const INTEREST_MATCH_REASON: &str = "Based on your interest in technology.";
pub const TRENDING_REASON: &str = "Trending item you might like.";

/// Deterministic provider driven by preference tags
///
/// Rules are independent and each contributes at most one pick:
/// 1. "minimalist" -> first product whose title contains "Wallet"
/// 2. "tech" -> first product in the "Electronics" category
/// 3. nothing matched -> the trending product
#[derive(Clone)]
pub struct RuleBasedProvider {
    catalog: Arc<dyn Catalog>,
    trending_product_id: String,
    recommendation_latency: Duration,
    message_latency: Duration,
}

impl RuleBasedProvider {
    /// Creates a provider with no simulated latency
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            trending_product_id: DEFAULT_TRENDING_PRODUCT_ID.to_string(),
            recommendation_latency: Duration::ZERO,
            message_latency: Duration::ZERO,
        }
    }

    /// Adds an artificial delay to model a model round-trip
    pub fn with_latency(mut self, recommendations: Duration, message: Duration) -> Self {
        self.recommendation_latency = recommendations;
        self.message_latency = message;
        self
    }

    pub fn with_trending_product(mut self, product_id: impl Into<String>) -> Self {
        self.trending_product_id = product_id.into();
        self
    }

    async fn simulate_latency(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for RuleBasedProvider {
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    async fn get_recommendations(
        &self,
        profile: &UserProfile,
        context: &str,
    ) -> AppResult<Vec<Recommendation>> {
        Self::simulate_latency(self.recommendation_latency).await;

        let products = self.catalog.list_products().await?;
        let mut recommendations = Vec::new();

        if profile.has_preference("minimalist") {
            if let Some(product) = products.iter().find(|p| p.title.contains("Wallet")) {
                recommendations.push(Recommendation::new(&product.id, STYLE_MATCH_REASON));
            }
        }

        if profile.has_preference("tech") {
            if let Some(product) = products.iter().find(|p| p.category == "Electronics") {
                recommendations.push(Recommendation::new(&product.id, INTEREST_MATCH_REASON));
            }
        }

        if recommendations.is_empty() {
            recommendations.push(Recommendation::new(
                &self.trending_product_id,
                TRENDING_REASON,
            ));
        }

        tracing::info!(
            recommendation_count = recommendations.len(),
            "Rule-based recommendations ready"
        );

        Ok(recommendations)
    }

    async fn generate_message(&self, profile: &UserProfile) -> AppResult<String> {
        Self::simulate_latency(self.message_latency).await;
        Ok(format!(
            "Welcome back, {}. We've curated some minimalist finds just for you.",
            profile.name
        ))
    }

    fn name(&self) -> &'static str {
        "rule_based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{test_product, UserProfile};
    use crate::services::catalog::{InMemoryCatalog, MockCatalog};

    fn profile_with(tags: &[&str]) -> UserProfile {
        UserProfile {
            id: "device-1".to_string(),
            name: "Alex".to_string(),
            preferences: tags.iter().map(|t| t.to_string()).collect(),
            viewed_categories: vec![],
            ai_provider: Default::default(),
            ai_api_key: None,
        }
    }

    fn provider() -> RuleBasedProvider {
        RuleBasedProvider::new(Arc::new(InMemoryCatalog::sample()))
    }

    #[tokio::test]
    async fn test_minimalist_picks_wallet() {
        let recs = provider()
            .get_recommendations(&profile_with(&["minimalist"]), "home_page")
            .await
            .unwrap();
        assert_eq!(recs, vec![Recommendation::new("1", STYLE_MATCH_REASON)]);
    }

    #[tokio::test]
    async fn test_tech_picks_first_electronics() {
        let recs = provider()
            .get_recommendations(&profile_with(&["tech"]), "home_page")
            .await
            .unwrap();
        assert_eq!(recs, vec![Recommendation::new("2", INTEREST_MATCH_REASON)]);
    }

    #[tokio::test]
    async fn test_rules_are_independent_and_ordered() {
        let recs = provider()
            .get_recommendations(&profile_with(&["tech", "minimalist"]), "home_page")
            .await
            .unwrap();
        let ids: Vec<&str> = recs.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_no_matching_tags_yields_single_fallback() {
        let recs = provider()
            .get_recommendations(&profile_with(&["modern", "books"]), "home_page")
            .await
            .unwrap();
        assert_eq!(
            recs,
            vec![Recommendation::new(DEFAULT_TRENDING_PRODUCT_ID, TRENDING_REASON)]
        );
    }

    #[tokio::test]
    async fn test_tag_without_matching_product_falls_back() {
        let catalog = InMemoryCatalog::new(vec![test_product("a", "Canvas Tote", "Bags")]);
        let provider = RuleBasedProvider::new(Arc::new(catalog)).with_trending_product("a");

        let recs = provider
            .get_recommendations(&profile_with(&["minimalist", "tech"]), "home_page")
            .await
            .unwrap();
        assert_eq!(recs, vec![Recommendation::new("a", TRENDING_REASON)]);
    }

    #[tokio::test]
    async fn test_catalog_failure_propagates() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_list_products()
            .returning(|| Err(AppError::Transient("catalog offline".to_string())));

        let err = RuleBasedProvider::new(Arc::new(catalog))
            .get_recommendations(&profile_with(&["tech"]), "home_page")
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_message_embeds_name() {
        let message = provider()
            .generate_message(&profile_with(&["tech"]))
            .await
            .unwrap();
        assert_eq!(
            message,
            "Welcome back, Alex. We've curated some minimalist finds just for you."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let provider = provider().with_latency(Duration::from_millis(800), Duration::ZERO);
        let started = tokio::time::Instant::now();

        provider
            .get_recommendations(&profile_with(&[]), "home_page")
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(800));
    }
}
