use std::sync::Arc;

use crate::{
    db::PreferenceStore,
    error::{AppError, AppResult},
    models::{Recommendation, RecommendedProduct, UserProfile},
    services::{
        catalog::Catalog,
        feed::{FeedNavigator, DEFAULT_GESTURE_THRESHOLD},
        providers::{ProviderSelector, RecommendationProvider},
        session::ViewTicket,
    },
};

/// Context string passed to providers for the home feed
pub const HOME_CONTEXT: &str = "home_page";

/// Result of a load that may have outlived its view
#[derive(Debug)]
pub enum LoadOutcome<T> {
    Ready(T),
    /// The view was dismissed or replaced while loading
    Discarded,
}

impl<T> LoadOutcome<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            LoadOutcome::Ready(value) => Some(value),
            LoadOutcome::Discarded => None,
        }
    }
}

/// Greeting plus resolved picks for the personalized section
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedFeed {
    /// `None` when the provider failed to produce one
    pub message: Option<String>,
    pub items: Vec<RecommendedProduct>,
}

/// Greeting plus the whole catalog as a swipeable sequence
#[derive(Debug, Clone)]
pub struct AmbientFeed {
    pub message: Option<String>,
    pub navigator: FeedNavigator,
}

/// Resolves provider picks to catalog products
///
/// Ids the catalog does not know are dropped; the rest keep provider order.
pub async fn resolve_recommendations(
    catalog: &dyn Catalog,
    recommendations: Vec<Recommendation>,
) -> AppResult<Vec<RecommendedProduct>> {
    let mut resolved = Vec::with_capacity(recommendations.len());

    for recommendation in recommendations {
        match catalog.get_product(&recommendation.product_id).await {
            Ok(product) => resolved.push(RecommendedProduct {
                product,
                reason: recommendation.reason,
            }),
            Err(AppError::NotFound(_)) => {
                tracing::debug!(
                    product_id = %recommendation.product_id,
                    "Dropping recommendation for unknown product"
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(resolved)
}

/// Builds the profile for this device from stored onboarding answers
pub async fn load_profile(
    store: &dyn PreferenceStore,
    display_name: &str,
) -> AppResult<UserProfile> {
    let raw = store.read_preferences().await?;
    let device_id = store.device_id().await?;
    Ok(UserProfile::assemble(device_id, display_name, &raw))
}

/// Loads feed content for a view, degrading instead of failing
pub struct FeedLoader {
    catalog: Arc<dyn Catalog>,
    selector: ProviderSelector,
    gesture_threshold: f64,
}

impl FeedLoader {
    pub fn new(catalog: Arc<dyn Catalog>, selector: ProviderSelector) -> Self {
        Self {
            catalog,
            selector,
            gesture_threshold: DEFAULT_GESTURE_THRESHOLD,
        }
    }

    pub fn with_gesture_threshold(mut self, gesture_threshold: f64) -> Self {
        self.gesture_threshold = gesture_threshold;
        self
    }

    /// Greeting first, then recommendations resolved through the catalog
    pub async fn load_recommended(
        &self,
        ticket: &ViewTicket,
        profile: &UserProfile,
    ) -> LoadOutcome<RecommendedFeed> {
        let provider = self.selector.select(profile);

        let message = Self::fetch_message(provider.as_ref(), profile).await;
        if !ticket.is_current() {
            return Self::discard(provider.name());
        }

        let recommendations = match provider.get_recommendations(profile, HOME_CONTEXT).await {
            Ok(recommendations) => recommendations,
            Err(e) => {
                log_degraded(&e, provider.name(), "recommendations");
                Vec::new()
            }
        };
        if !ticket.is_current() {
            return Self::discard(provider.name());
        }

        let items = match resolve_recommendations(self.catalog.as_ref(), recommendations).await {
            Ok(items) => items,
            Err(e) => {
                log_degraded(&e, provider.name(), "resolve");
                Vec::new()
            }
        };
        if !ticket.is_current() {
            return Self::discard(provider.name());
        }

        tracing::info!(
            provider = provider.name(),
            item_count = items.len(),
            "Recommended feed loaded"
        );

        LoadOutcome::Ready(RecommendedFeed { message, items })
    }

    /// Greeting plus every catalog product, positioned at the first one
    pub async fn load_ambient(
        &self,
        ticket: &ViewTicket,
        profile: &UserProfile,
    ) -> LoadOutcome<AmbientFeed> {
        let provider = self.selector.select(profile);

        let message = Self::fetch_message(provider.as_ref(), profile).await;
        if !ticket.is_current() {
            return Self::discard(provider.name());
        }

        let products = match self.catalog.list_products().await {
            Ok(products) => products,
            Err(e) => {
                log_degraded(&e, provider.name(), "catalog");
                Vec::new()
            }
        };
        if !ticket.is_current() {
            return Self::discard(provider.name());
        }

        let navigator = FeedNavigator::with_gesture_threshold(products, self.gesture_threshold);
        tracing::info!(item_count = navigator.len(), "Ambient feed loaded");

        LoadOutcome::Ready(AmbientFeed { message, navigator })
    }

    async fn fetch_message(
        provider: &dyn RecommendationProvider,
        profile: &UserProfile,
    ) -> Option<String> {
        match provider.generate_message(profile).await {
            Ok(message) => Some(message),
            Err(e) => {
                log_degraded(&e, provider.name(), "message");
                None
            }
        }
    }

    fn discard<T>(provider: &str) -> LoadOutcome<T> {
        tracing::debug!(provider, "View dismissed while loading, discarding result");
        LoadOutcome::Discarded
    }
}

fn log_degraded(error: &AppError, provider: &str, stage: &str) {
    match error {
        AppError::Configuration(_) => {
            tracing::error!(error = %error, provider, stage, "Provider misconfigured")
        }
        _ => tracing::warn!(error = %error, provider, stage, "Provider call failed"),
    }
}
