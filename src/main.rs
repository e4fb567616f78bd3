use std::sync::Arc;

use ambient_feed::{
    config::Config,
    db::{create_redis_client, InMemoryStore, KeyValueStore, KvPreferenceStore, RedisStore},
    services::{
        recommendations::load_profile, Catalog, FeedLoader, InMemoryCatalog, LoadOutcome,
        MomentTicker, OnboardingFlow, ProviderSelector, ProviderSettings, SystemClock, ViewGuard,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let catalog: Arc<dyn Catalog> = match &config.catalog_path {
        Some(path) => Arc::new(InMemoryCatalog::from_json_file(path)?),
        None => Arc::new(InMemoryCatalog::sample()),
    };

    let kv: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisStore::new(create_redis_client(url)?)),
        None => Arc::new(InMemoryStore::new()),
    };
    tracing::info!(backend = kv.name(), client_id = %config.client_id, "Preference store ready");
    let store = KvPreferenceStore::new(kv, config.client_id.clone());

    // One answer per onboarding question, in order; no answers skips the flow
    if OnboardingFlow::should_show(&store).await? {
        let answers: Vec<String> = std::env::args().skip(1).collect();
        let mut flow = OnboardingFlow::new();
        if answers.is_empty() {
            flow.skip(&store).await?;
        } else {
            for answer in &answers {
                flow.select(answer)?;
                flow.advance(&store).await?;
            }
        }
    }

    let profile = load_profile(&store, &config.display_name)
        .await?
        .with_provider(config.ai_provider, config.ai_api_key.clone());

    let ticker = MomentTicker::start(Arc::new(SystemClock), config.moment_refresh_interval());
    let moment = ticker.current();
    tracing::info!(moment = moment.name, phrase = moment.display_phrase, "Detected moment");

    let selector = ProviderSelector::new(catalog.clone(), ProviderSettings::from(&config));
    let loader = FeedLoader::new(catalog, selector).with_gesture_threshold(config.gesture_threshold);
    let guard = ViewGuard::new();
    let ticket = guard.begin();

    if let LoadOutcome::Ready(feed) = loader.load_recommended(&ticket, &profile).await {
        tracing::info!(
            message = feed.message.as_deref().unwrap_or("Recommended for You"),
            "Personalized section"
        );
        for item in &feed.items {
            tracing::info!(
                product = %item.product.title,
                price = %item.product.display_price(),
                reason = %item.reason,
                "Recommended"
            );
        }
    }

    if let LoadOutcome::Ready(feed) = loader.load_ambient(&ticket, &profile).await {
        tracing::info!(caption = %moment.caption(feed.message.as_deref()), "Ambient feed");
        if let (Some(product), Some(position)) =
            (feed.navigator.current(), feed.navigator.position_label())
        {
            tracing::info!(product = %product.title, position = %position, "Showing");
        }
    }

    guard.dismiss();
    ticker.stop();
    Ok(())
}
