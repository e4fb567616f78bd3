pub mod catalog;
pub mod context;
pub mod feed;
pub mod onboarding;
pub mod providers;
pub mod recommendations;
pub mod session;

pub use catalog::{Catalog, InMemoryCatalog};
pub use context::{detect_moment, Clock, MomentTicker, SystemClock};
pub use feed::{Direction, FeedNavigator, Gesture};
pub use onboarding::{OnboardingFlow, OnboardingProgress};
pub use providers::{ProviderSelector, ProviderSettings, RecommendationProvider};
pub use recommendations::{FeedLoader, LoadOutcome};
pub use session::{ViewGuard, ViewTicket};
