use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod moment;
pub mod profile;
pub mod user_preferences;

pub use moment::{Moment, MomentIcon};
pub use profile::{AiProviderKind, UserProfile};
pub use user_preferences::{PreferenceQuestion, PreferenceSelections, QuestionId, QUESTIONS};

/// Marketplace a product is listed on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProductSource {
    Amazon,
    Shopify,
    Google,
    #[serde(other)]
    Other,
}

impl Display for ProductSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProductSource::Amazon => "Amazon",
            ProductSource::Shopify => "Shopify",
            ProductSource::Google => "Google",
            ProductSource::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// A shopping product as supplied by the catalog
///
/// Immutable once loaded. Wire names follow the catalog JSON format (`reviewsCount`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Non-negative price in `currency`
    pub price: f64,
    /// ISO code ("USD") or a symbol
    pub currency: String,
    pub image: String,
    pub source: ProductSource,
    pub category: String,
    /// 0.0 - 5.0
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub reviews_count: Option<u32>,
    pub url: String,
}

impl Product {
    /// Price formatted for display, e.g. `$45.00` or `EUR45.00`
    pub fn display_price(&self) -> String {
        let prefix = if self.currency == "USD" {
            "$"
        } else {
            self.currency.as_str()
        };
        format!("{}{:.2}", prefix, self.price)
    }

    /// Number of filled rating stars, if the product has a rating
    pub fn full_stars(&self) -> Option<u8> {
        self.rating
            .map(|rating| rating.clamp(0.0, 5.0).floor() as u8)
    }
}

/// A single provider pick: which product and why
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Must reference a catalog product; unresolvable ids are dropped downstream
    pub product_id: String,
    pub reason: String,
}

impl Recommendation {
    pub fn new(product_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            reason: reason.into(),
        }
    }
}

/// A recommendation resolved against the catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendedProduct {
    pub product: Product,
    pub reason: String,
}

#[cfg(test)]
pub(crate) fn test_product(id: &str, title: &str, category: &str) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{} description", title),
        price: 10.0,
        currency: "USD".to_string(),
        image: String::new(),
        source: ProductSource::Other,
        category: category.to_string(),
        rating: None,
        reviews_count: None,
        url: "#".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_price_usd() {
        let product = test_product("1", "Wallet", "Accessories");
        assert_eq!(product.display_price(), "$10.00");
    }

    #[test]
    fn test_display_price_other_currency() {
        let mut product = test_product("1", "Wallet", "Accessories");
        product.currency = "EUR".to_string();
        product.price = 299.999;
        assert_eq!(product.display_price(), "EUR300.00");
    }

    #[test]
    fn test_full_stars() {
        let mut product = test_product("2", "Headphones", "Electronics");
        assert_eq!(product.full_stars(), None);
        product.rating = Some(4.8);
        assert_eq!(product.full_stars(), Some(4));
    }

    #[test]
    fn test_product_deserialize_camel_case() {
        let json = r##"{
            "id": "2",
            "title": "Wireless Noise Cancelling Headphones",
            "description": "Premium sound quality.",
            "price": 299.99,
            "currency": "USD",
            "image": "headphones.jpg",
            "source": "Amazon",
            "rating": 4.8,
            "reviewsCount": 1250,
            "category": "Electronics",
            "url": "#"
        }"##;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.source, ProductSource::Amazon);
        assert_eq!(product.reviews_count, Some(1250));
        assert_eq!(product.rating, Some(4.8));
    }

    #[test]
    fn test_unknown_source_maps_to_other() {
        let source: ProductSource = serde_json::from_str("\"Etsy\"").unwrap();
        assert_eq!(source, ProductSource::Other);
    }
}
