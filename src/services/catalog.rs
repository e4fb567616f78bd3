//! Read-only product catalog
//!
//! The catalog is an external collaborator of the engine. `InMemoryCatalog` is the
//! reference implementation used by the demo binary and the tests.
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{Product, ProductSource},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Fails with `AppError::NotFound` when the id is unknown
    async fn get_product(&self, id: &str) -> AppResult<Product>;

    /// Case-insensitive substring match over title or description, catalog order
    async fn search_products(&self, query: &str) -> AppResult<Vec<Product>>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Loads a JSON array of products
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;

        tracing::info!(
            path = %path.display(),
            product_count = products.len(),
            "Loaded catalog from file"
        );

        Ok(Self::new(products))
    }

    /// The built-in demo catalog
    pub fn sample() -> Self {
        Self::new(sample_products())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait::async_trait]
impl Catalog for InMemoryCatalog {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn get_product(&self, id: &str) -> AppResult<Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("product {}", id)))
    }

    async fn search_products(&self, query: &str) -> AppResult<Vec<Product>> {
        let needle = query.to_lowercase();
        let matches: Vec<Product> = self
            .products
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        tracing::debug!(query = %query, match_count = matches.len(), "Catalog search");
        Ok(matches)
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    title: &str,
    description: &str,
    price: f64,
    image: &str,
    source: ProductSource,
    category: &str,
    rating: Option<(f32, u32)>,
) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price,
        currency: "USD".to_string(),
        image: format!(
            "https://images.unsplash.com/{}?auto=format&fit=crop&w=500&q=60",
            image
        ),
        source,
        category: category.to_string(),
        rating: rating.map(|(r, _)| r),
        reviews_count: rating.map(|(_, n)| n),
        url: "#".to_string(),
    }
}

fn sample_products() -> Vec<Product> {
    use ProductSource::*;

    vec![
        product(
            "1",
            "Minimalist Leather Wallet",
            "Sleek, genuine leather wallet with RFID protection.",
            45.00,
            "photo-1627123424574-724758594e93",
            Shopify,
            "Accessories",
            None,
        ),
        product(
            "2",
            "Wireless Noise Cancelling Headphones",
            "Premium sound quality with active noise cancellation.",
            299.99,
            "photo-1505740420928-5e560c06d30e",
            Amazon,
            "Electronics",
            Some((4.8, 1250)),
        ),
        product(
            "3",
            "Smart Home Assistant Speaker",
            "Control your home with voice commands. Compatible with major platforms.",
            99.00,
            "photo-1589492477829-5e65395b66cc",
            Amazon,
            "Electronics",
            Some((4.5, 890)),
        ),
        product(
            "4",
            "Organic Cotton T-Shirt",
            "Soft, breathable, and eco-friendly basic tee.",
            25.00,
            "photo-1521572163474-6864f9cf17ab",
            Shopify,
            "Clothing",
            None,
        ),
        product(
            "5",
            "Ergonomic Office Chair",
            "Designed for comfort and productivity during long work hours.",
            350.00,
            "photo-1505843490538-5133c6c7d0e1",
            Amazon,
            "Furniture",
            Some((4.7, 450)),
        ),
        product(
            "6",
            "Ceramic Coffee Mug Set",
            "Handcrafted minimalist mugs for your morning brew.",
            38.00,
            "photo-1514228742587-6b1558fcca3d",
            Shopify,
            "Home",
            None,
        ),
        product(
            "7",
            "Minimalist Desk Lamp",
            "Adjustable LED desk lamp with touch control.",
            42.00,
            "photo-1534073828943-ef8010912984",
            Google,
            "Home",
            None,
        ),
        product(
            "8",
            "Mechanical Keyboard",
            "Compact 60% mechanical keyboard for developers.",
            85.00,
            "photo-1595225476474-87563907a212",
            Google,
            "Electronics",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_catalog_ids_unique() {
        let products = InMemoryCatalog::sample().list_products().await.unwrap();
        let mut ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_get_product_found() {
        let catalog = InMemoryCatalog::sample();
        let product = tokio_test::block_on(catalog.get_product("6")).unwrap();
        assert_eq!(product.title, "Ceramic Coffee Mug Set");
    }

    #[test]
    fn test_get_product_not_found() {
        let catalog = InMemoryCatalog::sample();
        let err = tokio_test::block_on(catalog.get_product("999")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_search_by_title_case_insensitive() {
        let catalog = InMemoryCatalog::sample();
        let results = catalog.search_products("headphones").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Wireless Noise Cancelling Headphones");
    }

    #[tokio::test]
    async fn test_search_matches_description() {
        let catalog = InMemoryCatalog::sample();
        // "minimalist" appears in two titles and in the mug set description
        let ids: Vec<String> = catalog
            .search_products("MINIMALIST")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["1", "6", "7"]);
    }

    #[tokio::test]
    async fn test_search_no_match() {
        let catalog = InMemoryCatalog::sample();
        assert!(catalog.search_products("zzz-no-match").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query_matches_all() {
        let catalog = InMemoryCatalog::sample();
        assert_eq!(catalog.search_products("").await.unwrap().len(), catalog.len());
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = InMemoryCatalog::from_json_file("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        let products = sample_products();
        std::fs::write(&path, serde_json::to_string(&products).unwrap()).unwrap();

        let catalog = InMemoryCatalog::from_json_file(&path).unwrap();
        assert_eq!(catalog.len(), products.len());

        std::fs::remove_file(&path).unwrap();
    }
}
