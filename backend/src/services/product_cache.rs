use crate::models::Product;
use marblecraft_shared::PRODUCT_CACHE_TTL;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Time-boxed memo of the full product collection. Reads within the TTL
/// reuse the memoized list; every product write invalidates the slot before
/// returning, so a read issued after a write is always fresh. A read racing
/// a write may observe brief staleness, which no invariant depends on.
#[derive(Clone)]
pub struct ProductListCache {
    ttl: Duration,
    slot: Arc<Mutex<Option<CacheEntry>>>,
}

#[derive(Clone)]
struct CacheEntry {
    products: Vec<Product>,
    stored_at: Instant,
}

impl ProductListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn get(&self) -> Option<Vec<Product>> {
        self.get_at(Instant::now())
    }

    pub fn put(&self, products: Vec<Product>) {
        self.put_at(products, Instant::now());
    }

    pub fn invalidate(&self) {
        *self.slot.lock().unwrap() = None;
    }

    pub(crate) fn get_at(&self, now: Instant) -> Option<Vec<Product>> {
        let slot = self.slot.lock().unwrap();
        match slot.as_ref() {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                debug!("Product list cache hit ({} products)", entry.products.len());
                Some(entry.products.clone())
            }
            _ => None,
        }
    }

    pub(crate) fn put_at(&self, products: Vec<Product>, now: Instant) {
        *self.slot.lock().unwrap() = Some(CacheEntry {
            products,
            stored_at: now,
        });
    }
}

impl Default for ProductListCache {
    fn default() -> Self {
        Self::new(PRODUCT_CACHE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use marblecraft_shared::{ProductCategory, Specification};
    use rust_decimal::Decimal;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn product(name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: ProductCategory::Marbles,
            description: String::new(),
            price: Decimal::from(10),
            images: vec!["/uploads/a.jpg".to_string()],
            specifications: Json(Vec::<Specification>::new()),
            in_stock: true,
            is_featured: false,
            display_order: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn serves_within_ttl_and_expires_after() {
        let cache = ProductListCache::new(Duration::from_secs(60));
        let base = Instant::now();

        cache.put_at(vec![product("Statuario")], base);
        assert!(cache.get_at(base + Duration::from_secs(59)).is_some());
        assert!(cache.get_at(base + Duration::from_secs(60)).is_none());
    }

    #[test]
    fn invalidate_clears_regardless_of_age() {
        let cache = ProductListCache::new(Duration::from_secs(60));
        let base = Instant::now();

        cache.put_at(vec![product("Statuario")], base);
        cache.invalidate();
        assert!(cache.get_at(base).is_none());
    }

    #[test]
    fn put_replaces_the_previous_entry() {
        let cache = ProductListCache::new(Duration::from_secs(60));
        let base = Instant::now();

        cache.put_at(vec![product("Old")], base);
        cache.put_at(vec![product("New")], base + Duration::from_secs(1));

        let cached = cache.get_at(base + Duration::from_secs(2)).unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].name, "New");
    }

    #[test]
    fn clones_share_the_slot() {
        let cache = ProductListCache::new(Duration::from_secs(60));
        let other = cache.clone();
        let base = Instant::now();

        cache.put_at(vec![product("Shared")], base);
        assert!(other.get_at(base).is_some());

        other.invalidate();
        assert!(cache.get_at(base).is_none());
    }
}
