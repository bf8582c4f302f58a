use crate::error::AppError;
use crate::models::Product;
use crate::services::product_cache::ProductListCache;
use crate::utils::images::{orphaned_images, remove_image_files};
use crate::utils::validation::validate_product_write;
use marblecraft_shared::{CreateProductRequest, ProductResponse};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Catalog management: product CRUD, manual reordering and the read-through
/// list cache. Every write invalidates the cache before returning.
#[derive(Clone)]
pub struct ProductService {
    db_pool: PgPool,
    cache: ProductListCache,
    upload_dir: String,
}

impl ProductService {
    pub fn new(db_pool: PgPool, cache: ProductListCache, upload_dir: String) -> Self {
        Self {
            db_pool,
            cache,
            upload_dir,
        }
    }

    /// The full product collection, served from the cache while fresh.
    pub async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        if let Some(products) = self.cache.get() {
            return Ok(products);
        }

        let products = Product::find_all(&self.db_pool).await?;
        self.cache.put(products.clone());
        Ok(products)
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductResponse, AppError> {
        let product = Product::find_by_id(&self.db_pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        Ok(product.to_response())
    }

    pub async fn create(&self, request: CreateProductRequest) -> Result<ProductResponse, AppError> {
        request.validate()?;
        validate_product_write(&request.images, request.price)?;

        let product = Product::create(
            &self.db_pool,
            request.name,
            request.category,
            request.description,
            request.price,
            request.images,
            request.specifications,
            request.in_stock.unwrap_or(true),
            request.is_featured.unwrap_or(false),
        )
        .await?;

        self.cache.invalidate();
        info!("Created product {} '{}'", product.id, product.name);

        Ok(product.to_response())
    }

    /// Full replace. Images dropped by the new list are deleted from the
    /// upload directory after the row is updated.
    pub async fn update(
        &self,
        id: Uuid,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        request.validate()?;
        validate_product_write(&request.images, request.price)?;

        let existing = Product::find_by_id(&self.db_pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        let new_images = request.images.clone();
        let updated = Product::update(
            &self.db_pool,
            id,
            request.name,
            request.category,
            request.description,
            request.price,
            request.images,
            request.specifications,
            request.in_stock.unwrap_or(true),
            request.is_featured.unwrap_or(false),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        let orphans = orphaned_images(&existing.images, &new_images);
        remove_image_files(&self.upload_dir, &orphans);

        self.cache.invalidate();
        info!("Updated product {} ({} orphaned images removed)", id, orphans.len());

        Ok(updated.to_response())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let product = Product::find_by_id(&self.db_pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        Product::delete(&self.db_pool, id).await?;
        remove_image_files(&self.upload_dir, &product.images);

        self.cache.invalidate();
        info!("Deleted product {} '{}'", id, product.name);

        Ok(())
    }

    /// Move one product to a new position and renumber display_order across
    /// the whole collection.
    pub async fn reorder(&self, product_id: Uuid, new_index: usize) -> Result<(), AppError> {
        let mut products = Product::find_all(&self.db_pool).await?;

        let current = products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        let product = products.remove(current);
        let target = new_index.min(products.len());
        products.insert(target, product);

        for (index, product) in products.iter().enumerate() {
            Product::set_display_order(&self.db_pool, product.id, index as i32).await?;
        }

        self.cache.invalidate();
        info!("Moved product {} to position {}", product_id, target);

        Ok(())
    }
}
