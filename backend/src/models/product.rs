use crate::error::AppError;
use chrono::{DateTime, Utc};
use marblecraft_shared::{ProductCategory, ProductResponse, Specification};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: ProductCategory,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub specifications: Json<Vec<Specification>>,
    pub in_stock: bool,
    pub is_featured: bool,
    pub display_order: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, name, category, description, price, images, specifications, \
                       in_stock, is_featured, display_order, created_at, updated_at";

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        name: String,
        category: ProductCategory,
        description: String,
        price: Decimal,
        images: Vec<String>,
        specifications: Vec<Specification>,
        in_stock: bool,
        is_featured: bool,
    ) -> Result<Self, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, category, description, price, images, specifications, in_stock, is_featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(price)
        .bind(images)
        .bind(Json(specifications))
        .bind(in_stock)
        .bind(is_featured)
        .fetch_one(pool)
        .await?;

        Ok(product)
    }

    /// Full catalog, manual ordering first, then newest.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products \
             ORDER BY display_order ASC NULLS LAST, created_at DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let product =
            sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        name: String,
        category: ProductCategory,
        description: String,
        price: Decimal,
        images: Vec<String>,
        specifications: Vec<Specification>,
        in_stock: bool,
        is_featured: bool,
    ) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET name = $2, category = $3, description = $4, price = $5, \
             images = $6, specifications = $7, in_stock = $8, is_featured = $9, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(price)
        .bind(images)
        .bind(Json(specifications))
        .bind(in_stock)
        .bind(is_featured)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_display_order(
        pool: &PgPool,
        id: Uuid,
        display_order: i32,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE products SET display_order = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(display_order)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub fn to_response(&self) -> ProductResponse {
        ProductResponse {
            id: self.id,
            name: self.name.clone(),
            category: self.category,
            description: self.description.clone(),
            price: self.price,
            images: self.images.clone(),
            specifications: self.specifications.0.clone(),
            in_stock: self.in_stock,
            is_featured: self.is_featured,
            display_order: self.display_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
