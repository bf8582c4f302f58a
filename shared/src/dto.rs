use crate::types::*;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A single key/value row of a product's specifications table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub key: String,
    pub value: String,
}

// Product DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub category: ProductCategory,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    pub price: Decimal,

    pub images: Vec<String>,

    #[serde(default)]
    pub specifications: Vec<Specification>,

    pub in_stock: Option<bool>,

    pub is_featured: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub category: ProductCategory,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub specifications: Vec<Specification>,
    pub in_stock: bool,
    pub is_featured: bool,
    pub display_order: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `PATCH /api/products`: move one product to a new position in the
/// manually ordered catalog.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReorderProductRequest {
    pub product_id: Uuid,
    pub new_index: usize,
}

// Enquiry DTOs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnquiryRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub product_category: ProductCategory,
    pub product_name: String,
    pub quantity: i32,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnquiryResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub product_category: ProductCategory,
    pub product_name: String,
    pub quantity: i32,
    pub message: String,
    pub status: EnquiryStatus,
    pub created_at: DateTime<Utc>,
}

/// Body of `PUT /api/enquiries`. Carries either a single `id` or a batch of
/// `ids`; an unknown `status` value fails deserialization and is rejected
/// with a 400 before reaching any handler logic.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEnquiryStatusRequest {
    pub id: Option<String>,
    pub ids: Option<Vec<String>>,
    pub status: EnquiryStatus,
}

/// Outcome of a batch operation. Each id's result is independent; missing
/// ids are recorded rather than escalated, and nothing is rolled back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub succeeded_ids: Vec<String>,
    pub not_found_ids: Vec<String>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.succeeded_ids.len()
    }
}

// Blog DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub excerpt: String,

    #[validate(length(min = 1))]
    pub content: String,

    pub cover_image: String,

    #[validate(length(min = 1, max = 100))]
    pub author: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub author: String,
    pub likes: i32,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 2000))]
    pub content: String,

    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// Auth DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub role: AdminRole,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: AdminUserResponse,
    pub expires_in: i64,
}

// Pagination
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub has_more: bool,
}
