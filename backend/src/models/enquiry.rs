use crate::error::AppError;
use chrono::{DateTime, Utc};
use marblecraft_shared::{EnquiryResponse, EnquiryStatus, ProductCategory};
use rand::Rng;
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, FromRow)]
pub struct Enquiry {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub product_category: ProductCategory,
    /// Snapshot of the product name at enquiry time, not a foreign key; it
    /// stays intact if the product is later renamed or deleted.
    pub product_name: String,
    pub quantity: i32,
    pub message: String,
    pub status: EnquiryStatus,
    pub created_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, first_name, last_name, email, phone, product_category, \
                       product_name, quantity, message, status, created_at";

impl Enquiry {
    /// Time-derived identity: epoch millis plus a short random suffix to
    /// keep two submissions in the same millisecond distinct.
    pub fn generate_id() -> String {
        let millis = Utc::now().timestamp_millis();
        let suffix: u16 = rand::thread_rng().gen_range(0..10000);
        format!("{}{:04}", millis, suffix)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        id: String,
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        product_category: ProductCategory,
        product_name: String,
        quantity: i32,
        message: String,
    ) -> Result<Self, AppError> {
        let enquiry = sqlx::query_as::<_, Enquiry>(&format!(
            "INSERT INTO enquiries (id, first_name, last_name, email, phone, product_category, product_name, quantity, message, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending') \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .bind(product_category)
        .bind(product_name)
        .bind(quantity)
        .bind(message)
        .fetch_one(pool)
        .await?;

        Ok(enquiry)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let enquiries = sqlx::query_as::<_, Enquiry>(&format!(
            "SELECT {COLUMNS} FROM enquiries ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(enquiries)
    }

    /// Returns false when no row matched the id.
    pub async fn update_status(
        pool: &PgPool,
        id: &str,
        status: EnquiryStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE enquiries SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns false when no row matched the id.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM enquiries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> EnquiryResponse {
        EnquiryResponse {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            product_category: self.product_category,
            product_name: self.product_name.clone(),
            quantity: self.quantity,
            message: self.message.clone(),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_time_ordered_strings() {
        let id = Enquiry::generate_id();
        assert!(id.len() >= 16);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = Enquiry::generate_id();
        let b = Enquiry::generate_id();
        // Millisecond collision is possible; the random suffix keeps the
        // pair distinct with overwhelming probability.
        assert_ne!(a, b);
    }
}
