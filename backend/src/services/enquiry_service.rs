use crate::error::AppError;
use crate::models::Enquiry;
use crate::utils::validation::validate_enquiry;
use marblecraft_shared::{BatchOutcome, CreateEnquiryRequest, EnquiryResponse, EnquiryStatus};
use sqlx::PgPool;
use tracing::info;

/// Quote-request intake and the admin-side status/deletion operations.
/// Batch operations are atomic per row, never as a set: missing ids are
/// recorded and skipped, and a mid-batch failure leaves earlier rows as
/// they are.
#[derive(Clone)]
pub struct EnquiryService {
    db_pool: PgPool,
}

impl EnquiryService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Validate and record a public quote request. Field-level validation
    /// runs before any persistence attempt; a single insert means no
    /// partial write is possible.
    pub async fn submit(&self, request: CreateEnquiryRequest) -> Result<EnquiryResponse, AppError> {
        let phone = validate_enquiry(&request)?;

        let enquiry = Enquiry::create(
            &self.db_pool,
            Enquiry::generate_id(),
            request.first_name,
            request.last_name,
            request.email,
            phone,
            request.product_category,
            request.product_name,
            request.quantity,
            request.message.unwrap_or_default(),
        )
        .await?;

        info!(
            "Recorded enquiry {} for '{}' x{}",
            enquiry.id, enquiry.product_name, enquiry.quantity
        );

        Ok(enquiry.to_response())
    }

    pub async fn list_all(&self) -> Result<Vec<Enquiry>, AppError> {
        Enquiry::find_all(&self.db_pool).await
    }

    pub async fn update_status(&self, id: &str, status: EnquiryStatus) -> Result<(), AppError> {
        if !Enquiry::update_status(&self.db_pool, id, status).await? {
            return Err(AppError::NotFound("Enquiry not found".to_string()));
        }
        info!("Enquiry {} marked {}", id, status);
        Ok(())
    }

    pub async fn update_status_batch(
        &self,
        ids: &[String],
        status: EnquiryStatus,
    ) -> Result<BatchOutcome, AppError> {
        let mut outcome = BatchOutcome::default();
        for id in ids {
            if Enquiry::update_status(&self.db_pool, id, status).await? {
                outcome.succeeded_ids.push(id.clone());
            } else {
                outcome.not_found_ids.push(id.clone());
            }
        }

        info!(
            "Batch status update to {}: {} updated, {} not found",
            status,
            outcome.succeeded(),
            outcome.not_found_ids.len()
        );

        Ok(outcome)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !Enquiry::delete(&self.db_pool, id).await? {
            return Err(AppError::NotFound("Enquiry not found".to_string()));
        }
        info!("Deleted enquiry {}", id);
        Ok(())
    }

    pub async fn delete_batch(&self, ids: &[String]) -> Result<BatchOutcome, AppError> {
        let mut outcome = BatchOutcome::default();
        for id in ids {
            if Enquiry::delete(&self.db_pool, id).await? {
                outcome.succeeded_ids.push(id.clone());
            } else {
                outcome.not_found_ids.push(id.clone());
            }
        }

        info!(
            "Batch delete: {} removed, {} not found",
            outcome.succeeded(),
            outcome.not_found_ids.len()
        );

        Ok(outcome)
    }
}

// Database round-trips; these run only when DATABASE_URL points at a test
// database and are skipped otherwise.
#[cfg(test)]
mod tests {
    use super::*;
    use marblecraft_shared::ProductCategory;
    use std::env;

    async fn test_pool() -> Option<PgPool> {
        let database_url = env::var("DATABASE_URL").ok()?;

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(pool)
    }

    #[tokio::test]
    async fn enquiry_lifecycle_roundtrip() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let service = EnquiryService::new(pool);

        let request = CreateEnquiryRequest {
            first_name: "Asha".to_string(),
            last_name: "Verma".to_string(),
            email: "asha@example.com".to_string(),
            phone: "(987) 654-3210".to_string(),
            product_category: ProductCategory::Marbles,
            product_name: "Makrana White".to_string(),
            quantity: 12,
            message: None,
        };

        let created = service.submit(request).await.expect("submit failed");
        assert_eq!(created.status, EnquiryStatus::Pending);
        assert_eq!(created.phone, "9876543210");
        assert_eq!(created.message, "");

        service
            .update_status(&created.id, EnquiryStatus::Solved)
            .await
            .expect("status update failed");

        let all = service.list_all().await.expect("list failed");
        let found = all.iter().find(|e| e.id == created.id).expect("missing row");
        assert_eq!(found.status, EnquiryStatus::Solved);

        service.delete(&created.id).await.expect("delete failed");
    }

    #[tokio::test]
    async fn batch_update_records_missing_ids() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let service = EnquiryService::new(pool);

        let missing = vec!["0".to_string()];
        let outcome = service
            .update_status_batch(&missing, EnquiryStatus::Solved)
            .await
            .expect("batch update failed");

        assert!(outcome.succeeded_ids.is_empty());
        assert_eq!(outcome.not_found_ids, missing);
    }
}
