use crate::error::AppError;
use crate::models::AdminUser;
use crate::utils::jwt::JwtService;
use marblecraft_shared::{
    AdminUserResponse, AuthResponse, CreateAdminRequest, LoginRequest, JWT_ACCESS_TOKEN_EXPIRY,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

const ERROR_INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Admin login: a bcrypt credential check that issues a short-lived access
/// token. Roles are carried in the token and checked per route group.
#[derive(Clone)]
pub struct AuthService {
    db_pool: PgPool,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(db_pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            db_pool,
            jwt_service,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let user = AdminUser::find_by_email(&self.db_pool, &request.email)
            .await?
            .ok_or_else(|| AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            warn!("Failed login attempt for {}", user.email);
            return Err(AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string()));
        }

        let access_token =
            self.jwt_service
                .generate_access_token(user.id, user.email.clone(), user.role)?;

        info!("Admin {} logged in as {}", user.email, user.role);

        Ok(AuthResponse {
            access_token,
            user: user.to_response(),
            expires_in: JWT_ACCESS_TOKEN_EXPIRY.as_secs() as i64,
        })
    }

    pub async fn current_user(&self, user_id: Uuid) -> Result<AdminUser, AppError> {
        AdminUser::find_by_id(&self.db_pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Admin user not found".to_string()))
    }

    pub async fn create_admin(
        &self,
        request: CreateAdminRequest,
    ) -> Result<AdminUserResponse, AppError> {
        request.validate()?;

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = AdminUser::create(&self.db_pool, request.email, password_hash, request.role)
            .await?;

        info!("Created admin {} with role {}", user.email, user.role);
        Ok(user.to_response())
    }
}
