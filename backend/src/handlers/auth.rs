use crate::error::AppError;
use crate::middleware::auth::AuthenticatedAdmin;
use crate::services::AuthService;
use actix_web::{get, post, web, HttpResponse};
use marblecraft_shared::{CreateAdminRequest, LoginRequest};

#[post("/login")]
pub async fn login(
    auth_service: web::Data<AuthService>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = auth_service.login(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("")]
pub async fn create_admin(
    auth_service: web::Data<AuthService>,
    req: web::Json<CreateAdminRequest>,
) -> Result<HttpResponse, AppError> {
    let user = auth_service.create_admin(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

#[get("/me")]
pub async fn me(
    auth_service: web::Data<AuthService>,
    admin: AuthenticatedAdmin,
) -> Result<HttpResponse, AppError> {
    let user = auth_service.current_user(admin.user_id).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}
