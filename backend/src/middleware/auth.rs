use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use crate::error::AppError;
use crate::utils::jwt::{Claims, JwtService};
use marblecraft_shared::AdminRole;

/// Authenticated admin extracted from a validated JWT.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub user_id: uuid::Uuid,
    pub email: String,
    pub role: AdminRole,
}

impl AuthenticatedAdmin {
    fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        let user_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Internal("Invalid user ID in claims".to_string()))?;

        Ok(Self {
            user_id,
            email: claims.email.clone(),
            role: claims.role,
        })
    }
}

impl actix_web::FromRequest for AuthenticatedAdmin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        ready(match claims {
            Some(claims) => AuthenticatedAdmin::from_claims(&claims),
            None => Err(AppError::Internal(
                "Claims not found in request".to_string(),
            )),
        })
    }
}

/// Route-level guard: validates the bearer token and, when configured,
/// checks the caller's role against an allow-list for the route group.
pub struct AuthMiddleware {
    jwt_service: Arc<JwtService>,
    allowed_roles: Option<Vec<AdminRole>>,
}

impl AuthMiddleware {
    pub fn new(jwt_service: Arc<JwtService>) -> Self {
        Self {
            jwt_service,
            allowed_roles: None,
        }
    }

    pub fn allow(mut self, roles: &[AdminRole]) -> Self {
        self.allowed_roles = Some(roles.to_vec());
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt_service: self.jwt_service.clone(),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt_service: Arc<JwtService>,
    allowed_roles: Option<Vec<AdminRole>>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let jwt_service = self.jwt_service.clone();
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "));

            let token = match auth_header {
                Some(token) => token,
                None => {
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "missing_token",
                        "message": "Authorization token is required"
                    }));
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let claims = match jwt_service.validate_token(token) {
                Ok(claims) => claims,
                Err(e) => {
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "invalid_token",
                        "message": e.to_string()
                    }));
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            if let Some(allowed) = &allowed_roles {
                if !is_allowed(claims.role, allowed) {
                    let response = HttpResponse::Forbidden().json(serde_json::json!({
                        "error": "insufficient_permissions",
                        "message": "Insufficient permissions for this operation"
                    }));
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            req.extensions_mut().insert(claims);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Allow-list check: super_admin and admin reach everything, the scoped
/// roles only their own section.
fn is_allowed(role: AdminRole, allowed: &[AdminRole]) -> bool {
    matches!(role, AdminRole::SuperAdmin | AdminRole::Admin) || allowed.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_and_admin_pass_every_allow_list() {
        let list = [AdminRole::ContentWriter];
        assert!(is_allowed(AdminRole::SuperAdmin, &list));
        assert!(is_allowed(AdminRole::Admin, &list));
    }

    #[test]
    fn scoped_roles_only_reach_their_own_section() {
        let products = [AdminRole::ProductManager];
        assert!(is_allowed(AdminRole::ProductManager, &products));
        assert!(!is_allowed(AdminRole::ContentWriter, &products));
        assert!(!is_allowed(AdminRole::EnquiryHandler, &products));
    }
}
