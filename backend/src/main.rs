use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod database;
mod error;
mod filters;
mod handlers;
mod middleware;
mod models;
mod services;
mod utils;

use config::AppConfig;
use database::Database;
use error::AppError;
use marblecraft_shared::AdminRole;
use middleware::auth::AuthMiddleware;
use services::{AuthService, BlogService, EnquiryService, ProductListCache, ProductService};
use utils::jwt::JwtService;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    info!(
        "Starting MarbleCraft backend on {}:{}",
        config.host, config.port
    );

    let database = Database::new(&config.database_url).await?;
    database.migrate().await?;

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret)?);

    let product_service = ProductService::new(
        database.pool().clone(),
        ProductListCache::default(),
        config.upload_dir.clone(),
    );
    let enquiry_service = EnquiryService::new(database.pool().clone());
    let blog_service = BlogService::new(database.pool().clone(), config.upload_dir.clone());
    let auth_service = AuthService::new(database.pool().clone(), jwt_service.clone());

    let bind_addr = (config.host.clone(), config.port);
    let cors_origin = config.cors_origin.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(product_service.clone()))
            .app_data(web::Data::new(enquiry_service.clone()))
            .app_data(web::Data::new(blog_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .service(
                web::scope("/api")
                    .service(handlers::health::health_check)
                    .service(
                        web::scope("/auth")
                            .service(handlers::auth::login)
                            .service(
                                // Empty allow-list: only super_admin and
                                // admin may provision accounts
                                web::scope("/admins")
                                    .wrap(AuthMiddleware::new(jwt_service.clone()).allow(&[]))
                                    .service(handlers::auth::create_admin),
                            )
                            .service(
                                web::scope("")
                                    .wrap(AuthMiddleware::new(jwt_service.clone()))
                                    .service(handlers::auth::me),
                            ),
                    )
                    .service(
                        web::scope("/products")
                            .service(handlers::products::list_products)
                            .service(handlers::products::get_product)
                            .service(
                                web::scope("")
                                    .wrap(
                                        AuthMiddleware::new(jwt_service.clone())
                                            .allow(&[AdminRole::ProductManager]),
                                    )
                                    .service(handlers::products::create_product)
                                    .service(handlers::products::reorder_products)
                                    .service(handlers::products::update_product)
                                    .service(handlers::products::delete_product),
                            ),
                    )
                    .service(
                        web::scope("/enquiries")
                            .service(handlers::enquiries::submit_enquiry)
                            .service(
                                web::scope("")
                                    .wrap(
                                        AuthMiddleware::new(jwt_service.clone())
                                            .allow(&[AdminRole::EnquiryHandler]),
                                    )
                                    .service(handlers::enquiries::list_enquiries)
                                    .service(handlers::enquiries::update_enquiry_status)
                                    .service(handlers::enquiries::delete_enquiries),
                            ),
                    )
                    .service(
                        web::scope("/blogs")
                            .service(handlers::blogs::list_blogs)
                            .service(handlers::blogs::like_blog)
                            .service(handlers::blogs::add_comment)
                            .service(handlers::blogs::get_blog)
                            // The bare scope captures whatever the public
                            // routes above did not match, so it goes last
                            .service(
                                web::scope("")
                                    .wrap(
                                        AuthMiddleware::new(jwt_service.clone())
                                            .allow(&[AdminRole::ContentWriter]),
                                    )
                                    .service(handlers::blogs::create_blog)
                                    .service(handlers::blogs::update_blog)
                                    .service(handlers::blogs::delete_blog)
                                    .service(handlers::blogs::delete_comment),
                            ),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
