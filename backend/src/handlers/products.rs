use crate::error::AppError;
use crate::filters::{self, paginate, PageParams};
use crate::filters::products::{enquiry_counts, ProductFilterParams};
use crate::models::Product;
use crate::services::{EnquiryService, ProductService};
use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use chrono::Utc;
use marblecraft_shared::{CreateProductRequest, ProductSort, ReorderProductRequest};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

/// `view=catalog` switches the listing to the public storefront shape:
/// search over name and description only, in-stock products first.
#[derive(Debug, Deserialize)]
pub struct ViewParams {
    pub view: Option<String>,
}

#[get("")]
pub async fn list_products(
    product_service: web::Data<ProductService>,
    enquiry_service: web::Data<EnquiryService>,
    params: web::Query<ProductFilterParams>,
    page: web::Query<PageParams>,
    view: web::Query<ViewParams>,
) -> Result<HttpResponse, AppError> {
    let products = product_service.list_all().await?;

    // The enquired sort joins against the enquiry collection; skip the
    // fetch for every other sort mode.
    let counts = if params.sort == ProductSort::Enquired {
        enquiry_counts(&enquiry_service.list_all().await?)
    } else {
        HashMap::new()
    };

    let view = match view.view.as_deref() {
        Some("catalog") => filters::products::catalog(
            &products,
            params.search.as_deref(),
            params.sort,
            &counts,
        ),
        _ => filters::products::run(&products, &params, &counts, Utc::now()),
    };

    let responses: Vec<_> = view.iter().map(Product::to_response).collect();
    Ok(HttpResponse::Ok().json(paginate(responses, *page)))
}

#[get("/{id}")]
pub async fn get_product(
    product_service: web::Data<ProductService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let product = product_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[post("")]
pub async fn create_product(
    product_service: web::Data<ProductService>,
    req: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = product_service.create(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

#[put("/{id}")]
pub async fn update_product(
    product_service: web::Data<ProductService>,
    path: web::Path<Uuid>,
    req: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = product_service
        .update(path.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete("/{id}")]
pub async fn delete_product(
    product_service: web::Data<ProductService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    product_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Product deleted" })))
}

#[patch("")]
pub async fn reorder_products(
    product_service: web::Data<ProductService>,
    req: web::Json<ReorderProductRequest>,
) -> Result<HttpResponse, AppError> {
    product_service
        .reorder(req.product_id, req.new_index)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Product order updated" })))
}
