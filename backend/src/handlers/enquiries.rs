use crate::error::AppError;
use crate::filters::enquiries::EnquiryFilterParams;
use crate::filters::{paginate, PageParams};
use crate::models::Enquiry;
use crate::services::EnquiryService;
use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use marblecraft_shared::{CreateEnquiryRequest, UpdateEnquiryStatusRequest};
use serde::Deserialize;
use serde_json::json;

#[post("")]
pub async fn submit_enquiry(
    enquiry_service: web::Data<EnquiryService>,
    req: web::Json<CreateEnquiryRequest>,
) -> Result<HttpResponse, AppError> {
    let enquiry = enquiry_service.submit(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(enquiry))
}

#[get("")]
pub async fn list_enquiries(
    enquiry_service: web::Data<EnquiryService>,
    params: web::Query<EnquiryFilterParams>,
    page: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let enquiries = enquiry_service.list_all().await?;
    let view = crate::filters::enquiries::run(&enquiries, &params, Utc::now());

    let responses: Vec<_> = view.iter().map(Enquiry::to_response).collect();
    Ok(HttpResponse::Ok().json(paginate(responses, *page)))
}

/// Single update when `id` is set, batch when `ids` is. An unknown status
/// value never reaches here; it fails deserialization as a 400.
#[put("")]
pub async fn update_enquiry_status(
    enquiry_service: web::Data<EnquiryService>,
    req: web::Json<UpdateEnquiryStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();

    if let Some(id) = req.id {
        enquiry_service.update_status(&id, req.status).await?;
        return Ok(HttpResponse::Ok().json(json!({ "message": "Enquiry updated" })));
    }

    let ids = req.ids.unwrap_or_default();
    if ids.is_empty() {
        return Err(AppError::Validation(
            "Either id or ids must be provided".to_string(),
        ));
    }

    let outcome = enquiry_service.update_status_batch(&ids, req.status).await?;
    Ok(HttpResponse::Ok().json(json!({
        "updated": outcome.succeeded(),
        "succeeded_ids": outcome.succeeded_ids,
        "not_found_ids": outcome.not_found_ids,
    })))
}

#[derive(Debug, Deserialize)]
pub struct DeleteEnquiryQuery {
    pub id: Option<String>,
    /// Comma-separated id list for batch deletion.
    pub ids: Option<String>,
}

#[delete("")]
pub async fn delete_enquiries(
    enquiry_service: web::Data<EnquiryService>,
    query: web::Query<DeleteEnquiryQuery>,
) -> Result<HttpResponse, AppError> {
    if let Some(id) = &query.id {
        enquiry_service.delete(id).await?;
        return Ok(HttpResponse::Ok().json(json!({ "message": "Enquiry deleted" })));
    }

    let ids: Vec<String> = query
        .ids
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        return Err(AppError::Validation(
            "Either id or ids must be provided".to_string(),
        ));
    }

    let outcome = enquiry_service.delete_batch(&ids).await?;
    Ok(HttpResponse::Ok().json(json!({
        "deleted": outcome.succeeded(),
        "succeeded_ids": outcome.succeeded_ids,
        "not_found_ids": outcome.not_found_ids,
    })))
}
