use crate::error::AppError;
use crate::services::BlogService;
use actix_web::{delete, get, post, put, web, HttpResponse};
use marblecraft_shared::{CreateBlogRequest, CreateCommentRequest};
use serde_json::json;
use uuid::Uuid;

#[get("")]
pub async fn list_blogs(blog_service: web::Data<BlogService>) -> Result<HttpResponse, AppError> {
    let blogs = blog_service.list_all().await?;
    Ok(HttpResponse::Ok().json(blogs))
}

#[get("/{slug}")]
pub async fn get_blog(
    blog_service: web::Data<BlogService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let blog = blog_service.get_by_slug(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(blog))
}

#[post("")]
pub async fn create_blog(
    blog_service: web::Data<BlogService>,
    req: web::Json<CreateBlogRequest>,
) -> Result<HttpResponse, AppError> {
    let blog = blog_service.create(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(blog))
}

#[put("/{id}")]
pub async fn update_blog(
    blog_service: web::Data<BlogService>,
    path: web::Path<Uuid>,
    req: web::Json<CreateBlogRequest>,
) -> Result<HttpResponse, AppError> {
    let blog = blog_service
        .update(path.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(blog))
}

#[delete("/{id}")]
pub async fn delete_blog(
    blog_service: web::Data<BlogService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    blog_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Blog deleted" })))
}

#[post("/{id}/like")]
pub async fn like_blog(
    blog_service: web::Data<BlogService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let likes = blog_service.like(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "likes": likes })))
}

#[post("/{id}/comments")]
pub async fn add_comment(
    blog_service: web::Data<BlogService>,
    path: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let comment = blog_service
        .add_comment(path.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

#[delete("/{id}/comments/{comment_id}")]
pub async fn delete_comment(
    blog_service: web::Data<BlogService>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (blog_id, comment_id) = path.into_inner();
    let removed = blog_service.delete_comment(blog_id, comment_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": removed })))
}
