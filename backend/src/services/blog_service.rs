use crate::error::AppError;
use crate::models::{Blog, Comment};
use crate::utils::images::{blog_image_set, orphaned_images, remove_image_files};
use crate::utils::slug::slugify;
use marblecraft_shared::{BlogResponse, CreateBlogRequest, CreateCommentRequest, CommentResponse};
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Blog CMS: post CRUD with derived slugs, likes, threaded comments with
/// cascade deletion, and cleanup of image files referenced by post content.
#[derive(Clone)]
pub struct BlogService {
    db_pool: PgPool,
    upload_dir: String,
}

impl BlogService {
    pub fn new(db_pool: PgPool, upload_dir: String) -> Self {
        Self {
            db_pool,
            upload_dir,
        }
    }

    pub async fn create(&self, request: CreateBlogRequest) -> Result<BlogResponse, AppError> {
        request.validate()?;

        let slug = slugify(&request.title);
        let blog = Blog::create(
            &self.db_pool,
            request.title,
            slug,
            request.excerpt,
            request.content,
            request.cover_image,
            request.author,
        )
        .await?;

        info!("Created blog {} '{}'", blog.id, blog.slug);
        Ok(blog.to_response(Vec::new()))
    }

    pub async fn list_all(&self) -> Result<Vec<BlogResponse>, AppError> {
        let blogs = Blog::find_all(&self.db_pool).await?;

        let mut responses = Vec::with_capacity(blogs.len());
        for blog in blogs {
            let comments = self.comments_for(blog.id).await?;
            responses.push(blog.to_response(comments));
        }
        Ok(responses)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<BlogResponse, AppError> {
        let blog = Blog::find_by_slug(&self.db_pool, slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

        let comments = self.comments_for(blog.id).await?;
        Ok(blog.to_response(comments))
    }

    /// Update a post. The slug is re-derived from the (possibly unchanged)
    /// title via the same transform as on create; image files referenced by
    /// the old content or cover but not the new are removed from storage.
    pub async fn update(&self, id: Uuid, request: CreateBlogRequest) -> Result<BlogResponse, AppError> {
        request.validate()?;

        let existing = Blog::find_by_id(&self.db_pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

        let old_images = blog_image_set(&existing.cover_image, &existing.content);
        let new_images = blog_image_set(&request.cover_image, &request.content);

        let slug = slugify(&request.title);
        let updated = Blog::update(
            &self.db_pool,
            id,
            request.title,
            slug,
            request.excerpt,
            request.content,
            request.cover_image,
            request.author,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

        let orphans = orphaned_images(&old_images, &new_images);
        remove_image_files(&self.upload_dir, &orphans);

        info!("Updated blog {} ({} orphaned images removed)", id, orphans.len());

        let comments = self.comments_for(id).await?;
        Ok(updated.to_response(comments))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let blog = Blog::find_by_id(&self.db_pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

        let images = blog_image_set(&blog.cover_image, &blog.content);
        Blog::delete(&self.db_pool, id).await?;
        remove_image_files(&self.upload_dir, &images);

        info!("Deleted blog {} '{}'", id, blog.slug);
        Ok(())
    }

    pub async fn like(&self, id: Uuid) -> Result<i32, AppError> {
        Blog::increment_likes(&self.db_pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))
    }

    pub async fn add_comment(
        &self,
        blog_id: Uuid,
        request: CreateCommentRequest,
    ) -> Result<CommentResponse, AppError> {
        request.validate()?;

        Blog::find_by_id(&self.db_pool, blog_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

        if let Some(parent_id) = request.parent_id {
            let comments = Comment::find_by_blog(&self.db_pool, blog_id).await?;
            if !comments.iter().any(|c| c.id == parent_id) {
                return Err(AppError::NotFound("Parent comment not found".to_string()));
            }
        }

        let comment = Comment::create(
            &self.db_pool,
            blog_id,
            request.parent_id,
            request.name,
            request.email,
            request.content,
        )
        .await?;

        Ok(comment.to_response())
    }

    /// Delete a comment and every reply beneath it. The descendant set is
    /// the transitive closure over parent_id links.
    pub async fn delete_comment(&self, blog_id: Uuid, comment_id: Uuid) -> Result<u64, AppError> {
        let comments = Comment::find_by_blog(&self.db_pool, blog_id).await?;
        if !comments.iter().any(|c| c.id == comment_id) {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }

        let doomed = collect_thread(&comments, comment_id);
        let removed = Comment::delete_many(&self.db_pool, &doomed).await?;

        info!(
            "Deleted comment {} and {} descendants from blog {}",
            comment_id,
            removed.saturating_sub(1),
            blog_id
        );
        Ok(removed)
    }

    async fn comments_for(&self, blog_id: Uuid) -> Result<Vec<CommentResponse>, AppError> {
        let comments = Comment::find_by_blog(&self.db_pool, blog_id).await?;
        Ok(comments.iter().map(Comment::to_response).collect())
    }
}

/// The comment plus all of its descendants, found by repeatedly walking
/// parent_id links until the frontier stops growing.
fn collect_thread(comments: &[Comment], root: Uuid) -> Vec<Uuid> {
    let mut doomed: HashSet<Uuid> = HashSet::from([root]);
    loop {
        let before = doomed.len();
        for comment in comments {
            if let Some(parent_id) = comment.parent_id {
                if doomed.contains(&parent_id) {
                    doomed.insert(comment.id);
                }
            }
        }
        if doomed.len() == before {
            break;
        }
    }

    // Deterministic order for the delete statement
    let mut ids: Vec<Uuid> = comments
        .iter()
        .map(|c| c.id)
        .filter(|id| doomed.contains(id))
        .collect();
    if !ids.contains(&root) {
        ids.push(root);
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
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

    fn blog_request(title: &str) -> CreateBlogRequest {
        CreateBlogRequest {
            title: title.to_string(),
            excerpt: "Care notes".to_string(),
            content: "<p>Seal twice a year.</p>".to_string(),
            cover_image: "/uploads/cover.jpg".to_string(),
            author: "Priya".to_string(),
        }
    }

    // Distinct titles can still normalize to the same slug; an update that
    // lands on another post's slug must surface as a conflict, exactly like
    // a colliding create.
    #[tokio::test]
    async fn renaming_onto_an_existing_slug_is_a_conflict() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let service = BlogService::new(pool, "uploads".to_string());

        let tag = Uuid::new_v4().simple().to_string();
        let first = service
            .create(blog_request(&format!("Caring For Statuario {}", tag)))
            .await
            .expect("create failed");
        let second = service
            .create(blog_request(&format!("Sealing Granite {}", tag)))
            .await
            .expect("create failed");

        let err = service
            .update(
                second.id,
                blog_request(&format!("Caring, For Statuario! {}", tag)),
            )
            .await
            .expect_err("colliding rename should fail");
        assert!(matches!(err, AppError::Conflict(_)));

        service.delete(first.id).await.expect("cleanup failed");
        service.delete(second.id).await.expect("cleanup failed");
    }

    fn comment(id: Uuid, parent_id: Option<Uuid>) -> Comment {
        Comment {
            id,
            blog_id: Uuid::new_v4(),
            parent_id,
            name: "Reader".to_string(),
            email: "reader@example.com".to_string(),
            content: "Nice finish on the Statuario".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn leaf_comment_dooms_only_itself() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let comments = vec![comment(a, None), comment(b, None)];
        assert_eq!(collect_thread(&comments, a), vec![a]);
    }

    #[test]
    fn cascade_includes_transitive_replies() {
        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();
        let unrelated = Uuid::new_v4();

        let comments = vec![
            comment(root, None),
            comment(child, Some(root)),
            comment(grandchild, Some(child)),
            comment(unrelated, None),
        ];

        let doomed = collect_thread(&comments, root);
        assert_eq!(doomed.len(), 3);
        assert!(doomed.contains(&root));
        assert!(doomed.contains(&child));
        assert!(doomed.contains(&grandchild));
        assert!(!doomed.contains(&unrelated));
    }

    #[test]
    fn closure_handles_out_of_order_listings() {
        // Children listed before their parents still resolve fully
        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();

        let comments = vec![
            comment(grandchild, Some(child)),
            comment(child, Some(root)),
            comment(root, None),
        ];

        assert_eq!(collect_thread(&comments, root).len(), 3);
    }

    #[test]
    fn deleting_a_mid_thread_reply_spares_the_parent() {
        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();

        let comments = vec![
            comment(root, None),
            comment(child, Some(root)),
            comment(grandchild, Some(child)),
        ];

        let doomed = collect_thread(&comments, child);
        assert_eq!(doomed.len(), 2);
        assert!(!doomed.contains(&root));
    }
}
