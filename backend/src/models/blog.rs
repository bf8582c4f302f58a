use crate::error::AppError;
use chrono::{DateTime, Utc};
use marblecraft_shared::{BlogResponse, CommentResponse};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub author: String,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

const BLOG_COLUMNS: &str =
    "id, title, slug, excerpt, content, cover_image, author, likes, created_at, updated_at";

const COMMENT_COLUMNS: &str = "id, blog_id, parent_id, name, email, content, created_at";

impl Blog {
    pub async fn create(
        pool: &PgPool,
        title: String,
        slug: String,
        excerpt: String,
        content: String,
        cover_image: String,
        author: String,
    ) -> Result<Self, AppError> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            "INSERT INTO blogs (title, slug, excerpt, content, cover_image, author) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(title)
        .bind(slug)
        .bind(excerpt)
        .bind(content)
        .bind(cover_image)
        .bind(author)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("A blog with this slug already exists".to_string())
            }
            other => AppError::Database(other),
        })?;

        Ok(blog)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let blogs = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(blogs)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let blog =
            sqlx::query_as::<_, Blog>(&format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(blog)
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, AppError> {
        let blog =
            sqlx::query_as::<_, Blog>(&format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE slug = $1"))
                .bind(slug)
                .fetch_optional(pool)
                .await?;

        Ok(blog)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        title: String,
        slug: String,
        excerpt: String,
        content: String,
        cover_image: String,
        author: String,
    ) -> Result<Option<Self>, AppError> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            "UPDATE blogs SET title = $2, slug = $3, excerpt = $4, content = $5, \
             cover_image = $6, author = $7, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(slug)
        .bind(excerpt)
        .bind(content)
        .bind(cover_image)
        .bind(author)
        .fetch_optional(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("A blog with this slug already exists".to_string())
            }
            other => AppError::Database(other),
        })?;

        Ok(blog)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn increment_likes(pool: &PgPool, id: Uuid) -> Result<Option<i32>, AppError> {
        let likes = sqlx::query_scalar::<_, i32>(
            "UPDATE blogs SET likes = likes + 1 WHERE id = $1 RETURNING likes",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(likes)
    }

    pub fn to_response(&self, comments: Vec<CommentResponse>) -> BlogResponse {
        BlogResponse {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            cover_image: self.cover_image.clone(),
            author: self.author.clone(),
            likes: self.likes,
            comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Comment {
    pub async fn create(
        pool: &PgPool,
        blog_id: Uuid,
        parent_id: Option<Uuid>,
        name: String,
        email: String,
        content: String,
    ) -> Result<Self, AppError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (blog_id, parent_id, name, email, content) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(blog_id)
        .bind(parent_id)
        .bind(name)
        .bind(email)
        .bind(content)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    pub async fn find_by_blog(pool: &PgPool, blog_id: Uuid) -> Result<Vec<Self>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE blog_id = $1 ORDER BY created_at ASC"
        ))
        .bind(blog_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }

    pub async fn delete_many(pool: &PgPool, ids: &[Uuid]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM comments WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub fn to_response(&self) -> CommentResponse {
        CommentResponse {
            id: self.id,
            blog_id: self.blog_id,
            parent_id: self.parent_id,
            name: self.name.clone(),
            email: self.email.clone(),
            content: self.content.clone(),
            created_at: self.created_at,
        }
    }
}
