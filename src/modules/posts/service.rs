use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::address::normalize_address;
use crate::utils::errors::AppError;

use super::model::{Comment, CreateCommentDto, CreatePostDto, Post, UpdatePostDto};

pub struct PostService;

impl PostService {
    #[instrument(skip(db))]
    pub async fn get_by_creator(db: &PgPool, creator_address: &str) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, creator_address, title, content, image, video_url,
                   min_tier, likes, is_public, created_at
            FROM posts
            WHERE LOWER(creator_address) = LOWER($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(creator_address)
        .fetch_all(db)
        .await?;

        Ok(posts)
    }

    /// Global feed across all creators, newest first.
    #[instrument(skip(db))]
    pub async fn get_feed(db: &PgPool) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, creator_address, title, content, image, video_url,
                   min_tier, likes, is_public, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;

        Ok(posts)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, creator_address, title, content, image, video_url,
                   min_tier, likes, is_public, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        post.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Post not found")))
    }

    #[instrument(skip(db))]
    pub async fn create_post(db: &PgPool, dto: CreatePostDto) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (creator_address, title, content, image, video_url, min_tier, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, creator_address, title, content, image, video_url,
                      min_tier, likes, is_public, created_at
            "#,
        )
        .bind(normalize_address(&dto.creator_address))
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&dto.image)
        .bind(&dto.video_url)
        .bind(dto.min_tier.unwrap_or(0))
        .bind(dto.is_public.unwrap_or(false))
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Creator does not exist"));
            }
            AppError::from(e)
        })?;

        Ok(post)
    }

    /// Partial update; untouched fields keep their stored values.
    #[instrument(skip(db))]
    pub async fn update_post(db: &PgPool, id: Uuid, dto: UpdatePostDto) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                image = COALESCE($4, image),
                video_url = COALESCE($5, video_url),
                min_tier = COALESCE($6, min_tier),
                is_public = COALESCE($7, is_public)
            WHERE id = $1
            RETURNING id, creator_address, title, content, image, video_url,
                      min_tier, likes, is_public, created_at
            "#,
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&dto.image)
        .bind(&dto.video_url)
        .bind(dto.min_tier)
        .bind(dto.is_public)
        .fetch_one(db)
        .await?;

        Ok(post)
    }

    #[instrument(skip(db))]
    pub async fn delete_post(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Atomic increment; no read-modify-write.
    #[instrument(skip(db))]
    pub async fn like_post(db: &PgPool, id: Uuid) -> Result<i32, AppError> {
        let likes = sqlx::query_scalar::<_, i32>(
            "UPDATE posts SET likes = likes + 1 WHERE id = $1 RETURNING likes",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        likes.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Post not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_comments(db: &PgPool, post_id: Uuid) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, user_address, content, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(db)
        .await?;

        Ok(comments)
    }

    #[instrument(skip(db))]
    pub async fn create_comment(
        db: &PgPool,
        post_id: Uuid,
        dto: CreateCommentDto,
    ) -> Result<Comment, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, user_address, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_address, content, created_at
            "#,
        )
        .bind(post_id)
        .bind(normalize_address(&dto.user_address))
        .bind(&dto.content)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::not_found(anyhow::anyhow!("Post not found"));
            }
            AppError::from(e)
        })?;

        Ok(comment)
    }
}
