use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Post;

/// Persistence contract for posts, independent of the storage engine.
///
/// `update` and `delete` report a missing id through their return value
/// (`None` / `false`) rather than an error; the handler decides what that means.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, title: &str) -> Result<Post, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DatabaseError>;

    async fn update(&self, id: i64, title: &str) -> Result<Option<Post>, DatabaseError>;

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;

    /// All posts ordered by ascending id
    async fn list(&self) -> Result<Vec<Post>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, title: &str) -> Result<Post, DatabaseError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title)
            VALUES ($1)
            RETURNING id, title, created_at, updated_at
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DatabaseError> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, title, created_at, updated_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update(&self, id: i64, title: &str) -> Result<Option<Post>, DatabaseError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $2, updated_at = GREATEST(NOW(), updated_at)
            WHERE id = $1
            RETURNING id, title, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Post>, DatabaseError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, created_at, updated_at FROM posts ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
