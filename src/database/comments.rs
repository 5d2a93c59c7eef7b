use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Comment, CommentWithAuthor};
use super::StoreError;

pub struct NewComment {
    pub post_id: Uuid,
    pub owner_id: Uuid,
    pub text: String,
}

pub struct CommentStore {
    pool: PgPool,
}

impl CommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewComment) -> Result<Comment, StoreError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, post_id, owner_id, text)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.post_id)
        .bind(new.owner_id)
        .bind(&new.text)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    /// Comments for a post, oldest first, with the author's username resolved.
    pub async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, StoreError> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.post_id, c.owner_id, u.username, c.text, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.owner_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    pub async fn update_text(&self, id: Uuid, text: &str) -> Result<Comment, StoreError> {
        sqlx::query_as::<_, Comment>("UPDATE comments SET text = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(text)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM comments").execute(&self.pool).await?;
        Ok(())
    }
}
