use sqlx::PgPool;
use uuid::Uuid;

use super::models::Post;
use super::StoreError;

pub struct NewPost {
    pub owner_id: Uuid,
    pub username: Option<String>,
    pub text: String,
    pub image: Option<String>,
}

pub struct PostStore {
    pool: PgPool,
}

impl PostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewPost) -> Result<Post, StoreError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, owner_id, username, text, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.owner_id)
        .bind(&new.username)
        .bind(&new.text)
        .bind(&new.image)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    /// All posts, newest first.
    pub async fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        let posts = sqlx::query_as::<_, Post>("SELECT * FROM posts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    pub async fn update_text(&self, id: Uuid, text: &str) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>("UPDATE posts SET text = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(text)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM posts").execute(&self.pool).await?;
        Ok(())
    }
}
