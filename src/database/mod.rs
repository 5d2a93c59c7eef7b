use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

pub mod comments;
pub mod models;
pub mod posts;
pub mod users;

pub use comments::CommentStore;
pub use posts::PostStore;
pub use users::UserStore;

/// Errors from the store layer, matched exhaustively at the router boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("duplicate value for {0}")]
    Duplicate(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Translate a unique-index violation into a tagged duplicate error so the
/// router can report which field collided.
pub(crate) fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some("users_username_key") => StoreError::Duplicate("username"),
                Some("users_email_key") => StoreError::Duplicate("email"),
                _ => StoreError::Duplicate("value"),
            };
        }
    }
    StoreError::Sqlx(err)
}

/// Handle to the backing store. Cloning is cheap; the pool is shared.
#[derive(Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().connect(database_url).await?;
        info!("connected to database");
        Ok(Self { pool })
    }

    /// Build a handle without establishing a connection. Used by tests that
    /// never touch the store.
    pub fn connect_lazy(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn users(&self) -> UserStore {
        UserStore::new(self.pool.clone())
    }

    pub fn posts(&self) -> PostStore {
        PostStore::new(self.pool.clone())
    }

    pub fn comments(&self) -> CommentStore {
        CommentStore::new(self.pool.clone())
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create tables and indexes if they do not exist yet.
    ///
    /// `comments.post_id` carries no foreign key: deleting a post does not
    /// remove its comments, and a constraint would make the delete fail.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL,
                email TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                avatar TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                CONSTRAINT users_username_key UNIQUE (username),
                CONSTRAINT users_email_key UNIQUE (email)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id UUID PRIMARY KEY,
                owner_id UUID NOT NULL REFERENCES users(id),
                username TEXT,
                text TEXT NOT NULL,
                image TEXT,
                likes UUID[] NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS comments (
                id UUID PRIMARY KEY,
                post_id UUID NOT NULL,
                owner_id UUID NOT NULL REFERENCES users(id),
                text TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS comments_post_id_idx ON comments (post_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS posts_created_at_idx ON posts (created_at DESC)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
