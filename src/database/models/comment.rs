use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub owner_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's username, used by the listing routes.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub post_id: Uuid,
    pub owner_id: Uuid,
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
