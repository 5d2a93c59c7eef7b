use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Display name denormalized at creation; not kept in sync with the owner.
    pub username: Option<String>,
    pub text: String,
    pub image: Option<String>,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}
