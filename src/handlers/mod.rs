use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;

pub mod auth;
pub mod comments;
pub mod posts;
pub mod upload;

/// Path ids that do not parse map to 404, matching the store's behavior for
/// malformed identifiers.
pub(crate) fn parse_id(raw: &str, entity: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(entity))
}

/// The shared ownership check: identity is established, but only the owner
/// may mutate. Violations are 401 by API convention.
pub(crate) fn ensure_owner(owner_id: Uuid, caller: &AuthUser) -> Result<(), ApiError> {
    if owner_id == caller.id {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Required text fields must contain something other than whitespace.
pub(crate) fn require_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        Err(ApiError::validation("text", "Text is required"))
    } else {
        Ok(())
    }
}
