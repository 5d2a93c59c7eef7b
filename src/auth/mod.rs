use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod password;

/// Claims embedded in the token issued at login/registration. `sub` is the
/// user id; it is the only identity the API ever trusts.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, expiry_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum TokenError {
    Invalid,
    Generation(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Invalid => write!(f, "token not valid"),
            TokenError::Generation(msg) => write!(f, "token generation error: {}", msg),
        }
    }
}

impl std::error::Error for TokenError {}

pub fn issue_token(user_id: Uuid, secret: &str, expiry_hours: i64) -> Result<String, TokenError> {
    let claims = Claims::new(user_id, expiry_hours);
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Pure function of the token and the shared secret; no session store.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, SECRET, 24).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), SECRET, 24).unwrap();
        assert!(matches!(verify_token(&token, "other-secret"), Err(TokenError::Invalid)));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Issued one hour in the past, well beyond the default leeway
        let token = issue_token(Uuid::new_v4(), SECRET, -1).unwrap();
        assert!(matches!(verify_token(&token, SECRET), Err(TokenError::Invalid)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(verify_token("not.a.token", SECRET), Err(TokenError::Invalid)));
    }
}
