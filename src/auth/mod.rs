use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried in the `x-auth-token` header. The embedded identity
/// is just the user id; every request is independently authenticated.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            user_id,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify an HS256 token against the shared secret. Default validation
/// rejects expired tokens.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trips_signed_claims() {
        let user_id = Uuid::new_v4();
        let token = generate_jwt(&Claims::new(user_id, 1), SECRET).expect("token");

        let claims = decode_jwt(&token, SECRET).expect("claims");
        assert_eq!(claims.user_id, user_id);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = generate_jwt(&Claims::new(Uuid::new_v4(), 1), SECRET).expect("token");
        assert!(decode_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now();
        let claims = Claims {
            user_id: Uuid::new_v4(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = generate_jwt(&claims, SECRET).expect("token");
        assert!(decode_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn refuses_empty_secret() {
        assert!(generate_jwt(&Claims::new(Uuid::new_v4(), 1), "").is_err());
    }
}
