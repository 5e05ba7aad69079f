use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims of the token the browser holds; the remote API tokens stay in the
/// session store and never leave the server.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Session id
    pub sid: Uuid,
    pub sub: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or_default()
}

pub fn generate_session_token(
    session_id: Uuid,
    username: &str,
    role: &str,
    secret: &str,
    ttl: u64,
) -> Result<String, Error> {
    let issued = now();
    let claims = SessionClaims {
        sid: session_id,
        sub: username.to_string(),
        role: role.to_string(),
        iat: issued,
        exp: issued + ttl as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_token(token: &str, secret: &str) -> Result<SessionClaims, String> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
