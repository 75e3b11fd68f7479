//! HS256 access tokens
//!
//! Tokens are signed with the shared `JWT_SECRET`, carry the issuer
//! `tubely-access` and the user id as subject.

use crate::auth::models::JwtClaims;
use axum::http::HeaderMap;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use tubely_core::AppError;
use uuid::Uuid;

/// Issuer of every access token
pub const TOKEN_ISSUER: &str = "tubely-access";

/// Mint an access token for `user_id`, valid for `expires_in`
pub fn make_jwt(user_id: Uuid, secret: &str, expires_in: Duration) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = JwtClaims {
        iss: TOKEN_ISSUER.to_string(),
        sub: user_id,
        iat: now,
        exp: now + expires_in.as_secs() as i64,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Verify signature, expiry and issuer, and return the user id from the subject
pub fn validate_jwt(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation.leeway = 0;

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AppError::Unauthorized(format!("Couldn't validate JWT: {}", e)))?;

    Ok(data.claims.sub)
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn get_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::Unauthorized(
                "Invalid authorization header format. Expected: Bearer <token>".to_string(),
            )
        })?;

    Ok(token)
}
