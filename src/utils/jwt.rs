use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::jwt::JwtConfig;
use crate::utils::address::is_valid_address;
use crate::utils::errors::AppError;

/// Claims carried by a Backr bearer token. The identity provider binds a
/// wallet address to the session; the address is the only identity the API
/// acts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub address: String,
    pub exp: usize,
    pub iat: usize,
}

pub fn create_access_token(address: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        address: address.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Decodes and verifies a bearer token. Both stages are mandatory: the
/// three-part structure and HMAC signature are checked by `jsonwebtoken`
/// (along with `exp`), and the decoded claims must carry a syntactically
/// valid chain address.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))?;

    if !is_valid_address(&claims.address) {
        return Err(AppError::unauthorized(
            "Token does not carry a valid address".to_string(),
        ));
    }

    Ok(claims)
}
