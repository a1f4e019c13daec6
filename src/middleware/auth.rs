use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::state::AppState;
use crate::utils::address::normalize_address;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// The verified identity of the caller for the current request.
///
/// The address is lowercased on construction; every comparison against a
/// resource owner goes through the canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub address: String,
}

/// Extractor that requires a verified bearer token.
///
/// Rejects with 401 when the header is missing, malformed, or the token does
/// not verify. Used by every mutating handler.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn address(&self) -> &str {
        &self.0.address
    }
}

/// Extractor that attempts identity extraction but fails soft.
///
/// Any failure (absent header, wrong scheme, malformed or unverifiable
/// token, claims without a valid address) yields `None` rather than an
/// error. Read endpoints use this to adjust visibility without ever turning
/// a bad credential into a rejection.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Principal>);

impl MaybeAuthUser {
    pub fn address(&self) -> Option<&str> {
        self.0.as_ref().map(|p| p.address.as_str())
    }
}

fn principal_from_parts(parts: &Parts, state: &AppState) -> Result<Principal, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid authorization header format".to_string())
    })?;

    let claims = verify_token(token, &state.jwt_config)?;

    Ok(Principal {
        address: normalize_address(&claims.address),
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        principal_from_parts(parts, state).map(AuthUser)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(principal_from_parts(parts, state).ok()))
    }
}
