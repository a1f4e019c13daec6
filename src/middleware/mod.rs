//! Middleware modules for request processing.
//!
//! # Authentication Flow
//!
//! 1. Client sends a request with an `Authorization: Bearer <token>` header
//! 2. [`auth::AuthUser`] verifies the token and extracts the wallet address
//! 3. Handlers compare the principal's address against the resource owner
//! 4. The mutation runs only after both checks pass
//!
//! Read endpoints that merely *adjust* their output for the caller use
//! [`auth::MaybeAuthUser`] instead, which never rejects.

pub mod auth;
