//! Configuration modules for the Backr API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables once at startup. The resulting values are immutable
//! and shared through [`crate::state::AppState`]; nothing reconfigures at
//! runtime.
//!
//! # Modules
//!
//! - [`chain`]: Payment-chain parameters (RPC endpoint, stablecoin)
//! - [`cors`]: CORS allowed origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: Bearer-token verification configuration
//! - [`rate_limit`]: API rate limiting configuration

pub mod chain;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
