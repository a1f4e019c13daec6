pub mod access;
pub mod address;
pub mod errors;
pub mod jwt;
