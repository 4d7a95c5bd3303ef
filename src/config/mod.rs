//! Application configuration, loaded from environment variables.
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT secret and token lifetimes

pub mod cors;
pub mod database;
pub mod jwt;
