//! Request middleware and extractors.
//!
//! - [`auth`]: JWT authentication extractor
//! - [`role`]: role-based route guards and helpers
//!
//! # Authentication flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] validates the JWT and exposes the claims
//! 3. Role guards or the domain access gate decide whether the handler runs

pub mod auth;
pub mod role;
