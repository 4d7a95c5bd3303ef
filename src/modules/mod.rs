//! Feature modules.
//!
//! Each module follows the same structure: `controller.rs` (HTTP handlers),
//! `service.rs` (business logic), `model.rs` (entities and DTOs),
//! `router.rs` (axum routes).

pub mod auth;
pub mod course_modules;
pub mod departments;
pub mod enrollments;
pub mod grades;
pub mod programs;
pub mod users;
