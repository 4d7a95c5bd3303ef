//! Pure domain rules, independent of HTTP and the database.
//!
//! Everything with a real invariant lives here so it can be unit-tested
//! without a running Postgres:
//!
//! - [`enrollment`]: the enrollment request state machine and its
//!   preconditions (academic year format, capacity, pending quota).
//! - [`grading`]: score validation and the final-grade formula.
//! - [`access`]: the role/scope authorization gate consulted by every
//!   write path.
//!
//! The services in `crate::modules` evaluate these rules inside database
//! transactions; the rules themselves never touch I/O.

pub mod access;
pub mod enrollment;
pub mod grading;
