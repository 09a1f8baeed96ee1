//! Input validation functions
//!
//! Shared between client and server: clients can pre-validate before
//! sending, the relay enforces them at the operation boundary.

mod required;

pub use required::{RequiredFieldError, validate_required};
