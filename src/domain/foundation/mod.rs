//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary shared by every layer of the crate.

mod errors;

pub use errors::{DomainError, ErrorCode, ValidationError};
