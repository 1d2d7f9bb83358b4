//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors)
//! - `lottery` - Draw snapshot, history record, and the archival window

pub mod foundation;
pub mod lottery;
