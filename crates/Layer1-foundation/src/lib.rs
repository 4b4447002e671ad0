//! # drover-foundation
//!
//! Foundation layer for Drover:
//! - Error: central error type shared by every crate in the workspace

pub mod error;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};
