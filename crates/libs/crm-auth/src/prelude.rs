//! Common types and utilities.

/// Auth error type.
pub use crate::error::Error;

/// Auth result type.
pub type Result<T> = core::result::Result<T, Error>;
