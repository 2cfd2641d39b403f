//! Store error types.

/// Store operation errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Database connection pool error.
    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    /// Diesel ORM operation error.
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),

    /// Failed to apply the embedded migrations.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A record with the same key already exists.
    #[error("{0}")]
    Duplicate(String),

    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}
