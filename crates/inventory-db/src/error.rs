//! Database error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}
