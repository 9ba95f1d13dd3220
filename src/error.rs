// src/error.rs
// Error types for configuration and inventory persistence

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "no usable discount codes configured: set DISCOUNT_CODES (or DISCOUNT_CODE) to at least one value that is not listed in DEPRECATED_CODES"
    )]
    NoUsableCodes,
}

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("failed to persist inventory snapshot: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("failed to encode inventory snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type InventoryResult<T> = Result<T, InventoryError>;
