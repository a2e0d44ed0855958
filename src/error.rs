//! Error types for airledger

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("the asset {0} already exists")]
    AlreadyExists(String),

    #[error("the asset {0} does not exist")]
    NotFound(String),

    #[error("invalid MPIN for asset {0}")]
    InvalidMpin(String),

    #[error("account {0} is not active")]
    NotActive(String),

    #[error("insufficient balance. Current balance: {current:.2}, Requested: {requested:.2}")]
    InsufficientBalance { current: f64, requested: f64 },

    #[error("invalid transaction type: {0}")]
    InvalidTransType(String),

    #[error("failed to decode record {key}: {reason}")]
    Deserialize { key: String, reason: String },

    #[error("world state error: {0}")]
    Store(String),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;
