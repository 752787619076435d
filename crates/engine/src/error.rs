//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] returned when an amount is empty, not a number or zero.
//! - [`InvalidDate`] returned when a new entry carries a date that can't be parsed.
//! - [`QuotaExceeded`] returned by a [`Storage`] that refuses a write.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`QuotaExceeded`]: EngineError::QuotaExceeded
//!  [`Storage`]: super::storage::Storage
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Storage quota exceeded: {needed} bytes requested, {quota} available")]
    QuotaExceeded { needed: usize, quota: usize },
    #[error("Export failed: {0}")]
    Export(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (
                Self::QuotaExceeded { needed, quota },
                Self::QuotaExceeded {
                    needed: other_needed,
                    quota: other_quota,
                },
            ) => needed == other_needed && quota == other_quota,
            (Self::Export(a), Self::Export(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
