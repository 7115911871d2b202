use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("entry amounts must be non-negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("income entries have no paid status to change")]
    IncomePaidStatus,
    #[error("unknown entry: {0}")]
    UnknownEntry(Uuid),
    #[error("snapshot schema v{found} is newer than supported v{supported}")]
    UnsupportedSchema { found: u8, supported: u8 },
}
