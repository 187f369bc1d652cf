use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Cannot check out an empty cart")]
    EmptyCart,
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StorefrontError {
    /// Whether a checkout submission that failed with this error may be retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
