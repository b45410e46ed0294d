use thiserror::Error;

/// A structurally invalid [`RaioXInput`](crate::core::RaioXInput). Numeric edge
/// cases such as zero income are not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("INPUT_MISSING_FIELD: `{0}` is required")]
    MissingField(String),
    #[error("INPUT_MALFORMED: {0}")]
    Malformed(String),
    #[error("INPUT_OUT_OF_RANGE: `{field}` {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

impl From<serde_json::Error> for ValidationError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("STORE_UNAVAILABLE: {0}")]
    Unavailable(String),
    #[error("STORE_IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("STORE_CORRUPT: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The snapshot holds a number JSON cannot represent; nothing was written.
    #[error("STORE_REJECTED: `{0}` is not a finite number")]
    NonFinite(&'static str),
}

pub type StoreResult<T> = Result<T, StoreError>;
