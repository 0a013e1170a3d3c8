use thiserror::Error;

/// Core error type shared across rhythmseed crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A uniqueness or reference constraint does not hold for the dataset.
    #[error("integrity violation in {table}.{field}: {detail}")]
    Integrity {
        table: &'static str,
        field: &'static str,
        detail: String,
    },
}

impl Error {
    pub fn integrity(table: &'static str, field: &'static str, detail: impl Into<String>) -> Self {
        Self::Integrity {
            table,
            field,
            detail: detail.into(),
        }
    }
}

/// Convenience alias for results returned by rhythmseed crates.
pub type Result<T> = std::result::Result<T, Error>;
