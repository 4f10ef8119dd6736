/// Domain-specific error types for the marketplace library.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("Document store operation failed: {0}")]
    Store(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Convenience type alias.
pub type MarketResult<T> = Result<T, MarketError>;
