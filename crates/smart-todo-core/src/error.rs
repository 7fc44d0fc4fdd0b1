use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid priority '{0}': expected low, medium or high")]
    InvalidPriority(String),

    #[error("invalid validation policy '{0}': expected lenient or strict")]
    InvalidPolicy(String),

    #[error("invalid month {0}: expected 1-12")]
    InvalidMonth(u32),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
