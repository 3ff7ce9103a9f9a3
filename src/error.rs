use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Please enter valid numbers for at least two fields")]
    InsufficientInput,

    #[error("Search query is required")]
    EmptyQuery,

    #[error("Formula not found: {0}")]
    FormulaNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FeedError {
    /// Errors that are shown to the user as a prompt rather than aborting.
    pub fn is_user_prompt(&self) -> bool {
        matches!(self, FeedError::InsufficientInput | FeedError::EmptyQuery)
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
