//! Error types for the load pipeline

/// Reading the persisted puzzle library failed
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("stored puzzles are not valid JSON: {0}")]
    Unparseable(#[from] serde_json::Error),
}

/// The load pipeline could not produce a puzzle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("no puzzle found for {today} or any earlier date")]
    NoPuzzleFound { today: String },
}
