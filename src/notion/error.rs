use thiserror::Error;

/// Failures talking to the external document API
#[derive(Debug, Error)]
pub enum NotionError {
    #[error("Notion token not configured")]
    NotConfigured,

    #[error("Invalid Notion API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Notion API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Notion API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected Notion API payload: {0}")]
    Decode(String),
}

impl NotionError {
    /// Upstream HTTP status, when the API answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            NotionError::Upstream { status, .. } => Some(*status),
            NotionError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
