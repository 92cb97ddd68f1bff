use std::path::PathBuf;

/// Failures at the library seams.
///
/// `Transport`, `Status` and `MalformedPage` are local: the pipeline logs them
/// and moves on to the next page. `Output` and `Serialize` are fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed page {url}: {detail}")]
    MalformedPage { url: String, detail: String },

    #[error("failed to write catalog {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ScrapeError {
    /// True for failures that only cost one page.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScrapeError::Transport { .. } | ScrapeError::Status { .. }
        )
    }
}
