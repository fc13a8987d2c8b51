use thiserror::Error;

/// All errors produced by Feedlog.
#[derive(Error, Debug)]
pub enum FeedlogError {
    /// A required column name was not present in the header row.
    #[error("Required column \"{0}\" not found in header")]
    MissingColumn(String),

    /// The log did not contain a header row plus at least one data row.
    #[error("Log must contain a header row and at least one data row (found {0})")]
    TooFewRows(usize),

    /// Parsing succeeded but no qualifying bottle-feed events were found.
    #[error("No usable bottle-feed data found in log")]
    NoUsableData,

    /// An uploaded file failed the structural header check.
    #[error("Upload rejected, header is missing required fields: {0}")]
    InvalidUploadHeader(String),

    /// The named blob does not exist in the store.
    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    /// A blob exists but could not be read.
    #[error("Failed to read blob {name}: {source}")]
    BlobRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a blob name.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FeedlogError {
    /// `true` for errors caused by the input data rather than the system,
    /// i.e. those a serving layer would surface as a 400-equivalent.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            FeedlogError::MissingColumn(_)
                | FeedlogError::TooFewRows(_)
                | FeedlogError::NoUsableData
                | FeedlogError::InvalidUploadHeader(_)
        )
    }
}

/// Convenience alias used throughout the feedlog crates.
pub type Result<T> = std::result::Result<T, FeedlogError>;
