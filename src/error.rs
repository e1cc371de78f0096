use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a lookup or a poster download.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to parse JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The endpoint answered, but reported a failure: either the `Error`
    /// field of an OMDb response or a non-2xx poster status.
    #[error("remote error: {0}")]
    Remote(String),

    #[error("failed to {operation} '{path}': {source}")]
    Io {
        operation: &'static str,
        path: String,
        source: std::io::Error,
    },

    #[error("no poster available for {0}")]
    NoPoster(String),
}
