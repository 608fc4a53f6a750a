use reqwest::StatusCode;
use thiserror::Error;

/// Fatal pipeline failures. A failed run produces no summaries at all.
/// Per-record normalization problems are not errors; they are logged and
/// counted instead (see `normalize`).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not build the HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("GET {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("payload is not valid {encoding} text")]
    Decode { encoding: &'static str },

    #[error("malformed table at row {row}: {reason}")]
    Parse { row: usize, reason: String },

    #[error("dataset is missing required column `{0}`")]
    MissingColumn(String),

    #[error("boundary dataset could not be loaded: {0}")]
    Boundary(String),
}
