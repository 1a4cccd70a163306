use thiserror::Error;

use crate::ShapeError;

/// Failures that abort a fetch run before anything is written.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("error building http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("error sending request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest_middleware::Error,
    },

    #[error("upstream returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("error reading response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}
