// src/github/error.rs
// =============================================================================
// Errors raised while talking to GitHub and turning its answers into text.
//
// Every failure in the pipeline ends up as one of these variants. The only
// place that swallows them is the README lookup in extract/aggregate.rs;
// everywhere else they bubble up with `?` and end the run.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input URL does not name an owner and a repository.
    #[error("invalid repository URL '{url}': {reason}")]
    InvalidReference { url: String, reason: String },

    /// GitHub answered with a non-success status.
    #[error("GitHub returned HTTP {status} for '{path}'")]
    RemoteFetch { status: StatusCode, path: String },

    /// The HTTP client itself could not be created (TLS backend, system config).
    #[error("could not build the HTTP client")]
    ClientSetup(#[source] reqwest::Error),

    /// The request never completed, or its body could not be read.
    #[error("request for '{path}' failed")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The file content is not valid base64 or not valid UTF-8.
    #[error("could not decode '{path}': {reason}")]
    Decode { path: String, reason: String },

    /// A file came back where a directory listing was expected, or vice versa.
    #[error("expected {expected} at '{path}'")]
    UnexpectedContents { path: String, expected: &'static str },
}

impl ExtractError {
    /// Builds a `RemoteFetch` error for test doubles.
    #[cfg(test)]
    pub fn remote(status: StatusCode, path: impl Into<String>) -> Self {
        ExtractError::RemoteFetch {
            status,
            path: path.into(),
        }
    }
}
