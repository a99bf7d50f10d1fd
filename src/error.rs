//! Error types for the question store, question validation and quiz sessions.

use thiserror::Error;

/// Errors that can occur when talking to the question store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport failure: connection refused, timeout, DNS and so on.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The store answered with a non-success status code.
    #[error("store returned {status}: {message}")]
    Status {
        /// HTTP status code returned by the store.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The store answered 2xx but the payload could not be decoded.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The store worker is gone and can no longer take requests.
    #[error("question store is unavailable")]
    Unavailable,
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// A question that breaks the shape required for play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,

    #[error("expected {expected} options, found {found}")]
    WrongOptionCount { expected: usize, found: usize },

    #[error("option {position} has id {id}, expected {position}")]
    MisplacedOption { position: usize, id: u8 },

    #[error("no option is marked correct")]
    NoCorrectOption,

    #[error("{0} options are marked correct, expected exactly one")]
    MultipleCorrect(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("add questions first")]
    EmptyBank,

    #[error("question {} is invalid: {source}", .index + 1)]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("a quiz is already running")]
    AlreadyRunning,
}
