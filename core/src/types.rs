use std::io;
use thiserror::Error;

use crate::telemetry::SerializeReport;

/// Failure to encode a single record.
///
/// Carries a message only; the record index is attached by the serializer
/// when the failure becomes a [`SerializeError`].
#[derive(Debug, Error)]
#[error("record encoding failed: {message}")]
pub struct EncodeError {
    message: String,
}

impl EncodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(e: serde_json::Error) -> Self {
        EncodeError::new(e.to_string())
    }
}

/// The record source could not advance.
#[derive(Debug, Error)]
#[error("record source failed: {message}")]
pub struct SourceError {
    message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Unified serializer error covering encoding, the record source, the sink and option validation.
/// - `From<T>` impls enable `?` across the adapters.
/// - Converts into `std::io::Error` for the `Read`/`BufRead` surfaces.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// A record failed to encode under the abort policy.
    #[error("record {index} could not be encoded: {source}")]
    Encode {
        index: u64,
        #[source]
        source: EncodeError,
    },

    /// The record source failed; the stream was terminated early.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Downstream write failed during a push drain.
    #[error("sink write failed: {0}")]
    Sink(#[source] io::Error),

    /// Generic high-level validation with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<SerializeError> for io::Error {
    fn from(e: SerializeError) -> Self {
        match e {
            // Keep the original kind so callers can still match on it.
            SerializeError::Sink(inner) => inner,
            other => io::Error::other(other),
        }
    }
}

/// A one-shot serialization that stopped early.
///
/// The report covers everything up to the failure: counters (including
/// `records_skipped`) and, for memory sinks, the bytes captured so far.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct CollectionError {
    #[source]
    pub error: SerializeError,
    pub report: Box<SerializeReport>,
}

impl CollectionError {
    pub fn new(error: SerializeError, report: SerializeReport) -> Self {
        Self { error, report: Box::new(report) }
    }

    pub fn into_parts(self) -> (SerializeError, SerializeReport) {
        (self.error, *self.report)
    }
}

impl From<CollectionError> for SerializeError {
    fn from(e: CollectionError) -> Self {
        e.error
    }
}
