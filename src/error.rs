// src/error.rs

use thiserror::Error;

/// Errors that abort an enrichment run.
///
/// Anomalies are not errors: they are ordinary output describing data-quality
/// issues. Everything in this enum means the run produced nothing.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// A join key or projected column is absent, or a lookup spec /
    /// pipeline config is structurally invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The lookup-retrieval collaborator failed (not-found, unreadable,
    /// malformed content). Retry policy belongs to the transport layer.
    #[error("failed to fetch lookup `{reference}`: {message}")]
    Fetch { reference: String, message: String },

    /// A non-empty table is missing a column a detector needs.
    #[error("data shape error: {0}")]
    DataShape(String),
}

/// Result type alias using EnrichmentError.
pub type Result<T> = std::result::Result<T, EnrichmentError>;
