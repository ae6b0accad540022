//! Error types for grafter operations.
//!
//! An operation that finds nothing to do is *not* an error; see
//! [`crate::operations::Outcome`]. The variants here abort a pipeline run.

use crate::graph::validation::ValidationReport;
use std::io;
use thiserror::Error;

/// The error type for grafter operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document does not have the `{ nodes, edges, groups }` shape.
    #[error("Invalid graph document: {0}")]
    InvalidGraphShape(String),

    /// Two entities share an identifier (raised by fail-fast validation).
    #[error("Duplicate ID \"{id}\" found in {first} and {second}")]
    DuplicateId {
        /// The identifier seen twice
        id: String,
        /// The entity that claimed the id first ("node" or "group")
        first: &'static str,
        /// The entity that collided with it
        second: &'static str,
    },

    /// Graph validation failed; the report lists every problem found.
    #[error("Graph validation failed: {0}")]
    Validation(ValidationReport),

    /// A source adapter failed to produce a graph.
    #[error("Failed to load source '{source_name}': {cause}")]
    Load {
        /// Display name of the failing source
        source_name: String,
        /// The underlying failure
        #[source]
        cause: Box<Error>,
    },

    /// An HTTP fetch failed.
    #[error("Fetch failed for {url}: {message}")]
    Fetch {
        /// The requested URL
        url: String,
        /// What went wrong
        message: String,
    },

    /// A source reference could not be understood.
    #[error("Unknown source: {0}")]
    UnknownSource(String),

    /// An operation specification could not be parsed.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The operation list already contains an operation with this id.
    #[error("Operation already in list: {0}")]
    DuplicateOperation(String),

    /// No operation with this id is in the list.
    #[error("Operation not found: {0}")]
    OperationNotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No `.grafter/` directory was found.
    #[error("Not a grafter project (no .grafter directory found). Run 'grafter init' first.")]
    NotInitialized,
}

/// A specialized Result type for grafter operations.
pub type Result<T> = std::result::Result<T, Error>;
