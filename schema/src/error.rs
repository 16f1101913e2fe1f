//! Error types for loading an ontology schema.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Faults raised while reading RDF input or querying the repository.
///
/// Every variant is fatal for the load: no partial schema is returned.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input file is not well-formed RDF.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// The file being parsed (`<inline>` for in-memory sources).
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A query against the repository failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// The input path is neither a Turtle nor an N-Triples document.
    #[error("Unsupported RDF format: {}", path.display())]
    UnsupportedFormat {
        /// The rejected path.
        path: PathBuf,
    },
}
