//! Error types for the Regio library.

use thiserror::Error;

/// Errors that can occur during Regio operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred while reading input or writing intervals.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// A validation constraint was violated.
    #[error("{0}")]
    Validation(String),

    /// A record referenced a chromosome missing from the size table.
    #[error("unknown chromosome: '{0}' is not listed in the chromosome size table")]
    UnknownChromosome(String),

    /// A gene record whose attributes carry no extractable gene identifier.
    #[error("unrecognized gene identifier: {0}")]
    UnrecognizedGeneIdentifier(String),
}
