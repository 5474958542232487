//! Control message error types

use thiserror::Error;

/// Control message errors
#[derive(Error, Debug)]
pub enum Error {
    /// Message type name is not registered
    #[error("unknown message type: {name}")]
    UnknownType {
        /// Name that failed to resolve
        name: String,
    },

    /// `mac` field was not a 6-element array
    #[error("malformed mac field: expected 6 octets, got {len}")]
    MalformedMacField {
        /// Number of elements supplied (0 for a non-array value)
        len: usize,
    },

    /// Field value cannot be carried as a wire scalar
    #[error("field {key} is not a scalar")]
    NonScalarField {
        /// Offending field name
        key: String,
    },

    /// Strict unpack found an incomplete set of mac octets
    #[error("mac octet {index} missing from payload")]
    MissingMacOctet {
        /// First absent octet index
        index: usize,
    },

    /// Strict unpack found a `mac[..]` key with a bad index
    #[error("invalid mac field key: {key}")]
    InvalidMacIndex {
        /// Offending wire key
        key: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
