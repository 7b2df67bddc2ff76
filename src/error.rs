//! Error types for `.debug_aranges` decoding and lookup.
//!
//! Construction errors are fatal: `build` either returns a complete table or
//! one of these. Lookup errors are local to the failing query.

use crate::io::error::IoError;
use std::fmt;
use thiserror::Error;

/// Main error type for address-range table operations.
#[derive(Debug, Error)]
pub enum ArangesError {
    /// A set uses segmented addressing
    #[error("Segmented addressing is not supported (set at {offset:#x}, segment_size {segment_size})")]
    UnsupportedSegmentation { offset: u64, segment_size: u8 },

    /// A set declares an address size other than 4 or 8
    #[error("Invalid address size {address_size} in set at {offset:#x}")]
    InvalidAddressSize { offset: u64, address_size: u8 },

    /// Read or seek failure while decoding, including truncated data
    #[error("Malformed stream at offset {offset:#x}: {source}")]
    MalformedStream {
        offset: u64,
        #[source]
        source: IoError,
    },

    /// Header fields that cannot describe a valid set
    #[error("Malformed header at offset {offset:#x}: {message}")]
    MalformedHeader { offset: u64, message: String },

    /// Lookup past the last known range start
    #[error("Address {addr:#x} is past the last range start {last}")]
    AddressOutOfRange { addr: u64, last: LastKey },

    /// Decode limit exceeded
    #[error("Resource limit exceeded: {resource} ({used}/{limit})")]
    ResourceExhausted {
        resource: String,
        used: usize,
        limit: usize,
    },

    /// File open, mapping or read-budget errors
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// The container could not be parsed
    #[error("Object parse error: {0}")]
    Object(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for address-range operations
pub type Result<T> = std::result::Result<T, ArangesError>;

/// Highest range start of the table a failed lookup ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastKey(pub Option<u64>);

impl fmt::Display for LastKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(addr) => write!(f, "{:#x}", addr),
            None => write!(f, "(empty table)"),
        }
    }
}

impl From<object::Error> for ArangesError {
    fn from(err: object::Error) -> Self {
        ArangesError::Object(err.to_string())
    }
}
