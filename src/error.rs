//! Library-wide error and result types.

use std::io;

use thiserror::Error;

/// Result alias used throughout cpool.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the decoder can produce.
///
/// Every variant is terminal for the decode that raised it. Callers are not
/// expected to distinguish between them beyond the message.
#[derive(Debug, Error)]
pub enum Error {
    /// The leading magic integer was not `-1`.
    #[error("bad magic value: expected -1, found {0}")]
    BadMagic(i32),
    /// A field that must be zero held something else.
    #[error("non-zero padding after {field}: {value}")]
    Padding { field: &'static str, value: i32 },
    /// A property declared a type name this decoder does not know.
    #[error("unsupported property type '{type_name}' for property '{name}'")]
    UnsupportedType { name: String, type_name: String },
    /// A string length prefix exceeded the configured ceiling.
    #[error("string length {len} exceeds the limit of {max} characters")]
    StringTooLong { len: u64, max: usize },
    /// A read or skip would run past the end of the stream.
    #[error("read of {requested} bytes exceeds the {remaining} bytes remaining")]
    OutOfBounds { requested: u64, remaining: u64 },
    /// Structs and arrays were nested deeper than the configured limit.
    #[error("nesting depth {depth} exceeds the limit of {max}")]
    TooDeep { depth: usize, max: usize },
    /// A size field was negative.
    #[error("negative {field}: {value}")]
    NegativeSize { field: &'static str, value: i32 },
    /// A required top-level property never appeared.
    #[error("missing required property '{0}'")]
    MissingProperty(&'static str),
    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
