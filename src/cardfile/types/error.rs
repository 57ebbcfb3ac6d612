//! Custom error types for the cardfile-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Every variant is fatal to the file being decoded: the walk over the index
/// table stops at the first error and the record sink is closed.
#[derive(Debug, Error)]
pub enum CardFileError {
    /// An error originating from I/O operations on the input stream.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The 3-byte tag at the start of the file is not MGC, RRG or DKO.
    #[error("Unrecognized card file tag {found:?}: expected MGC, RRG or DKO")]
    UnrecognizedMagic { found: [u8; 3] },

    /// The reserved bytes at the start of an index record are not all zero.
    #[error("Index record {index} at {offset:#x} has non-zero reserved bytes {found:02x?}")]
    ReservedBytes {
        index: u16,
        offset: u64,
        found: [u8; 6],
    },

    /// An index record points at a negative card data offset.
    #[error("Index record {index} has an invalid card data offset {offset}")]
    InvalidOffset { index: u16, offset: i32 },

    /// A signed length field holds a negative value.
    #[error("Invalid {field} {value} at {offset:#x}")]
    InvalidLength {
        offset: u64,
        field: &'static str,
        value: i64,
    },

    /// An embedded object declares an OLE version other than 1.0 or 1.5.
    #[error("Unsupported embedded object version {version:#06x} at {offset:#x}")]
    UnsupportedObjectVersion { offset: u64, version: u32 },

    /// An embedded object declares a format other than linked, embedded or static.
    #[error("Unknown embedded object format {format} at {offset:#x}")]
    UnknownObjectFormat { offset: u64, format: u32 },

    /// The stream ended while a field was being read.
    #[error("Unexpected end of stream at {offset:#x}: {field} needs {needed} more bytes")]
    EndOfStream {
        offset: u64,
        needed: u64,
        field: &'static str,
    },

    /// Walking an embedded object left the stream at or beyond the end of the file.
    #[error("Embedded object ends at {position:#x}, at or beyond the end of the file ({file_len:#x})")]
    Overrun { position: u64, file_len: u64 },

    /// A card index was requested that the index table does not contain.
    #[error("Card index {index} is out of range: the file holds {count} cards")]
    CardIndexOutOfRange { index: u16, count: u16 },

    /// The record sink failed to accept output.
    #[error("Record sink failed: {0}")]
    Sink(#[source] std::io::Error),
}

/// A convenience `Result` type alias using the crate's `CardFileError` type.
pub type Result<T> = std::result::Result<T, CardFileError>;
