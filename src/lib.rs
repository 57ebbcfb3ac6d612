//! # cardfile-reader
//!
//! A reader for Windows Cardfile (`.crd`) files.
//! Supports the `MGC` (Windows 3.0), `RRG` (Windows 3.1) and `DKO`
//! (Windows NT, wide text) layouts.
//!
//! Cards are decoded into title/text pairs. Bitmaps and embedded OLE objects
//! are skipped, never rendered; their location is reported on the card.
//!
//! Logging goes through the `log` facade and is silent unless the
//! application installs a logger. Card titles and text are only logged when
//! [`ReaderOptions::trace_content`] is set.
pub mod cardfile;

// Re-export the main types for convenience
pub use cardfile::{
    CardFileError, CardFileReader, Result, decode,
    codec::chars::CharEncoding,
    iter::{CardIterator, IndexIterator},
    sink::{CardSink, JsonLinesSink, TextSink, XmlSink},
    types::models::{
        Attachment, Card, CardFileVariant, FileHeader, IndexEntry, ObjectKind, ObjectPlacement,
        ObjectVersion, ReaderOptions,
    },
};
