//! File format parsing layer for Cardfile files.
//!
//! This module provides the mid-level parsing layer that bridges between
//! raw byte I/O and the high-level [`CardFileReader`](crate::cardfile::reader::CardFileReader).
//!
//! # Module Organization
//!
//! - [`header`]: Detects the variant from the file tag and parses the fixed header
//! - [`index`]: Reads fixed-stride index records (title + data offset)
//! - [`content`]: Decodes the card data each index record points at
//! - [`ole`]: Walks embedded OLE 1 objects to find where they end
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Tag + Header   │ ← header::parse()
//! ├─────────────────┤
//! │  Index Table    │ ← index::read_entry()
//! │  (fixed stride) │
//! ├─────────────────┤
//! │  Card Data      │ ← content::decode_card()
//! │  (by offset,    │      └─ ole::skip_object()
//! │   any order)    │
//! └─────────────────┘
//! ```

pub mod content;
pub mod header;
pub mod index;
pub mod ole;
