//! Codec layer for text decoding.
//!
//! # Submodules
//!
//! - [`chars`][]: Narrow (1 byte) and wide (2 byte) fixed-width character readers

pub mod chars;
