//! Cardfile tag detection and fixed header parsing.
//!
//! # Header Structure
//! ```text
//! MGC: [3 bytes] tag  [2 bytes] card count
//! RRG: [3 bytes] tag  [4 bytes] last object ID  [2 bytes] card count
//! DKO: [3 bytes] tag  [4 bytes] last object ID  [2 bytes] card count
//! ```
//!
//! The tag is ASCII in every variant, including the wide `DKO` layout.
//! All integers are little-endian.

use std::io::{Read, Seek};

use log::{debug, info, trace};

use crate::cardfile::types::{
    error::Result,
    models::{CardFileVariant, FileHeader},
};
use crate::cardfile::utils::ByteStream;

/// Parses the Cardfile header from the start of the stream.
///
/// On return the stream is positioned at the first index record.
///
/// # Errors
/// - `UnrecognizedMagic` if the tag is not `MGC`, `RRG` or `DKO` (any case)
/// - `EndOfStream` if the header is truncated
pub fn parse<R: Read + Seek>(stream: &mut ByteStream<R>) -> Result<FileHeader> {
    info!("Parsing Cardfile header");
    stream.seek_to(0)?;

    // Step 1: Identify the layout from the tag
    let mut tag = [0u8; 3];
    stream.read_exact(&mut tag, "file tag")?;
    let variant = CardFileVariant::try_from(tag)?;
    debug!(
        "Cardfile variant: {} ({:?} text)",
        variant,
        variant.encoding()
    );

    // Step 2: Read the variant's fixed fields
    let last_object_id = if variant.has_objects() {
        let id = stream.read_u32("last object ID")?;
        trace!("Last object ID: {}", id);
        Some(id)
    } else {
        None
    };
    let card_count = stream.read_u16("card count")?;

    let header = FileHeader {
        variant,
        card_count,
        last_object_id,
        index_offset: stream.position(),
    };

    info!(
        "Header parsed successfully: variant={}, cards={}, stride={} bytes",
        header.variant,
        header.card_count,
        header.stride()
    );
    Ok(header)
}
