//! Core data structures for Cardfile format components.
//!
//! This module defines the fundamental types used throughout the library:
//! - The file variant and its header
//! - Index entries and decoded cards
//! - Metadata about skipped graphic and embedded-object payloads
//! - Reader options

use serde::Serialize;

use super::error::{CardFileError, Result};
use crate::cardfile::codec::chars::CharEncoding;

/// Maximum number of characters in an index title.
pub const MAX_TITLE_CHARS: usize = 40;

/// Bytes in an index record besides the title text field:
/// 6 reserved, 4 offset, 1 flag and 1 trailing NUL.
pub const INDEX_FIXED_LEN: u64 = 12;

/// Number of reserved bytes at the start of each index record.
pub const RESERVED_LEN: usize = 6;

/// The three on-disk Cardfile layouts, identified by a 3-byte tag.
///
/// - `MGC`: Windows 3.0. Cards may carry a monochrome bitmap, no OLE.
/// - `RRG`: Windows 3.1. Cards may carry an OLE 1 object.
/// - `DKO`: Windows NT. Same as `RRG` but all text is 2 bytes per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardFileVariant {
    Mgc,
    Rrg,
    Dko,
}

impl CardFileVariant {
    /// The tag as it is written at the start of the file.
    pub fn magic(&self) -> &'static [u8; 3] {
        match self {
            CardFileVariant::Mgc => b"MGC",
            CardFileVariant::Rrg => b"RRG",
            CardFileVariant::Dko => b"DKO",
        }
    }

    /// Returns the character encoding used for titles and card text.
    pub fn encoding(&self) -> CharEncoding {
        match self {
            CardFileVariant::Mgc | CardFileVariant::Rrg => CharEncoding::Narrow,
            CardFileVariant::Dko => CharEncoding::Wide,
        }
    }

    /// Returns true if cards of this variant may hold an embedded OLE object.
    pub fn has_objects(&self) -> bool {
        !matches!(self, CardFileVariant::Mgc)
    }
}

impl TryFrom<[u8; 3]> for CardFileVariant {
    type Error = CardFileError;
    fn try_from(tag: [u8; 3]) -> Result<Self> {
        [CardFileVariant::Mgc, CardFileVariant::Rrg, CardFileVariant::Dko]
            .into_iter()
            .find(|variant| variant.magic().eq_ignore_ascii_case(&tag))
            .ok_or(CardFileError::UnrecognizedMagic { found: tag })
    }
}

impl std::fmt::Display for CardFileVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CardFileVariant::Mgc => write!(f, "MGC"),
            CardFileVariant::Rrg => write!(f, "RRG"),
            CardFileVariant::Dko => write!(f, "DKO"),
        }
    }
}

/// Parsed fixed header of a Cardfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub variant: CardFileVariant,
    pub card_count: u16,
    /// ID of the last OLE object written to the file. Absent for `MGC`.
    pub last_object_id: Option<u32>,
    /// Absolute offset of the first index record.
    pub index_offset: u64,
}

impl FileHeader {
    /// Byte length of one index record.
    ///
    /// The title field holds 40 characters: 40 bytes for narrow text, or
    /// 40 wide characters plus one pad byte (81 bytes) for wide text.
    pub fn stride(&self) -> u64 {
        let text_field_width = match self.variant.encoding() {
            CharEncoding::Narrow => MAX_TITLE_CHARS as u64,
            CharEncoding::Wide => MAX_TITLE_CHARS as u64 * 2 + 1,
        };
        INDEX_FIXED_LEN + text_field_width
    }

    /// Absolute offset of the index record for card `index`.
    pub fn record_offset(&self, index: u16) -> u64 {
        self.index_offset + u64::from(index) * self.stride()
    }
}

/// A single record of the index table.
///
/// Associates a card title with the absolute offset of the card's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Absolute offset where this index record begins.
    pub record_start: u64,
    /// Absolute offset of the card data.
    pub data_offset: u32,
    /// Flag byte stored after the offset; Cardfile never gave it a meaning.
    pub flag: u8,
    pub title: String,
}

/// A decoded card: the index title and the card's text.
///
/// `text` is empty when the card holds no text. `attachment` describes the
/// graphic or embedded object that was skipped, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Card {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            attachment: None,
        }
    }
}

/// Location and shape of a payload that was skipped while decoding a card.
///
/// Payload bytes are never read into memory; only their span is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attachment {
    /// Monochrome bitmap of an `MGC` card.
    Bitmap {
        width: i16,
        height: i16,
        x: i16,
        y: i16,
        offset: u64,
        len: u64,
    },
    /// OLE 1 object of an `RRG` or `DKO` card.
    ///
    /// `kind` and `version` are `None` when a lenient walk failed before
    /// reading them.
    Object {
        kind: Option<ObjectKind>,
        version: Option<ObjectVersion>,
        offset: u64,
        len: u64,
        placement: ObjectPlacement,
    },
}

/// How an OLE 1 object is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Linked,
    Embedded,
    Static,
}

impl TryFrom<u32> for ObjectKind {
    type Error = u32;
    fn try_from(value: u32) -> std::result::Result<Self, u32> {
        match value {
            1 => Ok(Self::Linked),
            2 => Ok(Self::Embedded),
            3 => Ok(Self::Static),
            other => Err(other),
        }
    }
}

/// The OLE 1 stream versions Cardfile wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectVersion {
    /// `0x0001`, written by Windows NT 3.51.
    V1,
    /// `0x0501`, written by Windows 3.1.
    V1_5,
}

impl TryFrom<u32> for ObjectVersion {
    type Error = u32;
    fn try_from(value: u32) -> std::result::Result<Self, u32> {
        match value {
            0x0001 => Ok(Self::V1),
            0x0501 => Ok(Self::V1_5),
            other => Err(other),
        }
    }
}

/// The 14-byte trailer that follows an OLE object on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ObjectPlacement {
    pub width: i16,
    pub height: i16,
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
    /// 0 embedded, 1 linked, 2 static.
    pub link_mode: u16,
}

/// Options controlling how a file is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Swallow errors inside an embedded object and resume at the position
    /// the walk reached, instead of failing the file.
    pub lenient_objects: bool,
    /// Include card titles and text in log output. Card content may be
    /// sensitive, so this is off unless asked for.
    pub trace_content: bool,
}
