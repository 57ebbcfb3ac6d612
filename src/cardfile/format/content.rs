//! # Card Data Decoding
//!
//! Turns the bytes at an index record's data offset into the card's text.
//! Graphics and embedded objects are skipped; only their location is kept.
//!
//! ## `MGC` card data
//! ```text
//! text only:        [2] 0  [2] text length  [n] text
//! graphic (+text):  [2] bitmap length  [2] width  [2] height  [2] x  [2] y
//!                   [bitmap length] bitmap  [2] text length  [n] text
//! empty:            [2] 0  [2] 0
//! ```
//!
//! ## `RRG` / `DKO` card data
//! ```text
//! [2] object flag (1 = object present)
//! object only:  <OLE object>  [2] width [2] height [2] left [2] top
//!               [2] right [2] bottom [2] link mode
//! [2] text length  [n] text
//! ```
//! Text lengths count characters; `DKO` text is 2 bytes per character.

use std::io::{Read, Seek};

use log::{debug, trace};

use super::ole;
use crate::cardfile::codec::chars::CharEncoding;
use crate::cardfile::types::{
    error::{CardFileError, Result},
    models::{Attachment, CardFileVariant, ObjectPlacement, ReaderOptions},
};
use crate::cardfile::utils::ByteStream;

/// Text and attachment metadata decoded from one card's data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardBody {
    pub text: String,
    pub attachment: Option<Attachment>,
}

/// Decodes the card data at the current stream position.
///
/// The stream is left wherever decoding ended.
pub fn decode_card<R: Read + Seek>(
    stream: &mut ByteStream<R>,
    variant: CardFileVariant,
    options: &ReaderOptions,
) -> Result<CardBody> {
    let body = match variant {
        CardFileVariant::Mgc => decode_bitmap_card(stream, variant.encoding())?,
        CardFileVariant::Rrg | CardFileVariant::Dko => {
            decode_object_card(stream, variant.encoding(), options)?
        }
    };
    if options.trace_content {
        trace!("Card text: {:?}", body.text);
    }
    Ok(body)
}

/// Decodes `MGC` card data.
fn decode_bitmap_card<R: Read + Seek>(
    stream: &mut ByteStream<R>,
    encoding: CharEncoding,
) -> Result<CardBody> {
    let start = stream.position();
    let bitmap_len = stream.read_i16("bitmap length")?;
    let second = stream.read_i16("text length or bitmap width")?;

    if bitmap_len == 0 && second == 0 {
        debug!("Card at {:#x} has no data", start);
        return Ok(CardBody::default());
    }

    if bitmap_len == 0 && second > 0 {
        debug!("Text only card at {:#x}: {} chars", start, second);
        let text = encoding.read_chars(stream, second as usize, "card text")?;
        return Ok(CardBody {
            text,
            attachment: None,
        });
    }

    let len = u16::try_from(bitmap_len).map_err(|_| CardFileError::InvalidLength {
        offset: start,
        field: "bitmap length",
        value: i64::from(bitmap_len),
    })?;
    let width = second;
    let height = stream.read_i16("bitmap height")?;
    let x = stream.read_i16("bitmap x offset")?;
    let y = stream.read_i16("bitmap y offset")?;

    let offset = stream.position();
    debug!(
        "Card at {:#x} has a {}x{} bitmap of {} bytes",
        start, width, height, len
    );
    stream.skip(u64::from(len), "bitmap")?;

    let text_len = stream.read_len_i16("text length")?;
    let text = encoding.read_chars(stream, usize::from(text_len), "card text")?;

    Ok(CardBody {
        text,
        attachment: Some(Attachment::Bitmap {
            width,
            height,
            x,
            y,
            offset,
            len: u64::from(len),
        }),
    })
}

/// Decodes `RRG` and `DKO` card data.
fn decode_object_card<R: Read + Seek>(
    stream: &mut ByteStream<R>,
    encoding: CharEncoding,
    options: &ReaderOptions,
) -> Result<CardBody> {
    let has_object = stream.read_u16("object flag")?;

    let attachment = if has_object == 1 {
        let span = ole::skip_object(stream, options)?;
        if span.end >= stream.len() {
            return Err(CardFileError::Overrun {
                position: span.end,
                file_len: stream.len(),
            });
        }
        let placement = read_placement(stream)?;
        trace!("Object placement: {:?}", placement);
        Some(Attachment::Object {
            kind: span.kind,
            version: span.version,
            offset: span.start,
            len: span.len(),
            placement,
        })
    } else {
        None
    };

    let text_len = stream.read_u16("text length")?;
    debug!("Card text is {} chars", text_len);
    let text = encoding.read_chars(stream, usize::from(text_len), "card text")?;

    Ok(CardBody { text, attachment })
}

/// Reads the 14 bytes that follow an embedded object.
fn read_placement<R: Read + Seek>(stream: &mut ByteStream<R>) -> Result<ObjectPlacement> {
    Ok(ObjectPlacement {
        width: stream.read_i16("object width")?,
        height: stream.read_i16("object height")?,
        left: stream.read_i16("object left")?,
        top: stream.read_i16("object top")?,
        right: stream.read_i16("object right")?,
        bottom: stream.read_i16("object bottom")?,
        link_mode: stream.read_u16("object link mode")?,
    })
}
