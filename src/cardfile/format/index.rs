//! Index table parsing.
//!
//! # Index Record Structure
//! ```text
//! [6 bytes]  reserved, always zero
//! [4 bytes]  absolute offset of the card data (i32)
//! [1 byte ]  flag
//! [40 bytes] title, NUL terminated unless all 40 characters are used
//!            (81 bytes for wide text: 40 characters plus one pad byte)
//! [1 byte ]  NUL
//! ```
//!
//! Records have a fixed stride, so record `i` always starts at
//! `index_offset + i * stride` whatever its title length.

use std::io::{Read, Seek};

use log::{debug, trace, warn};

use crate::cardfile::codec::chars::CharEncoding;
use crate::cardfile::types::{
    error::{CardFileError, Result},
    models::{FileHeader, IndexEntry, MAX_TITLE_CHARS, RESERVED_LEN, ReaderOptions},
};
use crate::cardfile::utils::ByteStream;

/// Reads the index record for card `index`.
///
/// Seeks to the record first, so the stream may be anywhere on entry. On
/// return it is somewhere inside the record; callers seek again before the
/// next record.
pub fn read_entry<R: Read + Seek>(
    stream: &mut ByteStream<R>,
    header: &FileHeader,
    index: u16,
    options: &ReaderOptions,
) -> Result<IndexEntry> {
    if index >= header.card_count {
        return Err(CardFileError::CardIndexOutOfRange {
            index,
            count: header.card_count,
        });
    }

    let record_start = header.record_offset(index);
    stream.seek_to(record_start)?;
    trace!("Index record {} starts at {:#x}", index, record_start);

    let mut reserved = [0u8; RESERVED_LEN];
    stream.read_exact(&mut reserved, "reserved index bytes")?;
    if reserved.iter().any(|&b| b != 0) {
        return Err(CardFileError::ReservedBytes {
            index,
            offset: record_start,
            found: reserved,
        });
    }

    let raw_offset = stream.read_i32("card data offset")?;
    let data_offset = u32::try_from(raw_offset).map_err(|_| CardFileError::InvalidOffset {
        index,
        offset: raw_offset,
    })?;
    let flag = stream.read_u8("index flag")?;

    let title = read_title(stream, header.variant.encoding())?;
    debug!(
        "Index record {}: data at {:#x}, title is {} chars",
        index,
        data_offset,
        title.chars().count()
    );
    if options.trace_content {
        trace!("Index record {} title: {:?}", index, title);
    }

    Ok(IndexEntry {
        record_start,
        data_offset,
        flag,
        title,
    })
}

/// Reads a title one character at a time until a NUL or the 40 character cap.
///
/// A title that fills the whole field has no terminator; that is logged but
/// not an error.
fn read_title<R: Read + Seek>(stream: &mut ByteStream<R>, encoding: CharEncoding) -> Result<String> {
    let width = encoding.unit_width();
    let mut raw = Vec::with_capacity(MAX_TITLE_CHARS * width);
    let mut terminated = false;

    for _ in 0..MAX_TITLE_CHARS {
        let unit = encoding.read_char(stream, "index title")?;
        if unit == 0 {
            terminated = true;
            break;
        }
        raw.extend_from_slice(&unit.to_le_bytes()[..width]);
    }

    if !terminated {
        warn!(
            "Index title at {:#x} reached {} characters without a terminator",
            stream.position(),
            MAX_TITLE_CHARS
        );
    }

    Ok(encoding.decode(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardfile::types::models::CardFileVariant;
    use byteorder::{LittleEndian, WriteBytesExt};
    use std::io::Cursor;

    fn header(variant: CardFileVariant, card_count: u16, index_offset: u64) -> FileHeader {
        FileHeader {
            variant,
            card_count,
            last_object_id: None,
            index_offset,
        }
    }

    fn narrow_record(data_offset: i32, title: &[u8]) -> Vec<u8> {
        let mut rec = vec![0u8; 6];
        rec.write_i32::<LittleEndian>(data_offset).unwrap();
        rec.push(0);
        rec.extend_from_slice(title);
        rec.resize(52, 0);
        rec
    }

    #[test]
    fn reads_title_and_offset() {
        let mut file = vec![0u8; 5];
        file.extend(narrow_record(0x1234, b"Shopping"));
        let mut stream = ByteStream::new(Cursor::new(file)).unwrap();
        let entry = read_entry(
            &mut stream,
            &header(CardFileVariant::Mgc, 1, 5),
            0,
            &ReaderOptions::default(),
        )
        .unwrap();
        assert_eq!(entry.record_start, 5);
        assert_eq!(entry.data_offset, 0x1234);
        assert_eq!(entry.title, "Shopping");
    }

    #[test]
    fn second_record_is_found_by_stride() {
        let mut file = vec![0u8; 5];
        file.extend(narrow_record(100, b"a"));
        file.extend(narrow_record(200, b"a much longer title for the second card"));
        let mut stream = ByteStream::new(Cursor::new(file)).unwrap();
        let hdr = header(CardFileVariant::Mgc, 2, 5);
        let entry = read_entry(&mut stream, &hdr, 1, &ReaderOptions::default()).unwrap();
        assert_eq!(entry.record_start, 57);
        assert_eq!(entry.data_offset, 200);
        assert_eq!(entry.title, "a much longer title for the second card");
    }

    #[test]
    fn full_width_title_stops_at_cap() {
        let title = [b'x'; 40];
        let mut file = vec![0u8; 5];
        file.extend(narrow_record(9, &title));
        let mut stream = ByteStream::new(Cursor::new(file)).unwrap();
        let entry = read_entry(
            &mut stream,
            &header(CardFileVariant::Mgc, 1, 5),
            0,
            &ReaderOptions::default(),
        )
        .unwrap();
        assert_eq!(entry.title, "x".repeat(40));
        assert_eq!(stream.position(), 5 + 11 + 40);
    }

    #[test]
    fn wide_title_uses_two_bytes_per_character() {
        let mut rec = vec![0u8; 6];
        rec.write_i32::<LittleEndian>(300).unwrap();
        rec.push(0);
        for unit in "K\u{f6}ln".encode_utf16() {
            rec.write_u16::<LittleEndian>(unit).unwrap();
        }
        rec.resize(93, 0);
        let mut file = vec![0u8; 9];
        file.extend(rec);
        let mut stream = ByteStream::new(Cursor::new(file)).unwrap();
        let entry = read_entry(
            &mut stream,
            &header(CardFileVariant::Dko, 1, 9),
            0,
            &ReaderOptions::default(),
        )
        .unwrap();
        assert_eq!(entry.title, "K\u{f6}ln");
        assert_eq!(entry.data_offset, 300);
    }

    #[test]
    fn non_zero_reserved_byte_is_structural_error() {
        let mut rec = narrow_record(64, b"bad");
        rec[3] = 0x01;
        let mut file = vec![0u8; 5];
        file.extend(rec);
        let mut stream = ByteStream::new(Cursor::new(file)).unwrap();
        let err = read_entry(
            &mut stream,
            &header(CardFileVariant::Mgc, 1, 5),
            0,
            &ReaderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CardFileError::ReservedBytes { index: 0, offset: 5, found: [0, 0, 0, 1, 0, 0] }
        ));
    }

    #[test]
    fn negative_data_offset_is_rejected() {
        let mut file = vec![0u8; 5];
        file.extend(narrow_record(-1, b"neg"));
        let mut stream = ByteStream::new(Cursor::new(file)).unwrap();
        let err = read_entry(
            &mut stream,
            &header(CardFileVariant::Mgc, 1, 5),
            0,
            &ReaderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CardFileError::InvalidOffset { index: 0, offset: -1 }));
    }

    #[test]
    fn index_past_card_count_is_out_of_range() {
        let mut stream = ByteStream::new(Cursor::new(vec![0u8; 5])).unwrap();
        let err = read_entry(
            &mut stream,
            &header(CardFileVariant::Mgc, 0, 5),
            0,
            &ReaderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CardFileError::CardIndexOutOfRange { index: 0, count: 0 }));
    }
}
