//! Fixed-width character readers.
//!
//! Cardfile text is stored either as one byte per character (`MGC`, `RRG`)
//! or as one 16-bit little-endian code unit per character (`DKO`). Lengths in
//! the file count characters, so the width decides how many bytes to read.

use std::io::{Read, Seek};

use encoding_rs::{UTF_16LE, mem};

use crate::cardfile::types::error::Result;
use crate::cardfile::utils::ByteStream;

/// The character encoding of a Cardfile, selected once from its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharEncoding {
    /// 1 byte per character, mapped directly to U+0000..U+00FF.
    Narrow,
    /// 2 bytes per character, one UCS-2 code unit each.
    Wide,
}

impl CharEncoding {
    /// Bytes per character.
    pub fn unit_width(&self) -> usize {
        match self {
            CharEncoding::Narrow => 1,
            CharEncoding::Wide => 2,
        }
    }

    /// Reads one character and returns its raw code unit.
    pub fn read_char<R: Read + Seek>(
        &self,
        stream: &mut ByteStream<R>,
        field: &'static str,
    ) -> Result<u16> {
        match self {
            CharEncoding::Narrow => Ok(u16::from(stream.read_u8(field)?)),
            CharEncoding::Wide => stream.read_u16(field),
        }
    }

    /// Reads exactly `count` characters and decodes them.
    pub fn read_chars<R: Read + Seek>(
        &self,
        stream: &mut ByteStream<R>,
        count: usize,
        field: &'static str,
    ) -> Result<String> {
        let bytes = stream.read_bytes(count * self.unit_width(), field)?;
        Ok(self.decode(&bytes))
    }

    /// Decodes raw text bytes in this encoding.
    ///
    /// Wide text is decoded per code unit; an unpaired surrogate cannot live
    /// in a Rust string and becomes U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            CharEncoding::Narrow => mem::decode_latin1(bytes).into_owned(),
            CharEncoding::Wide => {
                let (text, _) = UTF_16LE.decode_without_bom_handling(bytes);
                text.into_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn stream(bytes: &[u8]) -> ByteStream<Cursor<Vec<u8>>> {
        ByteStream::new(Cursor::new(bytes.to_vec())).unwrap()
    }

    #[test]
    fn narrow_maps_bytes_directly() {
        let mut s = stream(&[b'h', b'i', 0xe9, 0x80]);
        let text = CharEncoding::Narrow.read_chars(&mut s, 4, "text").unwrap();
        assert_eq!(text, "hi\u{e9}\u{80}");
        assert_eq!(s.position(), 4);
    }

    #[test]
    fn wide_reads_two_bytes_per_character() {
        let bytes: Vec<u8> = "h\u{e9}\u{4e2d}"
            .encode_utf16()
            .flat_map(u16::to_le_bytes)
            .collect();
        let mut s = stream(&bytes);
        assert_eq!(CharEncoding::Wide.read_char(&mut s, "c").unwrap(), u16::from(b'h'));
        let rest = CharEncoding::Wide.read_chars(&mut s, 2, "text").unwrap();
        assert_eq!(rest, "\u{e9}\u{4e2d}");
        assert_eq!(s.position(), 6);
    }

    #[test]
    fn wide_keeps_lone_surrogates_as_one_character() {
        let mut s = stream(&[0x00, 0xd8, b'a', 0x00]);
        assert_eq!(CharEncoding::Wide.read_char(&mut s, "c").unwrap(), 0xd800);
        assert_eq!(CharEncoding::Wide.read_char(&mut s, "c").unwrap(), u16::from(b'a'));
        assert_eq!(CharEncoding::Wide.decode(&[0x00, 0xd8, b'a', 0x00]), "\u{fffd}a");
    }

    #[test]
    fn insufficient_bytes_is_end_of_stream() {
        let mut s = stream(&[b'a', 0x00, b'b']);
        let err = CharEncoding::Wide.read_chars(&mut s, 2, "card text").unwrap_err();
        assert!(matches!(
            err,
            crate::cardfile::types::error::CardFileError::EndOfStream { needed: 4, .. }
        ));
    }
}
