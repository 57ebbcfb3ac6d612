//! Builders for synthetic Cardfile images.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

/// Encodes text the way a Cardfile of the given width stores it.
pub fn encode_text(text: &str, wide: bool) -> Vec<u8> {
    if wide {
        text.encode_utf16().flat_map(u16::to_le_bytes).collect()
    } else {
        text.chars().map(|c| c as u8).collect()
    }
}

/// `MGC` card data holding text only.
pub fn mgc_text(text: &str) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_i16::<LittleEndian>(0).unwrap();
    out.write_i16::<LittleEndian>(text.len() as i16).unwrap();
    out.extend(encode_text(text, false));
    out
}

/// `MGC` card data holding a bitmap of `bitmap_len` opaque bytes and text.
pub fn mgc_graphic(bitmap_len: i16, text: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for value in [bitmap_len, 16, 8, 4, 2] {
        out.write_i16::<LittleEndian>(value).unwrap();
    }
    out.extend(std::iter::repeat_n(0x5a, bitmap_len as usize));
    out.write_i16::<LittleEndian>(text.chars().count() as i16).unwrap();
    out.extend(encode_text(text, false));
    out
}

/// `RRG`/`DKO` card data, optionally carrying an embedded object.
pub fn object_card(object: Option<&[u8]>, text: &str, wide: bool) -> Vec<u8> {
    let mut out = Vec::new();
    match object {
        Some(object) => {
            out.write_u16::<LittleEndian>(1).unwrap();
            out.extend_from_slice(object);
            for value in [64i16, 32, 0, 0, 64, 32] {
                out.write_i16::<LittleEndian>(value).unwrap();
            }
            out.write_u16::<LittleEndian>(2).unwrap();
        }
        None => out.write_u16::<LittleEndian>(0).unwrap(),
    }
    out.write_u16::<LittleEndian>(text.encode_utf16().count() as u16).unwrap();
    out.extend(encode_text(text, wide));
    out
}

/// Writes a length-prefixed field.
pub fn length_prefixed(out: &mut Vec<u8>, payload: &[u8]) {
    out.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
    out.extend_from_slice(payload);
}

/// A static OLE 1 object with `presentation_len` bytes of picture data.
pub fn static_object(version: u32, presentation_len: usize) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u32::<LittleEndian>(1).unwrap();
    out.write_u32::<LittleEndian>(version).unwrap();
    out.write_u32::<LittleEndian>(3).unwrap();
    length_prefixed(&mut out, b"METAFILEPICT\0");
    out.write_u32::<LittleEndian>(1000).unwrap();
    out.write_u32::<LittleEndian>(500).unwrap();
    length_prefixed(&mut out, &vec![0xcc; presentation_len]);
    out
}

/// An embedded OLE 1 object with a bitmap presentation.
pub fn embedded_object(native_len: usize, presentation_len: usize) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u32::<LittleEndian>(2).unwrap();
    out.write_u32::<LittleEndian>(0x0501).unwrap();
    out.write_u32::<LittleEndian>(2).unwrap();
    length_prefixed(&mut out, b"PBrush\0");
    length_prefixed(&mut out, b"");
    length_prefixed(&mut out, b"");
    length_prefixed(&mut out, &vec![0x11; native_len]);
    out.write_u32::<LittleEndian>(0x0501).unwrap();
    out.write_u32::<LittleEndian>(5).unwrap();
    length_prefixed(&mut out, b"BITMAP\0");
    out.write_u32::<LittleEndian>(32).unwrap();
    out.write_u32::<LittleEndian>(32).unwrap();
    length_prefixed(&mut out, &vec![0x22; presentation_len]);
    out
}

/// Assembles a complete Cardfile: header, index table, then card data.
pub struct CardFileBuilder {
    tag: [u8; 3],
    last_object_id: Option<u32>,
    wide: bool,
    cards: Vec<(String, Vec<u8>)>,
    reversed_data: bool,
}

impl CardFileBuilder {
    pub fn mgc() -> Self {
        Self::new(*b"MGC", None, false)
    }

    pub fn rrg() -> Self {
        Self::new(*b"RRG", Some(9), false)
    }

    pub fn dko() -> Self {
        Self::new(*b"DKO", Some(9), true)
    }

    fn new(tag: [u8; 3], last_object_id: Option<u32>, wide: bool) -> Self {
        Self {
            tag,
            last_object_id,
            wide,
            cards: Vec::new(),
            reversed_data: false,
        }
    }

    /// Writes the tag in lower case.
    pub fn lowercase_tag(mut self) -> Self {
        self.tag = self.tag.map(|b| b.to_ascii_lowercase());
        self
    }

    /// Stores card data in reverse index order.
    pub fn reversed_data(mut self) -> Self {
        self.reversed_data = true;
        self
    }

    pub fn card(mut self, title: &str, data: Vec<u8>) -> Self {
        self.cards.push((title.to_string(), data));
        self
    }

    pub fn header_len(&self) -> usize {
        3 + if self.last_object_id.is_some() { 4 } else { 0 } + 2
    }

    pub fn stride(&self) -> usize {
        if self.wide { 93 } else { 52 }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.tag);
        if let Some(id) = self.last_object_id {
            out.write_u32::<LittleEndian>(id).unwrap();
        }
        out.write_u16::<LittleEndian>(self.cards.len() as u16).unwrap();

        let data_start = self.header_len() + self.cards.len() * self.stride();
        let mut offsets = vec![0usize; self.cards.len()];
        let mut order: Vec<usize> = (0..self.cards.len()).collect();
        if self.reversed_data {
            order.reverse();
        }
        let mut next = data_start;
        for &i in &order {
            offsets[i] = next;
            next += self.cards[i].1.len();
        }

        for (i, (title, _)) in self.cards.iter().enumerate() {
            let start = out.len();
            out.extend_from_slice(&[0u8; 6]);
            out.write_i32::<LittleEndian>(offsets[i] as i32).unwrap();
            out.push(0);
            out.extend(encode_text(title, self.wide));
            out.resize(start + self.stride(), 0);
        }

        for &i in &order {
            out.extend_from_slice(&self.cards[i].1);
        }
        out
    }
}
