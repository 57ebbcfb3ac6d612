//! JSON Lines output.

use std::io::{self, Write};

use super::CardSink;
use crate::cardfile::types::models::Card;

/// Writes one JSON object per card, one per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    inner: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> CardSink for JsonLinesSink<W> {
    fn write_card(&mut self, card: Card) -> io::Result<()> {
        serde_json::to_writer(&mut self.inner, &card)?;
        writeln!(self.inner)
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardfile::types::models::Attachment;

    #[test]
    fn one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write_card(Card::new("a", "b\nc")).unwrap();
        let mut with_bitmap = Card::new("pic", "");
        with_bitmap.attachment = Some(Attachment::Bitmap {
            width: 1,
            height: 2,
            x: 0,
            y: 0,
            offset: 64,
            len: 8,
        });
        sink.write_card(with_bitmap).unwrap();
        sink.close().unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["title"], "a");
        assert_eq!(lines[0]["text"], "b\nc");
        assert!(lines[0].get("attachment").is_none());
        assert_eq!(lines[1]["attachment"]["type"], "bitmap");
        assert_eq!(lines[1]["attachment"]["len"], 8);
    }
}
