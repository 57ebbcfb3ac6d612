//! Plain text output.

use std::io::{self, Write};

use super::CardSink;
use crate::cardfile::types::models::Card;

/// Writes each card as its title, its text and a blank line.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    inner: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> CardSink for TextSink<W> {
    fn write_card(&mut self, card: Card) -> io::Result<()> {
        writeln!(self.inner, "{}", card.title)?;
        if !card.text.is_empty() {
            writeln!(self.inner, "{}", card.text)?;
        }
        writeln!(self.inner)
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
