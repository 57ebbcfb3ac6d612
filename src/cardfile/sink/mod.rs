//! Record sinks: where decoded cards go.
//!
//! The decoder only knows the [`CardSink`] trait. It calls
//! [`write_header`](CardSink::write_header) once before the first card,
//! [`write_card`](CardSink::write_card) once per card in index order and
//! [`close`](CardSink::close) exactly once, whether decoding succeeded or not.
//!
//! # Submodules
//!
//! - [`text`][]: plain text, one block per card
//! - [`xml`][]: a `<cardfile>` document
//! - [`json`][]: one JSON object per line

use std::io;

use crate::cardfile::types::models::Card;

pub mod json;
pub mod text;
pub mod xml;

pub use json::JsonLinesSink;
pub use text::TextSink;
pub use xml::XmlSink;

/// A consumer of decoded cards.
pub trait CardSink {
    /// Writes any preamble. Called at most once, before any card.
    fn write_header(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Accepts one card. Ownership of the card passes to the sink.
    fn write_card(&mut self, card: Card) -> io::Result<()>;

    /// Finishes output. Called exactly once, also after a failed decode.
    fn close(&mut self) -> io::Result<()>;
}

/// Collects cards in memory.
impl CardSink for Vec<Card> {
    fn write_card(&mut self, card: Card) -> io::Result<()> {
        self.push(card);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: CardSink + ?Sized> CardSink for &mut S {
    fn write_header(&mut self) -> io::Result<()> {
        (**self).write_header()
    }

    fn write_card(&mut self, card: Card) -> io::Result<()> {
        (**self).write_card(card)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S: CardSink + ?Sized> CardSink for Box<S> {
    fn write_header(&mut self) -> io::Result<()> {
        (**self).write_header()
    }

    fn write_card(&mut self, card: Card) -> io::Result<()> {
        (**self).write_card(card)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}
