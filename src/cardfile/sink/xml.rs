//! XML output.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <cardfile>
//!   <card>
//!     <title>…</title>
//!     <text>…</text>
//!   </card>
//! </cardfile>
//! ```

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::CardSink;
use crate::cardfile::types::models::Card;

/// Writes cards as a single `<cardfile>` document.
pub struct XmlSink<W: Write> {
    writer: Writer<W>,
    started: bool,
}

impl<W: Write> XmlSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
            started: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn emit(&mut self, event: Event<'_>) -> io::Result<()> {
        self.writer.write_event(event).map_err(io::Error::other)
    }

    fn start_document(&mut self) -> io::Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        self.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.emit(Event::Start(BytesStart::new("cardfile")))
    }

    fn text_element(&mut self, name: &str, content: &str) -> io::Result<()> {
        self.emit(Event::Start(BytesStart::new(name)))?;
        self.emit(Event::Text(BytesText::new(content)))?;
        self.emit(Event::End(BytesEnd::new(name)))
    }
}

impl<W: Write> CardSink for XmlSink<W> {
    fn write_header(&mut self) -> io::Result<()> {
        self.start_document()
    }

    fn write_card(&mut self, card: Card) -> io::Result<()> {
        self.start_document()?;
        self.emit(Event::Start(BytesStart::new("card")))?;
        self.text_element("title", &card.title)?;
        self.text_element("text", &card.text)?;
        self.emit(Event::End(BytesEnd::new("card")))
    }

    fn close(&mut self) -> io::Result<()> {
        self.start_document()?;
        self.emit(Event::End(BytesEnd::new("cardfile")))?;
        self.writer.get_mut().flush()
    }
}
