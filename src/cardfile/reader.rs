use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, info, warn};

use super::codec::chars::CharEncoding;
use super::format::{content, header, index};
use super::iter::{CardIterator, IndexIterator};
use super::sink::CardSink;
use super::types::error::{CardFileError, Result};
use super::types::models::*;
use super::utils::ByteStream;

/// The main reader for Cardfile files.
///
/// Parses the `MGC` (Windows 3.0), `RRG` (Windows 3.1) and `DKO`
/// (Windows NT, wide text) layouts.
///
/// The reader owns the input stream for as long as it lives. Every card is
/// located through its fixed-stride index record, so cards can be read in
/// order through [`cards`](Self::cards) or individually with
/// [`read_card`](Self::read_card).
#[derive(Debug)]
pub struct CardFileReader<R> {
    stream: ByteStream<R>,
    header: FileHeader,
    options: ReaderOptions,
}

impl CardFileReader<BufReader<File>> {
    /// Opens a Cardfile from the given path and parses its header.
    ///
    /// # Errors
    /// Returns an error if:
    /// - File cannot be opened
    /// - The tag is not `MGC`, `RRG` or `DKO`
    /// - The header is truncated
    pub fn open(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening Cardfile: {}", path.display());
        let file = File::open(path)?;
        Self::new(BufReader::new(file), options)
    }
}

impl<R: Read + Seek> CardFileReader<R> {
    /// Wraps a seekable stream positioned anywhere and parses its header.
    pub fn new(inner: R, options: ReaderOptions) -> Result<Self> {
        let mut stream = ByteStream::new(inner)?;
        let header = header::parse(&mut stream)?;
        debug!(
            "Cardfile is {} bytes, index table at {:#x}",
            stream.len(),
            header.index_offset
        );
        Ok(Self {
            stream,
            header,
            options,
        })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Returns the number of cards declared in the header.
    pub fn num_cards(&self) -> u16 {
        self.header.card_count
    }

    /// Returns the text encoding selected by the file's variant.
    pub fn encoding(&self) -> CharEncoding {
        self.header.variant.encoding()
    }

    /// Returns the byte length of one index record.
    pub fn stride(&self) -> u64 {
        self.header.stride()
    }

    /// Reads the index record for card `index` without decoding its data.
    pub fn read_index_entry(&mut self, index: u16) -> Result<IndexEntry> {
        index::read_entry(&mut self.stream, &self.header, index, &self.options)
    }

    /// Reads and decodes card `index`.
    ///
    /// Seeks to the index record at `index_offset + index * stride`, then to
    /// the card data it points at. The stream position on entry is irrelevant.
    pub fn read_card(&mut self, index: u16) -> Result<Card> {
        let entry = self.read_index_entry(index)?;
        self.stream.seek_to(u64::from(entry.data_offset))?;
        let body = content::decode_card(&mut self.stream, self.header.variant, &self.options)?;
        Ok(Card {
            title: entry.title,
            text: body.text,
            attachment: body.attachment,
        })
    }

    /// Returns an iterator over all index records, in table order.
    ///
    /// Lighter than [`cards`](Self::cards): card data is never touched.
    pub fn index_entries(&mut self) -> IndexIterator<'_, R> {
        IndexIterator::new(self)
    }

    /// Returns an iterator over all cards, in index order.
    ///
    /// The iterator stops after the first error.
    pub fn cards(&mut self) -> CardIterator<'_, R> {
        CardIterator::new(self)
    }

    /// Decodes every card into `sink` and returns the number of cards written.
    ///
    /// The sink's `close` is called exactly once, also when decoding fails.
    /// If both decoding and closing fail, the decoding error is returned.
    pub fn decode_into<S: CardSink + ?Sized>(&mut self, sink: &mut S) -> Result<usize> {
        let written = self.write_cards(sink);
        let closed = sink.close().map_err(CardFileError::Sink);
        match (written, closed) {
            (Ok(count), Ok(())) => {
                info!("Decoded {} of {} cards", count, self.header.card_count);
                Ok(count)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    warn!("Record sink failed to close after an error: {}", close_err);
                }
                Err(e)
            }
        }
    }

    /// Gives back the underlying stream.
    pub fn into_inner(self) -> R {
        self.stream.into_inner()
    }

    fn write_cards<S: CardSink + ?Sized>(&mut self, sink: &mut S) -> Result<usize> {
        sink.write_header().map_err(CardFileError::Sink)?;
        let mut written = 0;
        for card in self.cards() {
            sink.write_card(card?).map_err(CardFileError::Sink)?;
            written += 1;
        }
        Ok(written)
    }
}

/// Decodes a whole Cardfile from `inner` into `sink`.
///
/// The sink is closed on every path, including a file whose header cannot
/// be parsed.
pub fn decode<R: Read + Seek, S: CardSink + ?Sized>(
    inner: R,
    sink: &mut S,
    options: ReaderOptions,
) -> Result<usize> {
    match CardFileReader::new(inner, options) {
        Ok(mut reader) => reader.decode_into(sink),
        Err(e) => {
            if let Err(close_err) = sink.close() {
                warn!("Record sink failed to close after an error: {}", close_err);
            }
            Err(e)
        }
    }
}
