//! Iterators for sequential access to Cardfile cards.
//!
//! 1. [`IndexIterator`] - Yields index records (title + data offset) only
//! 2. [`CardIterator`] - Yields fully decoded cards
//!
//! Both walk the index table by record number, so each step seeks to
//! `index_offset + i * stride` regardless of where the previous step left
//! the stream.
//!
//! # Example
//! ```no_run
//! # use cardfile_reader::{CardFileReader, ReaderOptions};
//! # let mut reader = CardFileReader::open("phones.crd", ReaderOptions::default()).unwrap();
//! for result in reader.cards() {
//!     let card = result.unwrap();
//!     println!("{}: {}", card.title, card.text);
//! }
//! ```

use std::io::{Read, Seek};

use super::reader::CardFileReader;
use super::types::error::Result;
use super::types::models::{Card, IndexEntry};

/// Iterator over the index table.
///
/// Created by [`CardFileReader::index_entries()`](crate::CardFileReader::index_entries).
pub struct IndexIterator<'a, R> {
    reader: &'a mut CardFileReader<R>,
    next_index: u16,
    failed: bool,
}

impl<'a, R: Read + Seek> IndexIterator<'a, R> {
    pub(super) fn new(reader: &'a mut CardFileReader<R>) -> Self {
        Self {
            reader,
            next_index: 0,
            failed: false,
        }
    }
}

impl<R: Read + Seek> Iterator for IndexIterator<'_, R> {
    type Item = Result<IndexEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_index >= self.reader.num_cards() {
            return None;
        }
        let result = self.reader.read_index_entry(self.next_index);
        self.next_index += 1;
        self.failed = result.is_err();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining(self.failed, self.next_index, self.reader.num_cards())
    }
}

/// Iterator over decoded cards.
///
/// Yields `Result<Card>`; after the first error it yields nothing more, as
/// every decoding error is fatal to the file.
///
/// Created by [`CardFileReader::cards()`](crate::CardFileReader::cards).
pub struct CardIterator<'a, R> {
    reader: &'a mut CardFileReader<R>,
    next_index: u16,
    failed: bool,
}

impl<'a, R: Read + Seek> CardIterator<'a, R> {
    pub(super) fn new(reader: &'a mut CardFileReader<R>) -> Self {
        Self {
            reader,
            next_index: 0,
            failed: false,
        }
    }
}

impl<R: Read + Seek> Iterator for CardIterator<'_, R> {
    type Item = Result<Card>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_index >= self.reader.num_cards() {
            return None;
        }
        let result = self.reader.read_card(self.next_index);
        self.next_index += 1;
        self.failed = result.is_err();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining(self.failed, self.next_index, self.reader.num_cards())
    }
}

fn remaining(failed: bool, next_index: u16, count: u16) -> (usize, Option<usize>) {
    if failed {
        return (0, Some(0));
    }
    let left = usize::from(count.saturating_sub(next_index));
    (0, Some(left))
}
