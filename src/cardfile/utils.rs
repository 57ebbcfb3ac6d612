//! Low-level byte reading utilities.
//!
//! [`ByteStream`] wraps the seekable input and tracks the absolute position,
//! so every short read can be reported with the offset and the field that was
//! being read instead of a bare `UnexpectedEof`.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian};

use crate::cardfile::types::error::{CardFileError, Result};

/// A seekable little-endian field reader over a Cardfile.
#[derive(Debug)]
pub struct ByteStream<R> {
    inner: R,
    position: u64,
    len: u64,
}

impl<R: Read + Seek> ByteStream<R> {
    /// Wraps `inner`, measuring its length and rewinding to the start.
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self {
            inner,
            position: 0,
            len,
        })
    }

    /// Current absolute offset.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total length of the underlying stream in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.position = self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Re-reads the position from the underlying stream.
    ///
    /// Needed after a failed read, which leaves the inner cursor unspecified.
    pub fn resync(&mut self) -> Result<u64> {
        self.position = self.inner.stream_position()?;
        Ok(self.position)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Fills `buf` completely or fails with `EndOfStream`.
    pub fn read_exact(&mut self, buf: &mut [u8], field: &'static str) -> Result<()> {
        let offset = self.position;
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(CardFileError::EndOfStream {
                    offset,
                    needed: buf.len() as u64,
                    field,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf, field)?;
        Ok(buf[0])
    }

    pub fn read_i16(&mut self, field: &'static str) -> Result<i16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf, field)?;
        Ok(LittleEndian::read_i16(&buf))
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf, field)?;
        Ok(LittleEndian::read_u16(&buf))
    }

    pub fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf, field)?;
        Ok(LittleEndian::read_i32(&buf))
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf, field)?;
        Ok(LittleEndian::read_u32(&buf))
    }

    /// Reads `count` bytes into a new buffer.
    ///
    /// Only for short fields; use [`skip`](Self::skip) for payloads.
    pub fn read_bytes(&mut self, count: usize, field: &'static str) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        self.read_exact(&mut buf, field)?;
        Ok(buf)
    }

    /// Consumes and discards `count` bytes without buffering them.
    pub fn skip(&mut self, count: u64, field: &'static str) -> Result<()> {
        let offset = self.position;
        let copied = io::copy(&mut (&mut self.inner).take(count), &mut io::sink())?;
        self.position += copied;
        if copied < count {
            return Err(CardFileError::EndOfStream {
                offset,
                needed: count - copied,
                field,
            });
        }
        Ok(())
    }

    /// Reads a signed 16-bit length and rejects negative values.
    pub fn read_len_i16(&mut self, field: &'static str) -> Result<u16> {
        let offset = self.position;
        let value = self.read_i16(field)?;
        u16::try_from(value).map_err(|_| CardFileError::InvalidLength {
            offset,
            field,
            value: i64::from(value),
        })
    }
}
