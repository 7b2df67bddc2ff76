//! Positioned byte sources for section decoding.
//!
//! The decoder only needs three capabilities from its input: read a run of
//! bytes at the cursor, move the cursor, and report where it is. Keeping that
//! surface small lets the same decode path run over a memory-mapped object
//! file or a buffer assembled in a test.

use crate::io::error::{IoError, Result};
use bytes::Bytes;
use tracing::trace;

/// A seekable, positioned source of raw section bytes.
///
/// Positions are relative to the start of the section being decoded.
pub trait ByteSource {
    /// Fill `buf` from the current position and advance past it.
    ///
    /// Fails with `IoError::Truncated` without moving the cursor if fewer
    /// than `buf.len()` bytes remain.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Move the cursor to an absolute position.
    fn seek(&mut self, offset: u64) -> Result<()>;

    /// Current cursor position.
    fn tell(&self) -> u64;

    /// Total number of bytes the source holds.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An in-memory cursor over a section's bytes.
#[derive(Debug, Clone)]
pub struct SliceSource {
    data: Bytes,
    pos: usize,
}

impl SliceSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// Copy a borrowed slice into a new source.
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Bytes left between the cursor and the end of the source.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl ByteSource for SliceSource {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let available = self.remaining();
        if buf.len() > available {
            return Err(IoError::Truncated {
                offset: self.pos as u64,
                needed: buf.len(),
                available,
            });
        }
        let end = self.pos + buf.len();
        buf.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    fn seek(&mut self, offset: u64) -> Result<()> {
        let len = self.data.len() as u64;
        if offset > len {
            return Err(IoError::SeekOutOfBounds { offset, len });
        }
        trace!(from = self.pos, to = offset, "Seek");
        self.pos = offset as usize;
        Ok(())
    }

    fn tell(&self) -> u64 {
        self.pos as u64
    }

    fn len(&self) -> u64 {
        self.data.len() as u64
    }
}
