//! Integer primitives for DWARF sections

use crate::formats::dwarf::types::{Endian, OffsetSize, DWARF64_ESCAPE};
use crate::io::error::Result;
use crate::io::ByteSource;

/// Reads DWARF fields in the byte order of the containing object file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwarfFormat {
    endian: Endian,
}

impl DwarfFormat {
    pub fn new(endian: Endian) -> Self {
        Self { endian }
    }

    pub fn little() -> Self {
        Self::new(Endian::Little)
    }

    pub fn big() -> Self {
        Self::new(Endian::Big)
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    fn read_array<const N: usize, S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        source.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    pub fn read_u8<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<u8> {
        let [b] = self.read_array::<1, S>(source)?;
        Ok(b)
    }

    pub fn read_u16<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<u16> {
        let bytes = self.read_array::<2, S>(source)?;
        Ok(match self.endian {
            Endian::Little => u16::from_le_bytes(bytes),
            Endian::Big => u16::from_be_bytes(bytes),
        })
    }

    pub fn read_u32<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<u32> {
        let bytes = self.read_array::<4, S>(source)?;
        Ok(match self.endian {
            Endian::Little => u32::from_le_bytes(bytes),
            Endian::Big => u32::from_be_bytes(bytes),
        })
    }

    pub fn read_u64<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<u64> {
        let bytes = self.read_array::<8, S>(source)?;
        Ok(match self.endian {
            Endian::Little => u64::from_le_bytes(bytes),
            Endian::Big => u64::from_be_bytes(bytes),
        })
    }

    /// Read an initial length field.
    ///
    /// A leading `0xffff_ffff` selects 64-bit DWARF and is followed by the
    /// real 8-byte length. Reserved 32-bit values are returned as-is for the
    /// caller to reject.
    pub fn read_initial_length<S: ByteSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<(u64, OffsetSize)> {
        let first = self.read_u32(source)?;
        if first == DWARF64_ESCAPE {
            Ok((self.read_u64(source)?, OffsetSize::Dwarf64))
        } else {
            Ok((u64::from(first), OffsetSize::Dwarf32))
        }
    }

    /// Read a section offset of the given DWARF offset size.
    pub fn read_offset<S: ByteSource + ?Sized>(
        &self,
        source: &mut S,
        offset_size: OffsetSize,
    ) -> Result<u64> {
        match offset_size {
            OffsetSize::Dwarf32 => self.read_u32(source).map(u64::from),
            OffsetSize::Dwarf64 => self.read_u64(source),
        }
    }
}

/// Round `value` up to the next multiple of `alignment`.
///
/// Returns `None` on overflow. An alignment of 0 or 1 leaves the value alone.
pub fn align_up(value: u64, alignment: u64) -> Option<u64> {
    if alignment <= 1 {
        return Some(value);
    }
    match value % alignment {
        0 => Some(value),
        rem => value.checked_add(alignment - rem),
    }
}
