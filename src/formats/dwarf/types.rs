//! Core `.debug_aranges` types and constants

use crate::error::{ArangesError, Result};
use crate::formats::dwarf::utils::DwarfFormat;
use crate::io::ByteSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Section name as it appears in ELF and (translated by `object`) Mach-O
pub const DEBUG_ARANGES: &str = ".debug_aranges";

/// Initial length value that announces the 64-bit DWARF format
pub const DWARF64_ESCAPE: u32 = 0xffff_ffff;

/// Initial length values reserved by the DWARF standard
pub const RESERVED_LENGTH_MIN: u32 = 0xffff_fff0;

/// Byte order of the container the section came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endian {
    Little,
    Big,
}

/// 32-bit or 64-bit DWARF, as chosen by a set's initial length field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffsetSize {
    Dwarf32,
    Dwarf64,
}

impl OffsetSize {
    /// Width in bytes of section offsets such as `debug_info_offset`.
    pub fn bytes(&self) -> u8 {
        match self {
            OffsetSize::Dwarf32 => 4,
            OffsetSize::Dwarf64 => 8,
        }
    }

    /// Width in bytes of the initial length field, escape included.
    pub fn initial_length_field_size(&self) -> u64 {
        match self {
            OffsetSize::Dwarf32 => 4,
            OffsetSize::Dwarf64 => 12,
        }
    }
}

/// Width of the addresses and lengths in one set's tuples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressWidth {
    Width32,
    Width64,
}

impl AddressWidth {
    /// Resolve a header's `address_size`. `set_offset` is only used for the
    /// error report.
    pub fn from_address_size(address_size: u8, set_offset: u64) -> Result<Self> {
        match address_size {
            4 => Ok(AddressWidth::Width32),
            8 => Ok(AddressWidth::Width64),
            _ => Err(ArangesError::InvalidAddressSize {
                offset: set_offset,
                address_size,
            }),
        }
    }

    pub fn bytes(&self) -> u64 {
        match self {
            AddressWidth::Width32 => 4,
            AddressWidth::Width64 => 8,
        }
    }

    /// Size of one `(address, length)` tuple.
    pub fn tuple_size(&self) -> u64 {
        self.bytes() * 2
    }

    /// Read one address-sized value.
    pub fn read<S: ByteSource + ?Sized>(
        &self,
        format: &DwarfFormat,
        source: &mut S,
    ) -> crate::io::error::Result<u64> {
        match self {
            AddressWidth::Width32 => format.read_u32(source).map(u64::from),
            AddressWidth::Width64 => format.read_u64(source),
        }
    }
}

/// One address range owned by a compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeEntry {
    /// First address of the range
    pub begin_addr: u64,
    /// Length of the range in bytes
    pub length: u64,
    /// Offset of the owning CU in `.debug_info`
    pub cu_offset: u64,
}

impl RangeEntry {
    pub fn new(begin_addr: u64, length: u64, cu_offset: u64) -> Self {
        Self {
            begin_addr,
            length,
            cu_offset,
        }
    }

    /// Exclusive end address, saturating at `u64::MAX`.
    pub fn end_addr(&self) -> u64 {
        self.begin_addr.saturating_add(self.length)
    }

    /// Whether `addr` lies in `[begin_addr, begin_addr + length)`.
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.begin_addr && addr < self.end_addr()
    }

    /// The `(0, 0)` pair that terminates a set's tuples.
    pub fn is_sentinel_pair(addr: u64, length: u64) -> bool {
        addr == 0 && length == 0
    }
}

impl fmt::Display for RangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:#x}, {:#x}) cu@{:#x}",
            self.begin_addr,
            self.end_addr(),
            self.cu_offset
        )
    }
}
