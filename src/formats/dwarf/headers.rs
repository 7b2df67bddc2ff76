//! Address-range set header parsing

use crate::error::{ArangesError, Result};
use crate::formats::dwarf::types::{OffsetSize, RESERVED_LENGTH_MIN};
use crate::formats::dwarf::utils::DwarfFormat;
use crate::io::ByteSource;

/// Header of one set (one CU's block of ranges)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetHeader {
    /// Section offset the set starts at
    pub offset: u64,
    /// Bytes following the initial length field that belong to this set
    pub unit_length: u64,
    pub offset_size: OffsetSize,
    pub version: u16,
    /// Offset of the owning CU in `.debug_info`
    pub cu_offset: u64,
    pub address_size: u8,
    pub segment_size: u8,
}

impl SetHeader {
    /// Section offset of the set that follows this one.
    pub fn next_set_offset(&self) -> Result<u64> {
        self.offset
            .checked_add(self.offset_size.initial_length_field_size())
            .and_then(|o| o.checked_add(self.unit_length))
            .ok_or_else(|| ArangesError::MalformedHeader {
                offset: self.offset,
                message: format!("unit_length {:#x} overflows the section", self.unit_length),
            })
    }
}

/// Parse the set header at `offset`, leaving the source positioned right
/// after the header fields.
pub fn parse_set_header<S: ByteSource + ?Sized>(
    source: &mut S,
    format: &DwarfFormat,
    offset: u64,
) -> Result<SetHeader> {
    let stream_err = |err| ArangesError::MalformedStream {
        offset,
        source: err,
    };

    source.seek(offset).map_err(stream_err)?;
    let (unit_length, offset_size) = format.read_initial_length(source).map_err(stream_err)?;
    if offset_size == OffsetSize::Dwarf32 && unit_length >= u64::from(RESERVED_LENGTH_MIN) {
        return Err(ArangesError::MalformedHeader {
            offset,
            message: format!("reserved initial length {:#x}", unit_length),
        });
    }

    let version = format.read_u16(source).map_err(stream_err)?;
    let cu_offset = format
        .read_offset(source, offset_size)
        .map_err(stream_err)?;
    let address_size = format.read_u8(source).map_err(stream_err)?;
    let segment_size = format.read_u8(source).map_err(stream_err)?;

    Ok(SetHeader {
        offset,
        unit_length,
        offset_size,
        version,
        cu_offset,
        address_size,
        segment_size,
    })
}
