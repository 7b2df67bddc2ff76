//! DWARF `.debug_aranges` reader
//!
//! Decodes the address range table and answers which compilation unit owns
//! an address.

pub mod aranges;
pub mod headers;
pub mod table;
pub mod types;
pub mod utils;

pub use aranges::SectionDecoder;
pub use headers::SetHeader;
pub use table::RangeTable;
pub use types::*;
pub use utils::DwarfFormat;

use crate::config::DecodeLimits;
use crate::error::Result;
use crate::io::{ByteSource, SliceSource};
use tracing::info;

/// Decode the first `size` bytes of `source` into a range table.
pub fn build<S: ByteSource + ?Sized>(
    source: &mut S,
    size: u64,
    format: DwarfFormat,
) -> Result<RangeTable> {
    build_with_limits(source, size, format, &DecodeLimits::default())
}

/// Like `build`, bounded by `limits`.
pub fn build_with_limits<S: ByteSource + ?Sized>(
    source: &mut S,
    size: u64,
    format: DwarfFormat,
    limits: &DecodeLimits,
) -> Result<RangeTable> {
    let entries = SectionDecoder::new(format)
        .with_limits(limits.clone())
        .decode(source, size)?;
    let table = RangeTable::from_entries(entries);
    info!(
        entries = table.len(),
        cus = table.cu_offsets().len(),
        "Built address range table"
    );
    Ok(table)
}

impl RangeTable {
    /// Decode a complete section held in memory.
    pub fn from_section(data: &[u8], endian: Endian) -> Result<Self> {
        let mut source = SliceSource::from_slice(data);
        build(&mut source, data.len() as u64, DwarfFormat::new(endian))
    }
}
