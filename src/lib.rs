//! Decoder and lookup index for the DWARF `.debug_aranges` section.
//!
//! The section maps address ranges to the compilation units that own them.
//! [`build`] decodes a section from any [`io::ByteSource`] into a
//! [`RangeTable`], which answers address queries by binary search:
//!
//! ```
//! use dwarf_aranges::{Endian, RangeTable};
//!
//! // One 32-bit DWARF set: CU at offset 0, 4-byte addresses, one range.
//! let mut section = Vec::new();
//! section.extend_from_slice(&28u32.to_le_bytes()); // unit_length
//! section.extend_from_slice(&2u16.to_le_bytes()); // version
//! section.extend_from_slice(&0u32.to_le_bytes()); // debug_info_offset
//! section.extend_from_slice(&[4, 0]); // address_size, segment_size
//! section.extend_from_slice(&[0; 4]); // padding to the tuple size
//! for v in [0x1000u32, 0x100, 0, 0] {
//!     section.extend_from_slice(&v.to_le_bytes());
//! }
//!
//! let table = RangeTable::from_section(&section, Endian::Little).unwrap();
//! assert_eq!(table.cu_offset_at_addr(0x1000).unwrap(), 0);
//! ```

pub mod config;
pub mod error;
pub mod formats;
pub mod io;
pub mod loader;
pub mod logging;

pub use config::{ArangesConfig, DecodeLimits};
pub use error::{ArangesError, Result};
pub use formats::dwarf::{
    build, build_with_limits, AddressWidth, DwarfFormat, Endian, OffsetSize, RangeEntry,
    RangeTable, SectionDecoder, SetHeader,
};
pub use io::{ByteSource, SliceSource};
