//! `.debug_aranges` section decoding
//!
//! A section is a run of sets, one per compilation unit. Each set is a
//! header, padding up to a multiple of the tuple size, and `(address,
//! length)` tuples closed by a `(0, 0)` pair. The decoder walks the sets in
//! file order and returns every tuple unsorted; `RangeTable` does the
//! ordering.

use crate::config::DecodeLimits;
use crate::error::{ArangesError, Result};
use crate::formats::dwarf::headers::{parse_set_header, SetHeader};
use crate::formats::dwarf::types::{AddressWidth, RangeEntry};
use crate::formats::dwarf::utils::{align_up, DwarfFormat};
use crate::io::ByteSource;
use crate::{log_error, span_trace};
use tracing::{debug, trace};

/// Walks a section set by set.
#[derive(Debug, Clone)]
pub struct SectionDecoder {
    format: DwarfFormat,
    limits: DecodeLimits,
}

impl SectionDecoder {
    pub fn new(format: DwarfFormat) -> Self {
        Self {
            format,
            limits: DecodeLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Decode every set in the first `size` bytes of `source`.
    ///
    /// Any error aborts the whole decode; no partial list is returned.
    pub fn decode<S: ByteSource + ?Sized>(
        &self,
        source: &mut S,
        size: u64,
    ) -> Result<Vec<RangeEntry>> {
        let span = span_trace!("decode_aranges", size = size, endian = ?self.format.endian());
        let _guard = span.enter();

        let mut entries = Vec::new();
        let mut offset = 0u64;
        let mut sets = 0usize;

        while offset < size {
            sets += 1;
            if sets > self.limits.max_sets {
                return Err(log_error!(ArangesError::ResourceExhausted {
                    resource: "aranges sets".to_string(),
                    used: sets,
                    limit: self.limits.max_sets,
                }));
            }

            let header = parse_set_header(source, &self.format, offset)?;
            let width = AddressWidth::from_address_size(header.address_size, offset)
                .map_err(|e| log_error!(e, "unusable address size"))?;

            if header.segment_size != 0 {
                return Err(log_error!(ArangesError::UnsupportedSegmentation {
                    offset,
                    segment_size: header.segment_size,
                }));
            }

            let before = entries.len();
            self.decode_tuples(source, &header, width, &mut entries)?;

            debug!(
                offset = offset,
                version = header.version,
                cu_offset = header.cu_offset,
                address_size = header.address_size,
                offset_size = ?header.offset_size,
                entries = entries.len() - before,
                "Decoded aranges set"
            );

            offset = header.next_set_offset()?;
        }

        debug!(sets = sets, entries = entries.len(), "Decoded aranges section");
        Ok(entries)
    }

    /// Read one set's tuples, starting from the source position right after
    /// its header.
    fn decode_tuples<S: ByteSource + ?Sized>(
        &self,
        source: &mut S,
        header: &SetHeader,
        width: AddressWidth,
        entries: &mut Vec<RangeEntry>,
    ) -> Result<()> {
        let header_end = source.tell();
        let first_tuple =
            align_up(header_end, width.tuple_size()).ok_or_else(|| ArangesError::MalformedHeader {
                offset: header.offset,
                message: "tuple alignment overflows the section".to_string(),
            })?;
        source
            .seek(first_tuple)
            .map_err(|err| ArangesError::MalformedStream {
                offset: header_end,
                source: err,
            })?;

        loop {
            let tuple_offset = source.tell();
            let stream_err = |err| ArangesError::MalformedStream {
                offset: tuple_offset,
                source: err,
            };
            let addr = width.read(&self.format, source).map_err(stream_err)?;
            let length = width.read(&self.format, source).map_err(stream_err)?;

            if RangeEntry::is_sentinel_pair(addr, length) {
                return Ok(());
            }

            if entries.len() >= self.limits.max_entries {
                return Err(log_error!(ArangesError::ResourceExhausted {
                    resource: "aranges entries".to_string(),
                    used: entries.len() + 1,
                    limit: self.limits.max_entries,
                }));
            }

            trace!(addr = addr, length = length, cu_offset = header.cu_offset, "Range");
            entries.push(RangeEntry::new(addr, length, header.cu_offset));
        }
    }
}
