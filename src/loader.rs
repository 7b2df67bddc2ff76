//! Locate and decode `.debug_aranges` in object files.

use crate::config::{ArangesConfig, DecodeLimits};
use crate::error::Result;
use crate::formats::dwarf::{build_with_limits, DwarfFormat, Endian, RangeTable, DEBUG_ARANGES};
use crate::io::{IOLimits, SafeReader, SliceSource};
use crate::span_trace;
use bytes::Bytes;
use object::{Object, ObjectSection};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Decode the address range table of an object file held in memory.
///
/// Returns `Ok(None)` when the file has no `.debug_aranges` section.
pub fn load_from_bytes(data: &[u8], limits: &DecodeLimits) -> Result<Option<RangeTable>> {
    load_with(data, limits, |section| match section {
        Cow::Borrowed(s) => SliceSource::from_slice(s),
        Cow::Owned(v) => SliceSource::new(v),
    })
}

/// Like `load_from_bytes`, but an uncompressed section is decoded straight
/// out of `data` without copying it.
pub fn load_from_shared(data: &Bytes, limits: &DecodeLimits) -> Result<Option<RangeTable>> {
    load_with(data, limits, |section| match section {
        Cow::Borrowed(s) => SliceSource::new(data.slice_ref(s)),
        Cow::Owned(v) => SliceSource::new(v),
    })
}

fn load_with<F>(data: &[u8], limits: &DecodeLimits, to_source: F) -> Result<Option<RangeTable>>
where
    F: FnOnce(Cow<'_, [u8]>) -> SliceSource,
{
    let obj = object::File::parse(data)?;
    let endian = if obj.is_little_endian() {
        Endian::Little
    } else {
        Endian::Big
    };

    let section = match obj.section_by_name(DEBUG_ARANGES) {
        Some(s) => s,
        None => {
            debug!(format = ?obj.format(), "No .debug_aranges section");
            return Ok(None);
        }
    };

    let bytes = section.uncompressed_data()?;
    let size = bytes.len() as u64;
    debug!(
        format = ?obj.format(),
        endian = ?endian,
        file_offset = ?section.file_range().map(|(off, _)| off),
        size = size,
        compressed = matches!(bytes, Cow::Owned(_)),
        "Found .debug_aranges"
    );

    let mut source = to_source(bytes);
    let table = build_with_limits(&mut source, size, DwarfFormat::new(endian), limits)?;
    Ok(Some(table))
}

/// Memory-map an object file within the configured limits and decode its
/// address range table.
pub fn load_from_path<P: AsRef<Path>>(
    path: P,
    config: &ArangesConfig,
) -> Result<Option<RangeTable>> {
    let path = path.as_ref();
    let span = span_trace!("load_aranges", path = %path.display());
    let _guard = span.enter();

    let mut reader = SafeReader::open(path, IOLimits::from(&config.io))?;
    let data = reader.read_all()?;
    let table = load_from_shared(&data, &config.decode)?;

    if let Some(t) = &table {
        info!(
            path = %path.display(),
            entries = t.len(),
            "Loaded address range table"
        );
    }
    Ok(table)
}
