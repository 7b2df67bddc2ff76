//! Compare decoded tables against gimli's `.debug_aranges` reader.

mod common;

use common::{SectionBuilder, SetSpec};
use dwarf_aranges::{Endian, RangeEntry, RangeTable};

fn gimli_entries(data: &[u8], endian: Endian) -> Vec<RangeEntry> {
    let endian = match endian {
        Endian::Little => gimli::RunTimeEndian::Little,
        Endian::Big => gimli::RunTimeEndian::Big,
    };
    let aranges = gimli::DebugAranges::new(data, endian);
    let mut out = Vec::new();
    let mut headers = aranges.headers();
    while let Some(header) = headers.next().unwrap() {
        let cu_offset = header.debug_info_offset().0 as u64;
        let mut entries = header.entries();
        while let Some(entry) = entries.next().unwrap() {
            out.push(RangeEntry::new(entry.address(), entry.length(), cu_offset));
        }
    }
    out
}

fn assert_agrees(data: &[u8], endian: Endian) {
    let ours = RangeTable::from_section(data, endian).unwrap();
    let theirs = RangeTable::from_entries(gimli_entries(data, endian));
    assert!(!theirs.is_empty());
    assert_eq!(ours, theirs);
}

/// Distinct, non-overlapping, scrambled ranges; `seed * count + i` stays
/// below 97 in every caller, and `k * 37 % 97` is a permutation there.
fn tuples(seed: u64, count: u64, stride: u64) -> Vec<(u64, u64)> {
    (0..count)
        .map(|i| {
            let slot = (seed * count + i) * 37 % 97;
            (0x40_0000 + slot * stride, stride / 2 + i)
        })
        .collect()
}

#[test]
fn agrees_on_32bit_addresses() {
    let mut builder = SectionBuilder::little();
    for cu in 0..8 {
        builder = builder.set(cu * 0x3c, 4, &tuples(cu, 5, 0x1000));
    }
    assert_agrees(&builder.build(), Endian::Little);
}

#[test]
fn agrees_on_64bit_addresses() {
    let mut builder = SectionBuilder::little();
    for cu in 0..8 {
        builder = builder.set(cu * 0x50, 8, &tuples(cu + 3, 4, 0x2_0000));
    }
    assert_agrees(&builder.build(), Endian::Little);
}

#[test]
fn agrees_on_big_endian_dwarf64() {
    let mut builder = SectionBuilder::new(Endian::Big);
    for cu in 0..4 {
        builder = builder.push(SetSpec::new(cu * 0x100, 8, &tuples(cu, 3, 0x800)).dwarf64());
    }
    assert_agrees(&builder.build(), Endian::Big);
}

#[test]
fn agrees_with_empty_sets_interleaved() {
    let data = SectionBuilder::little()
        .set(0x0, 8, &[])
        .set(0x20, 8, &[(0x1000, 0x10)])
        .set(0x40, 8, &[])
        .set(0x60, 8, &[(0x800, 0x10), (0x2000, 0x40)])
        .build();
    assert_agrees(&data, Endian::Little);
}
