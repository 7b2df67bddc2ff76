#![no_main]
use dwarf_aranges::{build_with_limits, DecodeLimits, DwarfFormat, SliceSource};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = DecodeLimits {
        max_sets: 4096,
        max_entries: 65536,
    };
    for format in [DwarfFormat::little(), DwarfFormat::big()] {
        let mut source = SliceSource::from_slice(data);
        if let Ok(table) = build_with_limits(&mut source, data.len() as u64, format, &limits) {
            assert_eq!(table.keys().len(), table.len());
            assert!(table.keys().windows(2).all(|w| w[0] <= w[1]));
            for entry in table.iter() {
                let _ = table.cu_offset_at_addr(entry.begin_addr);
            }
        }
    }
});
