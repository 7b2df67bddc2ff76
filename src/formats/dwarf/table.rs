//! Sorted range table for address to CU lookups

use crate::error::{ArangesError, LastKey, Result};
use crate::formats::dwarf::types::RangeEntry;
use serde::{Deserialize, Serialize};

/// Decoded `.debug_aranges` contents, sorted by start address.
///
/// `keys[i] == entries[i].begin_addr` for every `i`, and `keys` is
/// non-decreasing. The table never changes after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RangeEntry>", into = "Vec<RangeEntry>")]
pub struct RangeTable {
    entries: Vec<RangeEntry>,
    keys: Vec<u64>,
}

impl RangeTable {
    /// Sort `entries` by start address and index them.
    ///
    /// The relative order of entries sharing a start address is unspecified.
    pub fn from_entries(mut entries: Vec<RangeEntry>) -> Self {
        entries.sort_unstable_by_key(|e| e.begin_addr);
        let keys = entries.iter().map(|e| e.begin_addr).collect();
        Self { entries, keys }
    }

    /// Index of the first key `>= addr` (lower bound). Equals `len()` when
    /// every key is smaller than `addr`.
    pub fn lower_bound(&self, addr: u64) -> usize {
        self.keys.partition_point(|&k| k < addr)
    }

    /// Entry selected by the lower-bound search for `addr`.
    ///
    /// This is the first entry starting at or after `addr`; whether `addr`
    /// actually falls inside it is not checked. See `lookup_containing`.
    pub fn entry_at_addr(&self, addr: u64) -> Result<&RangeEntry> {
        self.entries
            .get(self.lower_bound(addr))
            .ok_or_else(|| ArangesError::AddressOutOfRange {
                addr,
                last: LastKey(self.keys.last().copied()),
            })
    }

    /// CU offset of the first range starting at or after `addr`.
    ///
    /// Addresses below the first range resolve to the first range, and an
    /// address strictly between two range starts resolves to the later one.
    /// Addresses above the last range start fail with `AddressOutOfRange`.
    pub fn cu_offset_at_addr(&self, addr: u64) -> Result<u64> {
        self.entry_at_addr(addr).map(|e| e.cu_offset)
    }

    /// The range that actually contains `addr`, if any.
    pub fn lookup_containing(&self, addr: u64) -> Option<&RangeEntry> {
        // Last range starting at or before addr.
        let upper = self.keys.partition_point(|&k| k <= addr);
        let idx = upper.checked_sub(1)?;
        self.entries.get(idx).filter(|e| e.contains(addr))
    }

    pub fn entries(&self) -> &[RangeEntry] {
        &self.entries
    }

    pub fn keys(&self) -> &[u64] {
        &self.keys
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RangeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct CU offsets referenced by the table, ascending.
    pub fn cu_offsets(&self) -> Vec<u64> {
        let mut offsets: Vec<u64> = self.entries.iter().map(|e| e.cu_offset).collect();
        offsets.sort_unstable();
        offsets.dedup();
        offsets
    }

    /// Lowest start and highest end address covered, or `None` when empty.
    pub fn address_span(&self) -> Option<(u64, u64)> {
        let first = self.keys.first()?;
        let end = self.entries.iter().map(RangeEntry::end_addr).max()?;
        Some((*first, end))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<Vec<RangeEntry>> for RangeTable {
    fn from(entries: Vec<RangeEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<RangeTable> for Vec<RangeEntry> {
    fn from(table: RangeTable) -> Self {
        table.entries
    }
}

impl<'a> IntoIterator for &'a RangeTable {
    type Item = &'a RangeEntry;
    type IntoIter = std::slice::Iter<'a, RangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
