//! Entries Buffer
//!
//! Append-only store of packed records, the only storage for parsed
//! structure. Element slots are reserved before their children are scanned
//! and patched once afterwards; nothing else is ever overwritten.

use super::entry::{ElementRecord, Entry, SpanRecord, MAX_ENTRIES};
use crate::options::DEFAULT_INITIAL_CAPACITY;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries {
    data: Vec<u64>,
}

impl Entries {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity.clamp(1, MAX_ENTRIES)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Packed records in buffer order
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.data
    }

    #[inline]
    pub fn raw(&self, index: usize) -> Option<u64> {
        self.data.get(index).copied()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Entry> {
        self.raw(index).map(Entry::decode)
    }

    /// Make room for slot `index`: double, or jump straight to `index + 1`.
    fn grow_for(&mut self, index: usize) {
        let capacity = self.data.capacity();
        if index < capacity {
            return;
        }
        let target = capacity.saturating_mul(2).max(index + 1).min(MAX_ENTRIES);
        log::trace!(target: "litexml::entries", "grow {} -> {}", capacity, target);
        self.data.reserve_exact(target - self.data.len());
    }

    /// Append a packed record. Returns its index, or `None` once the buffer
    /// holds [`MAX_ENTRIES`] records.
    pub fn push(&mut self, raw: u64) -> Option<usize> {
        let index = self.data.len();
        if index >= MAX_ENTRIES {
            return None;
        }
        self.grow_for(index);
        self.data.push(raw);
        Some(index)
    }

    pub fn push_span(&mut self, record: SpanRecord) -> Option<usize> {
        self.push(Entry::Span(record).encode())
    }

    /// Hold a slot for an element whose range is not known yet
    pub fn reserve_slot(&mut self) -> Option<usize> {
        self.push(0)
    }

    /// Fill a slot taken with [`Entries::reserve_slot`]. Returns false if
    /// `index` was never handed out.
    pub fn set_element(&mut self, index: usize, record: ElementRecord) -> bool {
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = Entry::Element(record).encode();
                true
            }
            None => false,
        }
    }

    /// Release over-allocated capacity once scanning is finished
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    pub fn iter(&self) -> impl Iterator<Item = Entry> + '_ {
        self.data.iter().copied().map(Entry::decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::entry::RecordKind;

    #[test]
    fn test_push_and_get() {
        let mut entries = Entries::new();
        assert!(entries.is_empty());
        assert_eq!(entries.push_span(SpanRecord::name(1, 2)), Some(0));
        assert_eq!(entries.push_span(SpanRecord::content(3, 8)), Some(1));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get(1), Some(Entry::Span(SpanRecord::content(3, 8))));
        assert_eq!(entries.get(2), None);
    }

    #[test]
    fn test_reserve_then_patch() {
        let mut entries = Entries::new();
        let slot = entries.reserve_slot().unwrap();
        entries.push_span(SpanRecord::name(1, 2)).unwrap();
        assert!(entries.set_element(slot, ElementRecord::tag(2, 2, false)));
        assert_eq!(entries.get(slot).map(|e| e.kind()), Some(RecordKind::Tag));
        assert!(!entries.set_element(9, ElementRecord::tag(0, 0, false)));
    }

    #[test]
    fn test_growth_doubles() {
        let mut entries = Entries::with_capacity(4);
        assert!(entries.capacity() >= 4);
        for i in 0..5 {
            entries.push_span(SpanRecord::name(i, i)).unwrap();
        }
        assert!(entries.capacity() >= 8);
        assert_eq!(entries.len(), 5);
        let starts: Vec<_> = entries
            .iter()
            .filter_map(|e| e.as_span())
            .map(|s| s.start)
            .collect();
        assert_eq!(starts, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_capacity_still_usable() {
        let mut entries = Entries::with_capacity(0);
        assert_eq!(entries.reserve_slot(), Some(0));
    }
}
