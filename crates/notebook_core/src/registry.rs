use std::cmp::Reverse;

/// Slot number of a page within one application's notebook.
pub type PageIndex = usize;

/// Unix time in milliseconds; `0` means the page was never saved.
pub type Timestamp = i64;

/// Page metadata as reported by the store's listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub page: PageIndex,
    pub timestamp: Timestamp,
    pub empty: bool,
}

/// One entry of the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEntry {
    pub index: PageIndex,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    timestamp: Timestamp,
    empty: bool,
}

impl Slot {
    const EMPTY: Slot = Slot {
        timestamp: 0,
        empty: true,
    };

    fn freshness(&self) -> Timestamp {
        if self.empty {
            0
        } else {
            self.timestamp
        }
    }
}

/// Fixed-capacity list of page slots; slot `i` always describes page `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRegistry {
    slots: Vec<Slot>,
}

impl PageRegistry {
    pub fn new(max_pages: usize) -> Self {
        Self {
            slots: vec![Slot::EMPTY; max_pages],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, index: PageIndex) -> bool {
        index < self.slots.len()
    }

    /// Recomputes every slot from a store listing. Pages missing from the listing are empty.
    pub fn refresh_labels(&mut self, remote: &[PageMeta]) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            *slot = match remote.iter().find(|meta| meta.page == index) {
                Some(meta) if !meta.empty && meta.timestamp > 0 => Slot {
                    timestamp: meta.timestamp,
                    empty: false,
                },
                _ => Slot::EMPTY,
            };
        }
    }

    /// Records a successful save. A cleared page shows as empty.
    pub fn mark_saved(&mut self, index: PageIndex, timestamp: Timestamp, empty: bool) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot { timestamp, empty };
        }
    }

    pub fn clear(&mut self, index: PageIndex) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::EMPTY;
        }
    }

    pub fn freshness(&self, index: PageIndex) -> Option<Timestamp> {
        self.slots.get(index).map(Slot::freshness)
    }

    /// Newest first; equal freshness (including all empty pages) by ascending index.
    pub fn sort_for_display(&self) -> Vec<PageEntry> {
        let mut entries: Vec<PageEntry> = self
            .slots
            .iter()
            .enumerate()
            .map(|(index, slot)| PageEntry {
                index,
                timestamp: slot.freshness(),
            })
            .collect();
        entries.sort_by_key(|entry| (Reverse(entry.timestamp), entry.index));
        entries
    }
}
