use crate::{CycleStats, ListingSource, Phase};

/// Read-only snapshot of the entry loop for status lines and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryView {
    pub phase: Phase,
    pub balance: u32,
    pub source: ListingSource,
    pub stage: usize,
    /// Next page to fetch for the current source.
    pub page: u32,
    pub pending: usize,
    pub stats: CycleStats,
}
