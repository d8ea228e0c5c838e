use std::collections::VecDeque;

use crate::{EntryView, FilterConfig, Listing, PointsLedger, StageSequencer};

/// Where the entry loop is between two messages.
///
/// Filtering and stage advancement happen inside a single page transition
/// and are never observed as a resting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Refreshing,
    Listing,
    Entering,
    IdleWait,
    Fatal,
}

/// Counters for the current cycle; reset when a cycle begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleStats {
    pub pages: u32,
    pub entered: u32,
    pub skipped_for_points: u32,
    pub failed: u32,
    pub spent: u32,
    /// Listing rows that could not be decoded.
    pub parse_failures: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryState {
    pub(crate) config: FilterConfig,
    pub(crate) phase: Phase,
    pub(crate) xsrf_token: Option<String>,
    pub(crate) ledger: PointsLedger,
    pub(crate) stages: StageSequencer,
    pub(crate) page: u32,
    pub(crate) pending: VecDeque<Listing>,
    pub(crate) in_flight: Option<Listing>,
    pub(crate) stats: CycleStats,
}

impl EntryState {
    pub fn new(config: FilterConfig) -> Self {
        let stages = StageSequencer::new(config.variant);
        Self {
            config,
            phase: Phase::Refreshing,
            xsrf_token: None,
            ledger: PointsLedger::default(),
            stages,
            page: 1,
            pending: VecDeque::new(),
            in_flight: None,
            stats: CycleStats::default(),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn view(&self) -> EntryView {
        EntryView {
            phase: self.phase,
            balance: self.ledger.balance(),
            source: self.stages.current(),
            stage: self.stages.stage(),
            page: self.page,
            pending: self.pending.len(),
            stats: self.stats,
        }
    }

    pub(crate) fn begin_cycle(&mut self) {
        self.phase = Phase::Refreshing;
        self.stages.reset();
        self.page = 1;
        self.pending.clear();
        self.in_flight = None;
        self.stats = CycleStats::default();
    }
}
