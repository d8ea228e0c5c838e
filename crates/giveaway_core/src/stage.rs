use crate::{ListingSource, Variant};

/// Walks the ordered sources of a variant, one stage per exhausted source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSequencer {
    sources: Vec<ListingSource>,
    stage: usize,
}

impl StageSequencer {
    pub fn new(variant: Variant) -> Self {
        Self {
            sources: variant.sources(),
            stage: 0,
        }
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn current(&self) -> ListingSource {
        // `sources` is never empty and `stage` never passes its last index.
        self.sources[self.stage]
    }

    /// Moves to the next source. Returns `false` once every stage is spent,
    /// leaving the position on the last one.
    pub fn advance(&mut self) -> bool {
        if self.stage + 1 < self.sources.len() {
            self.stage += 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.stage = 0;
    }
}
