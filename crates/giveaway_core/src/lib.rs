//! Giveaway core: pure entry-loop state machine and the domain rules it applies.
mod config;
mod effect;
mod filter;
mod ledger;
mod listing;
mod msg;
mod source;
mod stage;
mod state;
mod update;
mod view_model;

pub use config::FilterConfig;
pub use effect::{Effect, WaitReason};
pub use filter::is_eligible;
pub use ledger::PointsLedger;
pub use listing::Listing;
pub use msg::Msg;
pub use source::{ListingSource, Variant, SPECIAL_CATALOG};
pub use stage::StageSequencer;
pub use state::{CycleStats, EntryState, Phase};
pub use update::update;
pub use view_model::EntryView;
