//! Giveaway engine: site IO and the driver that runs the entry loop.
mod engine;
mod fetch;
mod parse;
mod types;

pub use engine::{EntryEngine, LoopTimings};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use parse::{
    parse_cost, parse_entry_response, parse_landing, parse_listings, EntryResponse, SessionInfo,
};
pub use types::{EngineError, FailureKind, FetchError, ListingParseError, SessionError};
