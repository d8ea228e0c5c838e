use crate::Listing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Start of a full cycle: initial start or an idle wait that elapsed.
    BeginCycle,
    /// Landing page yielded the anti-forgery token and current points.
    SessionRefreshed { xsrf_token: String, points: u32 },
    /// Landing page had no token or no points: the credential is not valid.
    SessionRejected,
    /// One listing page, already parsed. Malformed rows are dropped upstream
    /// and only counted.
    PageLoaded {
        listings: Vec<Listing>,
        malformed: u32,
    },
    /// Result of one entry submission.
    EntrySubmitted { code: String, accepted: bool },
    /// A fetch failed after the fetcher's own retries.
    NetworkFailed { message: String },
}
