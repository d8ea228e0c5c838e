use crate::ListingSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchLanding,
    FetchPage {
        source: ListingSource,
        page: u32,
        point_max: u32,
    },
    SubmitEntry { code: String, xsrf_token: String },
    Wait { reason: WaitReason },
    /// Terminal: the credential was rejected.
    Halt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitReason {
    PointsExhausted,
    ListingsExhausted,
    NetworkFailure,
}
