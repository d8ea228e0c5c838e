use engine_logging::{engine_error, engine_info, engine_success, engine_warn};

use crate::{is_eligible, Effect, EntryState, Msg, Phase, WaitReason};

/// Applies one message to the entry loop and returns the effects to run next.
///
/// Messages that do not fit the current phase are dropped without effects.
/// Once the state is [`Phase::Fatal`] every message answers with
/// [`Effect::Halt`].
pub fn update(state: &mut EntryState, msg: Msg) -> Vec<Effect> {
    if state.phase == Phase::Fatal {
        return vec![Effect::Halt];
    }

    match msg {
        Msg::BeginCycle => {
            state.begin_cycle();
            vec![Effect::FetchLanding]
        }
        Msg::SessionRefreshed { xsrf_token, points } => {
            if state.phase != Phase::Refreshing {
                return Vec::new();
            }
            state.xsrf_token = Some(xsrf_token);
            state.ledger.refresh(points);
            on_refreshed(state)
        }
        Msg::SessionRejected => {
            engine_error!("Cookie is not valid; the session could not be refreshed");
            state.phase = Phase::Fatal;
            state.pending.clear();
            vec![Effect::Halt]
        }
        Msg::PageLoaded {
            listings,
            malformed,
        } => {
            if state.phase != Phase::Listing {
                return Vec::new();
            }
            state.stats.parse_failures += malformed;
            on_page_loaded(state, listings)
        }
        Msg::EntrySubmitted { code, accepted } => {
            if state.phase != Phase::Entering {
                return Vec::new();
            }
            on_entry_submitted(state, &code, accepted)
        }
        Msg::NetworkFailed { message } => {
            engine_warn!("Network failure, abandoning this cycle: {}", message);
            state.pending.clear();
            state.in_flight = None;
            state.phase = Phase::IdleWait;
            vec![Effect::Wait {
                reason: WaitReason::NetworkFailure,
            }]
        }
    }
}

fn on_refreshed(state: &mut EntryState) -> Vec<Effect> {
    let balance = state.ledger.balance();
    let minimum = state.config.min_points;
    if !state.ledger.has_minimum(minimum) {
        state.phase = Phase::IdleWait;
        return vec![Effect::Wait {
            reason: WaitReason::PointsExhausted,
        }];
    }
    engine_info!("Starting a cycle with {} points", balance);
    state.phase = Phase::Listing;
    vec![fetch_current_page(state)]
}

fn on_page_loaded(state: &mut EntryState, listings: Vec<crate::Listing>) -> Vec<Effect> {
    let total = listings.len();
    let eligible: Vec<_> = listings
        .into_iter()
        .filter(|listing| is_eligible(listing, &state.config))
        .collect();
    state.stats.pages += 1;

    if eligible.is_empty() {
        engine_info!(
            "No eligible listings on page {} of {} ({} parsed)",
            state.page,
            state.stages.current(),
            total
        );
        if state.stages.advance() {
            state.page = 1;
            engine_info!(
                "Advancing to stage {} ({})",
                state.stages.stage(),
                state.stages.current()
            );
            return vec![fetch_current_page(state)];
        }
        state.phase = Phase::IdleWait;
        return vec![Effect::Wait {
            reason: WaitReason::ListingsExhausted,
        }];
    }

    engine_info!(
        "Found {} eligible listings on page {} ({} parsed)",
        eligible.len(),
        state.page,
        total
    );
    state.page += 1;
    state.pending = eligible.into();
    state.phase = Phase::Entering;
    next_entry(state)
}

fn on_entry_submitted(state: &mut EntryState, code: &str, accepted: bool) -> Vec<Effect> {
    let Some(listing) = state.in_flight.take() else {
        engine_warn!("Entry result for {} arrived with nothing in flight", code);
        return next_entry(state);
    };
    if listing.id != code {
        engine_warn!("Entry result for {} does not match {}", code, listing.id);
    }

    if accepted && state.ledger.spend(listing.cost) {
        state.stats.entered += 1;
        state.stats.spent += listing.cost;
        engine_success!(
            "Entered {} for {} points. Points left: {}",
            listing.name,
            listing.cost,
            state.ledger.balance()
        );
    } else {
        state.stats.failed += 1;
        engine_warn!("Failed to enter {}", listing.name);
    }
    next_entry(state)
}

/// Picks the next affordable listing of the current page, or moves on to the
/// next page once the page is drained.
fn next_entry(state: &mut EntryState) -> Vec<Effect> {
    while let Some(listing) = state.pending.pop_front() {
        if !state.ledger.has_minimum(state.config.min_points) {
            engine_info!(
                "Balance {} fell below the minimum of {}, refreshing",
                state.ledger.balance(),
                state.config.min_points
            );
            state.pending.clear();
            state.stages.reset();
            state.page = 1;
            state.phase = Phase::Refreshing;
            return vec![Effect::FetchLanding];
        }
        if !state.ledger.can_afford(listing.cost) {
            state.stats.skipped_for_points += 1;
            engine_info!(
                "Not enough points to enter {} ({} points needed, {} left), skipping",
                listing.name,
                listing.cost,
                state.ledger.balance()
            );
            continue;
        }
        // A session is always present once a page has been requested.
        let Some(xsrf_token) = state.xsrf_token.clone() else {
            state.phase = Phase::Refreshing;
            return vec![Effect::FetchLanding];
        };
        let code = listing.id.clone();
        state.in_flight = Some(listing);
        return vec![Effect::SubmitEntry { code, xsrf_token }];
    }

    state.phase = Phase::Listing;
    vec![fetch_current_page(state)]
}

fn fetch_current_page(state: &EntryState) -> Effect {
    Effect::FetchPage {
        source: state.stages.current(),
        page: state.page,
        point_max: state.ledger.balance(),
    }
}
