use std::collections::VecDeque;
use std::convert::Infallible;
use std::time::Duration;

use engine_logging::{engine_error, engine_info, engine_warn};
use giveaway_core::{update, Effect, EntryState, EntryView, FilterConfig, Msg, WaitReason};
use url::Url;

use crate::{parse_entry_response, parse_landing, parse_listings, EngineError, FailureKind, Fetcher};

/// Pauses the loop takes between steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopTimings {
    /// After every entry submission, successful or not.
    pub entry_pause: Duration,
    pub no_listings_wait: Duration,
    pub no_points_wait: Duration,
    pub network_failure_wait: Duration,
}

impl Default for LoopTimings {
    fn default() -> Self {
        Self {
            entry_pause: Duration::from_secs(5),
            no_listings_wait: Duration::from_secs(120),
            no_points_wait: Duration::from_secs(900),
            network_failure_wait: Duration::from_secs(120),
        }
    }
}

impl LoopTimings {
    /// No pauses at all.
    pub fn immediate() -> Self {
        Self {
            entry_pause: Duration::ZERO,
            no_listings_wait: Duration::ZERO,
            no_points_wait: Duration::ZERO,
            network_failure_wait: Duration::ZERO,
        }
    }

    pub fn wait_for(&self, reason: WaitReason) -> Duration {
        match reason {
            WaitReason::PointsExhausted => self.no_points_wait,
            WaitReason::ListingsExhausted => self.no_listings_wait,
            WaitReason::NetworkFailure => self.network_failure_wait,
        }
    }
}

/// Drives the entry loop: executes each effect against the site and feeds
/// the outcome back into the state machine, one step at a time.
pub struct EntryEngine<F> {
    fetcher: F,
    base: Url,
    timings: LoopTimings,
    state: EntryState,
    cycle: u64,
}

impl<F: Fetcher> EntryEngine<F> {
    pub fn new(fetcher: F, base: Url, config: FilterConfig, timings: LoopTimings) -> Self {
        Self {
            fetcher,
            base,
            timings,
            state: EntryState::new(config),
            cycle: 0,
        }
    }

    pub fn view(&self) -> EntryView {
        self.state.view()
    }

    /// Runs cycles forever. Only a rejected credential ends the loop.
    pub async fn run(&mut self) -> Result<Infallible, EngineError> {
        loop {
            let reason = self.run_cycle().await?;
            let delay = self.timings.wait_for(reason);
            let wake_at = chrono::Local::now()
                + chrono::Duration::from_std(delay).unwrap_or_else(|_| chrono::Duration::zero());
            match reason {
                WaitReason::PointsExhausted => engine_warn!(
                    "Sleeping to get more points. We have {} points, but we need {} to start; sleeping {}s (until {})",
                    self.state.view().balance,
                    self.state.config().min_points,
                    delay.as_secs(),
                    wake_at.format("%H:%M:%S")
                ),
                WaitReason::ListingsExhausted => engine_warn!(
                    "No more listings to enter, sleeping {}s (until {})",
                    delay.as_secs(),
                    wake_at.format("%H:%M:%S")
                ),
                WaitReason::NetworkFailure => engine_warn!(
                    "Site unreachable, sleeping {}s (until {})",
                    delay.as_secs(),
                    wake_at.format("%H:%M:%S")
                ),
            }
            tokio::time::sleep(delay).await;
        }
    }

    /// Runs one full cycle, from session refresh up to the point where the
    /// loop wants to wait. Returns why it wants to wait.
    pub async fn run_cycle(&mut self) -> Result<WaitReason, EngineError> {
        let mut queue: VecDeque<Effect> = update(&mut self.state, Msg::BeginCycle).into();
        while let Some(effect) = queue.pop_front() {
            let msg = match effect {
                Effect::Wait { reason } => return Ok(reason),
                Effect::Halt => return Err(EngineError::InvalidCredential),
                Effect::FetchLanding => self.refresh_session().await,
                Effect::FetchPage {
                    source,
                    page,
                    point_max,
                } => {
                    let url = source.search_url(&self.base, page, point_max);
                    engine_info!("Retrieving {} listings from page {}...", source, page);
                    self.load_page(&url).await
                }
                Effect::SubmitEntry { code, xsrf_token } => {
                    let msg = self.submit_entry(code, &xsrf_token).await;
                    if !self.timings.entry_pause.is_zero() {
                        tokio::time::sleep(self.timings.entry_pause).await;
                    }
                    msg
                }
            };
            queue.extend(update(&mut self.state, msg));
        }
        Err(EngineError::Stalled)
    }

    async fn refresh_session(&mut self) -> Msg {
        self.cycle += 1;
        engine_logging::set_cycle(self.cycle);
        match self.fetcher.get(&self.base).await {
            Ok(body) => match parse_landing(&body) {
                Ok(info) => Msg::SessionRefreshed {
                    xsrf_token: info.xsrf_token,
                    points: info.points,
                },
                Err(err) => {
                    engine_error!("Landing page rejected the session: {}", err);
                    Msg::SessionRejected
                }
            },
            Err(err) => Msg::NetworkFailed {
                message: err.to_string(),
            },
        }
    }

    async fn load_page(&self, url: &Url) -> Msg {
        match self.fetcher.get(url).await {
            Ok(body) => {
                let (listings, malformed) = listings_from_page(&body);
                Msg::PageLoaded {
                    listings,
                    malformed,
                }
            }
            Err(err) => Msg::NetworkFailed {
                message: err.to_string(),
            },
        }
    }

    async fn submit_entry(&self, code: String, xsrf_token: &str) -> Msg {
        let mut url = self.base.clone();
        url.set_path("/ajax.php");
        url.set_query(None);
        let form = [
            ("xsrf_token", xsrf_token),
            ("do", "entry_insert"),
            ("code", code.as_str()),
        ];
        let accepted = match self.fetcher.post_form(&url, &form).await {
            Ok(body) => match parse_entry_response(&body) {
                Ok(response) => {
                    if !response.is_success() {
                        engine_warn!(
                            "Entry {} answered {:?}: {}",
                            code,
                            response.kind,
                            response.msg.as_deref().unwrap_or("no message")
                        );
                    }
                    response.is_success()
                }
                Err(err) => {
                    engine_warn!("Entry {} answered with unreadable JSON: {}", code, err);
                    false
                }
            },
            Err(err) if matches!(err.kind, FailureKind::HttpStatus(_)) => {
                engine_warn!("Entry {} was refused: {}", code, err);
                false
            }
            Err(err) => {
                return Msg::NetworkFailed {
                    message: err.to_string(),
                }
            }
        };
        Msg::EntrySubmitted { code, accepted }
    }
}

/// Decoded listings of a page, plus how many rows were skipped as malformed.
fn listings_from_page(body: &str) -> (Vec<giveaway_core::Listing>, u32) {
    let mut malformed = 0;
    let listings = parse_listings(body)
        .into_iter()
        .enumerate()
        .filter_map(|(index, parsed)| match parsed {
            Ok(listing) => Some(listing),
            Err(err) => {
                engine_warn!("Skipping listing #{} on page: {}", index + 1, err);
                malformed += 1;
                None
            }
        })
        .collect();
    (listings, malformed)
}
