//! Search controller: query store, view state and the single-flight request
//! orchestrator.
//!
//! Hosts with their own event loop drive the two halves separately:
//! [`SearchController::begin_submit`] validates the query, flips the view to
//! `Loading` and hands back a [`PendingSearch`]; the host runs the request
//! wherever it likes and feeds the outcome to [`SearchController::settle`].
//! Async hosts can call [`SearchController::submit`], which does both.
//!
//! Every dispatch carries a [`Generation`]. Only a settlement whose
//! generation matches the latest dispatch is applied, so a late response
//! from a superseded request can never overwrite newer state.

use shared::{domain::SearchWeights, protocol::AnalyzeRequest};
use tracing::{debug, info, warn};

use crate::{
    config::{ClientSettings, OverlapPolicy},
    error::SearchError,
    query::QueryStore,
    render::{self, Presentation, SubmitAffordance},
    transport::SearchBackend,
    view::{ResultSet, ViewState},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A dispatched search awaiting its settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSearch {
    pub generation: Generation,
    pub request: AnalyzeRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// A newer search was dispatched (or nothing is in flight); the outcome
    /// was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct SearchController {
    query: QueryStore,
    view: ViewState,
    latest: Generation,
    weights: SearchWeights,
    overlap_policy: OverlapPolicy,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(SearchWeights::default(), OverlapPolicy::default())
    }
}

impl SearchController {
    pub fn new(weights: SearchWeights, overlap_policy: OverlapPolicy) -> Self {
        Self {
            query: QueryStore::default(),
            view: ViewState::Idle,
            latest: Generation::default(),
            weights,
            overlap_policy,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.weights, settings.overlap_policy)
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query.set_query(text);
    }

    pub fn query(&self) -> &str {
        self.query.query()
    }

    pub fn query_mut(&mut self) -> &mut String {
        self.query.text_mut()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    /// Starts a search for the current query.
    ///
    /// Returns `None` without touching any state when the trimmed query is
    /// empty, or when a search is in flight and the policy is
    /// [`OverlapPolicy::Reject`].
    pub fn begin_submit(&mut self) -> Option<PendingSearch> {
        let Some(story) = self.query.submittable() else {
            debug!("ignoring submit for blank query");
            return None;
        };
        if self.view.is_loading() && self.overlap_policy == OverlapPolicy::Reject {
            debug!(
                generation = self.latest.get(),
                "ignoring submit while a search is in flight"
            );
            return None;
        }

        let request = AnalyzeRequest::new(story, self.weights);
        self.latest = self.latest.next();
        self.view = ViewState::Loading;
        info!(
            generation = self.latest.get(),
            query_len = request.story.len(),
            "search dispatched"
        );

        Some(PendingSearch {
            generation: self.latest,
            request,
        })
    }

    /// Applies the outcome of the search tagged `generation`, if it is still
    /// the one the view is waiting for.
    pub fn settle(
        &mut self,
        generation: Generation,
        outcome: Result<ResultSet, SearchError>,
    ) -> Settlement {
        if generation != self.latest || !self.view.is_loading() {
            debug!(
                generation = generation.get(),
                latest = self.latest.get(),
                "discarding stale search outcome"
            );
            return Settlement::Stale;
        }

        match &outcome {
            Ok(results) => info!(
                generation = generation.get(),
                results = results.len(),
                "search settled"
            ),
            Err(err) => warn!(
                generation = generation.get(),
                status = err.status(),
                "search failed: {err}"
            ),
        }
        self.view = ViewState::settled(outcome);
        Settlement::Applied
    }

    /// Validates, dispatches through `backend` and settles in one call.
    ///
    /// Returns `None` when the submit was ignored. If the returned future is
    /// dropped before the backend answers, the view still leaves `Loading`
    /// (as a cancelled search) so the next submit is accepted.
    pub async fn submit<B>(&mut self, backend: &B) -> Option<Settlement>
    where
        B: SearchBackend + ?Sized,
    {
        let pending = self.begin_submit()?;
        let mut guard = InFlight {
            controller: self,
            generation: pending.generation,
            settled: false,
        };
        let outcome = backend.analyze(&pending.request).await;
        Some(guard.settle(outcome))
    }

    pub fn presentation(&self) -> Presentation {
        render::present(&self.view, self.query.query())
    }

    pub fn submit_affordance(&self) -> SubmitAffordance {
        SubmitAffordance::for_view(&self.view, self.overlap_policy)
    }
}

/// Settles its generation on drop unless it was settled explicitly.
struct InFlight<'a> {
    controller: &'a mut SearchController,
    generation: Generation,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(&mut self, outcome: Result<ResultSet, SearchError>) -> Settlement {
        self.settled = true;
        self.controller.settle(self.generation, outcome)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.controller
                .settle(self.generation, Err(SearchError::Cancelled));
        }
    }
}
