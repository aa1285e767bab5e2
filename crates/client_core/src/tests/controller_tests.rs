use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{SearchWeights, StoryId},
    protocol::{AnalyzeRequest, StoryResult},
};
use tokio::sync::Notify;

use crate::{
    config::OverlapPolicy,
    controller::{SearchController, Settlement},
    error::SearchError,
    render::Presentation,
    transport::SearchBackend,
    view::{ResultSet, ViewState},
};

#[derive(Default)]
struct ScriptedBackend {
    outcomes: Mutex<VecDeque<Result<ResultSet, SearchError>>>,
    requests: Mutex<Vec<AnalyzeRequest>>,
}

impl ScriptedBackend {
    fn replying(outcomes: Vec<Result<ResultSet, SearchError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<AnalyzeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<ResultSet, SearchError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SearchError::Transport("no scripted outcome".into())))
    }
}

/// Never answers until `release` is notified.
#[derive(Default)]
struct GatedBackend {
    release: Arc<Notify>,
}

#[async_trait]
impl SearchBackend for GatedBackend {
    async fn analyze(&self, _request: &AnalyzeRequest) -> Result<ResultSet, SearchError> {
        self.release.notified().await;
        Ok(Vec::new())
    }
}

fn story(id: &str, text: &str) -> StoryResult {
    StoryResult {
        story_id: StoryId::from(id),
        title: None,
        normalized_story: text.to_string(),
        role: None,
        goal: None,
        hybrid_score: None,
        rationale: None,
    }
}

fn controller(policy: OverlapPolicy) -> SearchController {
    SearchController::new(SearchWeights::default(), policy)
}

#[tokio::test]
async fn blank_queries_neither_transition_nor_dispatch() {
    let backend = ScriptedBackend::default();
    let mut controller = controller(OverlapPolicy::Reject);

    for blank in ["", "   ", "\t\n "] {
        controller.set_query(blank);
        assert_eq!(controller.submit(&backend).await, None);
        assert_eq!(controller.view(), &ViewState::Idle);
    }

    assert!(backend.requests().is_empty());
    assert_eq!(controller.latest_generation().get(), 0);
}

#[tokio::test]
async fn blank_submit_keeps_previous_results_on_screen() {
    let backend = ScriptedBackend::replying(vec![Ok(vec![story("S1", "As a nurse...")])]);
    let mut controller = controller(OverlapPolicy::Reject);

    controller.set_query("diabetes");
    controller.submit(&backend).await;
    let before = controller.view().clone();

    controller.set_query("  ");
    assert_eq!(controller.submit(&backend).await, None);
    assert_eq!(controller.view(), &before);
    assert_eq!(backend.requests().len(), 1);
}

#[test]
fn begin_submit_enters_loading_with_trimmed_weighted_request() {
    let mut controller = controller(OverlapPolicy::Reject);
    controller.set_query("  diabetes screening \n");

    let pending = controller.begin_submit().expect("dispatch");

    assert!(controller.is_loading());
    assert_eq!(controller.presentation(), Presentation::Loading);
    assert_eq!(
        pending.request,
        AnalyzeRequest {
            story: "diabetes screening".into(),
            vector_weight: 0.7,
            bm25_weight: 0.3,
        }
    );
    assert_eq!(pending.generation, controller.latest_generation());
    assert_eq!(controller.query(), "  diabetes screening \n");
}

#[tokio::test]
async fn successful_submit_loads_results_in_backend_order() {
    let results = vec![story("S2", "second"), story("S1", "first")];
    let backend = ScriptedBackend::replying(vec![Ok(results.clone())]);
    let mut controller = controller(OverlapPolicy::Reject);

    controller.set_query("screening");
    assert_eq!(controller.submit(&backend).await, Some(Settlement::Applied));

    assert_eq!(controller.view(), &ViewState::Loaded(results));
    assert_eq!(backend.requests()[0].story, "screening");
}

#[tokio::test]
async fn failed_submit_shows_message_and_preserves_query() {
    let backend = ScriptedBackend::replying(vec![Err(SearchError::Request {
        status: 500,
        message: "Analysis failed".into(),
    })]);
    let mut controller = controller(OverlapPolicy::Reject);

    controller.set_query("diabetes screening");
    controller.submit(&backend).await;

    assert_eq!(controller.view(), &ViewState::Error("Analysis failed".into()));
    assert_eq!(controller.query(), "diabetes screening");
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn next_submit_clears_previous_error() {
    let backend = ScriptedBackend::replying(vec![
        Err(SearchError::Transport("connection refused".into())),
        Ok(vec![story("S1", "As a nurse...")]),
    ]);
    let mut controller = controller(OverlapPolicy::Reject);
    controller.set_query("diabetes");

    controller.submit(&backend).await;
    assert_eq!(controller.view().error(), Some("connection refused"));

    let pending = controller.begin_submit().expect("retry allowed after failure");
    assert_eq!(controller.view().error(), None);
    controller.settle(pending.generation, Ok(vec![story("S1", "As a nurse...")]));
    assert_eq!(controller.view().results().map(<[_]>::len), Some(1));
}

#[test]
fn reject_policy_ignores_submit_while_loading() {
    let mut controller = controller(OverlapPolicy::Reject);
    controller.set_query("first");
    let first = controller.begin_submit().expect("first dispatch");

    controller.set_query("second");
    assert_eq!(controller.begin_submit(), None);
    assert_eq!(controller.latest_generation(), first.generation);

    assert_eq!(
        controller.settle(first.generation, Ok(vec![story("S1", "one")])),
        Settlement::Applied
    );
    assert_eq!(controller.view().results().map(<[_]>::len), Some(1));
}

#[test]
fn supersede_policy_discards_stale_response() {
    let mut controller = controller(OverlapPolicy::Supersede);
    controller.set_query("first");
    let first = controller.begin_submit().expect("first dispatch");
    controller.set_query("second");
    let second = controller.begin_submit().expect("second dispatch");
    assert!(second.generation > first.generation);

    let newer = vec![story("S2", "newer")];
    assert_eq!(
        controller.settle(second.generation, Ok(newer.clone())),
        Settlement::Applied
    );
    assert_eq!(
        controller.settle(first.generation, Ok(vec![story("S1", "older")])),
        Settlement::Stale
    );
    assert_eq!(controller.view(), &ViewState::Loaded(newer));
}

#[test]
fn stale_response_cannot_end_newer_loading_state() {
    let mut controller = controller(OverlapPolicy::Supersede);
    controller.set_query("first");
    let first = controller.begin_submit().expect("first dispatch");
    controller.begin_submit().expect("second dispatch");

    assert_eq!(
        controller.settle(first.generation, Err(SearchError::Transport("late".into()))),
        Settlement::Stale
    );
    assert!(controller.is_loading());
}

#[test]
fn settling_twice_is_stale() {
    let mut controller = controller(OverlapPolicy::Reject);
    controller.set_query("query");
    let pending = controller.begin_submit().expect("dispatch");

    assert_eq!(
        controller.settle(pending.generation, Ok(Vec::new())),
        Settlement::Applied
    );
    assert_eq!(
        controller.settle(pending.generation, Err(SearchError::Cancelled)),
        Settlement::Stale
    );
    assert_eq!(controller.view(), &ViewState::Loaded(Vec::new()));
}

#[tokio::test]
async fn dropped_submit_future_still_leaves_loading() {
    let backend = GatedBackend::default();
    let mut controller = controller(OverlapPolicy::Reject);
    controller.set_query("slow query");

    let timed_out =
        tokio::time::timeout(Duration::from_millis(50), controller.submit(&backend)).await;
    assert!(timed_out.is_err());

    assert_eq!(controller.view(), &ViewState::Error("Search cancelled".into()));
    assert!(controller.begin_submit().is_some());
}

#[tokio::test]
async fn gated_backend_settles_once_released() {
    let backend = GatedBackend::default();
    let release = backend.release.clone();
    let mut controller = controller(OverlapPolicy::Reject);
    controller.set_query("slow query");

    let releaser = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        release.notify_one();
    });
    assert_eq!(controller.submit(&backend).await, Some(Settlement::Applied));
    releaser.await.expect("releaser");

    assert_eq!(controller.view(), &ViewState::Loaded(Vec::new()));
    assert_eq!(controller.presentation(), Presentation::NoResults);
}

#[tokio::test]
async fn identical_submissions_are_idempotent() {
    let results = vec![story("S1", "As a nurse..."), story("S7", "As a clerk...")];
    let backend = ScriptedBackend::replying(vec![Ok(results.clone()), Ok(results)]);
    let mut controller = controller(OverlapPolicy::Reject);
    controller.set_query("diabetes screening");

    controller.submit(&backend).await;
    let first_view = controller.view().clone();
    let first_presentation = controller.presentation();

    controller.submit(&backend).await;
    assert_eq!(controller.view(), &first_view);
    assert_eq!(controller.presentation(), first_presentation);

    let requests = backend.requests();
    assert_eq!(requests[0], requests[1]);
}
