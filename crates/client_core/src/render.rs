//! Pure projection of the view state into display fields.

use std::fmt;

use shared::protocol::StoryResult;

use crate::{config::OverlapPolicy, view::ViewState};

pub const NO_RESULTS: &str = "No results found";
pub const SEARCH_LABEL: &str = "Search";
pub const SEARCHING_LABEL: &str = "Searching...";

/// What the results area shows. Exactly one variant is ever on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// Nothing yet, or the query was cleared after an empty search.
    Blank,
    Loading,
    Error(String),
    NoResults,
    Results {
        heading: String,
        cards: Vec<ResultCard>,
    },
}

/// Display lines for one ranked story. Optional lines are `None` when the
/// backend left the field out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub heading: String,
    pub score_line: Option<String>,
    pub role_line: Option<String>,
    pub goal_line: Option<String>,
    pub body: String,
    pub rationale_line: Option<String>,
}

impl ResultCard {
    pub fn from_result(result: &StoryResult) -> Self {
        let heading = present_text(&result.title)
            .unwrap_or(result.story_id.as_str())
            .to_string();

        Self {
            heading,
            score_line: result
                .hybrid_score
                .map(|score| format!("Match Score: {}", format_match_score(score))),
            role_line: present_text(&result.role).map(|role| format!("Role: {role}")),
            goal_line: present_text(&result.goal).map(|goal| format!("Goal: {goal}")),
            body: result.normalized_story.clone(),
            rationale_line: present_text(&result.rationale)
                .map(|rationale| format!("Relevance: {rationale}")),
        }
    }

    /// Lines in display order, skipping absent fields.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.heading.as_str()),
            self.score_line.as_deref(),
            self.role_line.as_deref(),
            self.goal_line.as_deref(),
            Some(self.body.as_str()),
            self.rationale_line.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, line) in self.lines().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// An empty string counts as absent.
fn present_text(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.is_empty())
}

/// `0.456` renders as `45.6%`. Exact halves round up (`0.1225` is `12.3%`).
pub fn format_match_score(score: f64) -> String {
    let pct = score * 100.0;
    // A percentage sits exactly between two tenths only when it ends in .25
    // or .75; `{:.1}` would round those to even.
    let quarters = pct * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}%", (pct * 10.0).ceil() / 10.0);
    }
    format!("{pct:.1}%")
}

pub fn results_heading(count: usize) -> String {
    format!("Results ({count})")
}

pub fn present(view: &ViewState, query: &str) -> Presentation {
    match view {
        ViewState::Idle => Presentation::Blank,
        ViewState::Loading => Presentation::Loading,
        ViewState::Error(message) => Presentation::Error(message.clone()),
        ViewState::Loaded(results) if results.is_empty() => {
            if query.is_empty() {
                Presentation::Blank
            } else {
                Presentation::NoResults
            }
        }
        ViewState::Loaded(results) => Presentation::Results {
            heading: results_heading(results.len()),
            cards: results.iter().map(ResultCard::from_result).collect(),
        },
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Loading => f.write_str(SEARCHING_LABEL),
            Self::Error(message) => f.write_str(message),
            Self::NoResults => f.write_str(NO_RESULTS),
            Self::Results { heading, cards } => {
                f.write_str(heading)?;
                for card in cards {
                    write!(f, "\n\n{card}")?;
                }
                Ok(())
            }
        }
    }
}

/// State of the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitAffordance {
    pub label: &'static str,
    pub enabled: bool,
}

impl SubmitAffordance {
    pub fn for_view(view: &ViewState, overlap_policy: OverlapPolicy) -> Self {
        if view.is_loading() {
            Self {
                label: SEARCHING_LABEL,
                enabled: overlap_policy == OverlapPolicy::Supersede,
            }
        } else {
            Self {
                label: SEARCH_LABEL,
                enabled: true,
            }
        }
    }
}
