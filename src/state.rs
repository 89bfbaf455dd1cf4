//! Session state and its transitions
//!
//! Everything the UI shows comes from [`SessionState`], and the only way to
//! change it is [`SessionState::apply`].

use serde::{Deserialize, Serialize};

use crate::analysis::{CompetitorSnapshot, HealthReport, ListingAdvice};
use crate::task::{TaskId, TaskState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Optimizer,
    Competitor,
    Pricing,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Optimizer, Page::Competitor, Page::Pricing];

    pub fn title(self) -> &'static str {
        match self {
            Page::Optimizer => "Optimizer",
            Page::Competitor => "Competitor",
            Page::Pricing => "Pricing",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Page::Optimizer => Page::Competitor,
            Page::Competitor => Page::Pricing,
            Page::Pricing => Page::Optimizer,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Page::Optimizer => Page::Pricing,
            Page::Competitor => Page::Optimizer,
            Page::Pricing => Page::Competitor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetPage(Page),
    SetText(String),
    InsertChar(char),
    InsertStr(String),
    DeleteBackward,
    ClearText,
    AnalyzerSubmitted(TaskId),
    AnalyzerResolved(TaskId, ListingAdvice),
    ScorerSubmitted(TaskId),
    ScorerResolved(TaskId, HealthReport),
    SnapshotGenerated(CompetitorSnapshot),
    SnapshotCleared,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub page: Page,
    pub listing_text: String,
    pub advice: TaskState<ListingAdvice>,
    pub health: TaskState<HealthReport>,
    pub snapshot: Option<CompetitorSnapshot>,
}

impl SessionState {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// True while any simulated analysis is in flight
    pub fn is_loading(&self) -> bool {
        self.advice.is_pending() || self.health.is_pending()
    }

    pub fn advice(&self) -> Option<&ListingAdvice> {
        self.advice.result()
    }

    pub fn health(&self) -> Option<&HealthReport> {
        self.health.result()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetPage(page) => {
                if page != self.page {
                    tracing::debug!("Page {:?} -> {:?}", self.page, page);
                }
                self.page = page;
            }
            Action::SetText(text) => self.listing_text = text,
            Action::InsertChar(c) => self.listing_text.push(c),
            Action::InsertStr(s) => {
                // Terminals deliver pasted newlines as CR or CRLF
                let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
                self.listing_text.push_str(&normalized);
            }
            Action::DeleteBackward => {
                self.listing_text.pop();
            }
            Action::ClearText => self.listing_text.clear(),

            // Submitting drops the previous result; the newest submission owns the slot
            Action::AnalyzerSubmitted(id) => self.advice = TaskState::Pending(id),
            Action::ScorerSubmitted(id) => self.health = TaskState::Pending(id),

            Action::AnalyzerResolved(id, advice) => {
                if !self.advice.resolve(id, advice) {
                    tracing::debug!("Ignoring stale TAI result {}", id);
                }
            }
            Action::ScorerResolved(id, report) => {
                if !self.health.resolve(id, report) {
                    tracing::debug!("Ignoring stale LHS result {}", id);
                }
            }

            Action::SnapshotGenerated(snapshot) => self.snapshot = Some(snapshot),
            Action::SnapshotCleared => self.snapshot = None,
        }
    }
}
