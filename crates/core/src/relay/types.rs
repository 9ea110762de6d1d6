//! Relay cycle result types.

use std::fmt;

use serde::Serialize;

/// Pipeline step at which a cycle stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStage {
    Search,
    Publish,
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleStage::Search => write!(f, "search"),
            CycleStage::Publish => write!(f, "publish"),
        }
    }
}

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// A submission was posted.
    Published { id: String, status_id: String },
    /// No unseen submission met the score requirements.
    NoCandidate,
    /// The selected submission lacked the data needed for a post.
    Rejected { id: String },
    /// A step failed; the history update (if any) is kept.
    Failed { stage: CycleStage, error: String },
}

impl CycleOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, CycleOutcome::Published { .. })
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleOutcome::Published { id, status_id } => {
                write!(f, "published submission {} as status {}", id, status_id)
            }
            CycleOutcome::NoCandidate => write!(f, "no valid submissions"),
            CycleOutcome::Rejected { id } => write!(f, "submission {} rejected", id),
            CycleOutcome::Failed { stage, error } => write!(f, "{} failed: {}", stage, error),
        }
    }
}
