//! The structured output of a completed dialogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A derived sub-goal with a textual deadline estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// One metric's text, verbatim.
    pub title: String,
    /// Cumulative progress and day offset, e.g. "33% - 60 days".
    pub deadline: String,
    /// Placeholder until the user fills these in elsewhere.
    pub tasks: Vec<String>,
}

/// The finalized goal record emitted once all four steps are answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDraft {
    /// The goal text with its first letter capitalized.
    pub goal: String,
    pub vision: String,
    /// Individual metric items, split from the raw metrics answer.
    pub metrics: Vec<String>,
    /// The raw timeline answer.
    pub timeline: String,
    pub milestones: Vec<Milestone>,
    pub created_at: DateTime<Utc>,
}
