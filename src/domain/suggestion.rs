//! Reduced views over scored tasks.

use serde::Serialize;
use std::fmt;

use super::task::CanonicalTask;

/// Coarse bucket for a priority score, used by human-readable listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Bucket a score. Anything above 1.0 can only come from an overdue task.
    pub fn from_score(score: f64) -> Self {
        if score > 1.5 {
            PriorityLevel::Critical
        } else if score > 1.0 {
            PriorityLevel::High
        } else if score > 0.5 {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriorityLevel::Critical => "critical",
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
        };
        f.write_str(name)
    }
}

/// One entry of the `suggest` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: String,
    pub title: Option<String>,
    /// Rounded to 2 decimal places
    pub priority_score: f64,
    pub explanation: String,
}

impl Suggestion {
    pub fn from_task(task: &CanonicalTask) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            priority_score: round_2dp(task.priority_score.unwrap_or(0.0)),
            explanation: task.explanation.clone().unwrap_or_default(),
        }
    }
}

/// Round the stored binary value to 2 decimal places, ties to even.
fn round_2dp(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
