//! The two operations exposed to callers.
//!
//! - `analyze`: normalize, score and sort the whole batch
//! - `suggest`: the top entries of the smart ordering, reduced to id, title,
//!   rounded score and explanation
//!
//! Both fail the whole batch on the first error; no partial result is returned.

use clap::ValueEnum;
use log::info;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

use crate::domain::{CanonicalTask, PriorityLevel, Suggestion};
use crate::error::Result;
use crate::normalize::normalize_document;
use crate::scoring::PriorityEngine;

/// Default number of entries returned by `suggest`.
pub const DEFAULT_SUGGEST_LIMIT: usize = 3;

/// Ordering applied to the analyze output. All orderings are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortStrategy {
    /// Priority score, highest first
    #[default]
    Smart,
    /// Estimated hours, smallest first
    Fastest,
    /// Importance, highest first
    HighImpact,
    /// Due date, earliest first; undated tasks last
    Deadline,
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortStrategy::Smart => "smart",
            SortStrategy::Fastest => "fastest",
            SortStrategy::HighImpact => "high-impact",
            SortStrategy::Deadline => "deadline",
        };
        f.write_str(name)
    }
}

/// Parse a JSON document.
pub fn parse_document(input: &str) -> Result<Value> {
    Ok(serde_json::from_str(input)?)
}

/// Normalize and score a batch, keeping input order.
pub fn score_document(document: &Value, engine: &PriorityEngine) -> Result<Vec<CanonicalTask>> {
    let mut tasks = normalize_document(document)?;
    engine.score_batch(&mut tasks);
    Ok(tasks)
}

/// Full scored batch, ordered by `strategy`.
pub fn analyze(document: &Value, engine: &PriorityEngine, strategy: SortStrategy) -> Result<Vec<CanonicalTask>> {
    let mut tasks = score_document(document, engine)?;
    sort_tasks(&mut tasks, strategy);
    info!("Analyzed {} tasks using {} ordering", tasks.len(), strategy);
    Ok(tasks)
}

/// The `limit` highest-priority tasks.
pub fn suggest(document: &Value, engine: &PriorityEngine, limit: usize) -> Result<Vec<Suggestion>> {
    let mut tasks = score_document(document, engine)?;
    sort_tasks(&mut tasks, SortStrategy::Smart);
    let suggestions: Vec<Suggestion> = tasks.iter().take(limit).map(Suggestion::from_task).collect();
    info!("Suggested {} of {} tasks", suggestions.len(), tasks.len());
    Ok(suggestions)
}

/// Stable in-place sort. Ties keep their relative input order.
pub fn sort_tasks(tasks: &mut [CanonicalTask], strategy: SortStrategy) {
    match strategy {
        SortStrategy::Smart => tasks.sort_by(|a, b| score_of(b).total_cmp(&score_of(a))),
        SortStrategy::Fastest => tasks.sort_by(|a, b| a.estimated_hours.total_cmp(&b.estimated_hours)),
        SortStrategy::HighImpact => tasks.sort_by(|a, b| b.importance.cmp(&a.importance)),
        SortStrategy::Deadline => tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }
}

/// Level shown next to a task in an ordered listing. Only the score ordering
/// grades by score; the other orderings show every task as medium.
pub fn display_level(score: f64, strategy: SortStrategy) -> PriorityLevel {
    match strategy {
        SortStrategy::Smart => PriorityLevel::from_score(score),
        _ => PriorityLevel::Medium,
    }
}

fn score_of(task: &CanonicalTask) -> f64 {
    task.priority_score.unwrap_or(0.0)
}
