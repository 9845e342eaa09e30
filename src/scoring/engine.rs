//! Priority engine: per-task score and explanation.
//!
//! The engine needs the whole batch: blocker counts and cycle detection look at
//! every task. It is a pure function of (batch, config, today).

use chrono::{Local, NaiveDate};
use log::{debug, info};

use super::graph::DependencyGraph;
use super::weights::ScoringConfig;
use crate::domain::CanonicalTask;

/// Factor values and explanation behind one task's score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub days_until_due: i64,
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
    pub blocker_count: usize,
    pub has_cycle: bool,
    pub score: f64,
    pub explanation: String,
}

/// Scores tasks against a fixed configuration and calendar date.
#[derive(Debug, Clone)]
pub struct PriorityEngine {
    config: ScoringConfig,
    today: NaiveDate,
}

impl Default for PriorityEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl PriorityEngine {
    /// Create an engine that scores relative to the local calendar date.
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            today: Local::now().date_naive(),
        }
    }

    /// Pin the date urgency is measured from.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Score every task in the batch, writing `priority_score` and `explanation`
    /// in place. Breakdowns are returned in batch order.
    pub fn score_batch(&self, tasks: &mut [CanonicalTask]) -> Vec<ScoreBreakdown> {
        let breakdowns: Vec<ScoreBreakdown> = {
            let graph = DependencyGraph::from_tasks(tasks);
            tasks.iter().map(|task| self.score_task(task, &graph)).collect()
        };

        for (task, breakdown) in tasks.iter_mut().zip(&breakdowns) {
            task.priority_score = Some(breakdown.score);
            task.explanation = Some(breakdown.explanation.clone());
        }

        info!("Scored {} tasks (today={})", tasks.len(), self.today);
        breakdowns
    }

    /// Score one task against the batch described by `graph`.
    pub fn score_task(&self, task: &CanonicalTask, graph: &DependencyGraph<'_>) -> ScoreBreakdown {
        let mut explanation = String::new();

        let days_until_due = task
            .due_date
            .map(|due| (due - self.today).num_days())
            .unwrap_or(self.config.no_due_date_days);
        let urgency = if days_until_due <= 0 {
            let days_overdue = -days_until_due;
            explanation.push_str(&format!("Critically Past Due ({} days). ", days_overdue));
            1.0 + (days_overdue as f64).ln_1p()
        } else {
            explanation.push_str(&format!("Due in {} days. ", days_until_due));
            (1.0 / (days_until_due as f64 * 0.5 + 1.0)).min(1.0)
        };

        let importance = task.importance as f64 / 10.0;
        explanation.push_str(&format!("Importance: {}/10. ", task.importance));

        let max_effort = self.config.max_effort_hours;
        let effort = 1.0 - task.estimated_hours.min(max_effort) / max_effort;
        explanation.push_str(&format!("Effort: {} hours. ", format_hours(task.estimated_hours)));

        let has_cycle = graph.has_cycle(&task.id);
        let (dependency, blocker_count) = if has_cycle {
            explanation.push_str("**CIRCULAR DEPENDENCY DETECTED. Dependency factor ignored.** ");
            (0.0, 0)
        } else {
            let blocker_count = graph.blocker_count(&task.id);
            let max_blockers = graph.len().saturating_sub(1);
            explanation.push_str(&format!("Blocks {} other tasks. ", blocker_count));
            let dependency = if max_blockers > 0 {
                blocker_count as f64 / max_blockers as f64
            } else {
                0.0
            };
            (dependency, blocker_count)
        };

        let score = self.config.weights.combine(urgency, importance, effort, dependency);
        debug!("Task {} scored {:.4} (cycle={})", task.id, score, has_cycle);

        ScoreBreakdown {
            days_until_due,
            urgency,
            importance,
            effort,
            dependency,
            blocker_count,
            has_cycle,
            score,
            explanation: explanation.trim_end().to_string(),
        }
    }
}

/// Shortest round-trip decimal, with a signed exponent of at least two digits
/// when the value is very large or very small (`1e+16`, `1.5e-07`).
fn format_hours(hours: f64) -> String {
    let repr = format!("{:?}", hours);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}
