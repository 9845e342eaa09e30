//! Tunable constants for priority scoring.
//!
//! Factors are combined as a weighted sum:
//! - Urgency (0.60): how close or how far past the due date
//! - Importance (0.25): caller-supplied 1-10 rating
//! - Effort (0.10): quick wins score higher, capped at 15 hours
//! - Dependency (0.05): share of the batch this task is blocking

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskRankError};

pub const WEIGHT_URGENCY: f64 = 0.60;
pub const WEIGHT_IMPORTANCE: f64 = 0.25;
pub const WEIGHT_EFFORT: f64 = 0.10;
pub const WEIGHT_DEPENDENCY: f64 = 0.05;

/// Efforts above this many hours all count as maximal effort.
pub const MAX_EFFORT_HOURS: f64 = 15.0;

/// Days-until-due assumed for tasks without a due date.
pub const NO_DUE_DATE_DAYS: i64 = 9999;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Relative weight of each factor in the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            urgency: WEIGHT_URGENCY,
            importance: WEIGHT_IMPORTANCE,
            effort: WEIGHT_EFFORT,
            dependency: WEIGHT_DEPENDENCY,
        }
    }
}

impl PriorityWeights {
    pub fn sum(&self) -> f64 {
        self.urgency + self.importance + self.effort + self.dependency
    }

    /// Weighted sum of the four factors.
    pub fn combine(&self, urgency: f64, importance: f64, effort: f64, dependency: f64) -> f64 {
        self.urgency * urgency + self.importance * importance + self.effort * effort + self.dependency * dependency
    }

    /// Weights must be finite, non-negative and sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("urgency", self.urgency),
            ("importance", self.importance),
            ("effort", self.effort),
            ("dependency", self.dependency),
        ];
        for (name, weight) in all {
            if !weight.is_finite() || weight < 0.0 {
                return Err(TaskRankError::InvalidConfig(format!(
                    "weight '{}' must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(TaskRankError::InvalidConfig(format!("weights must sum to 1.0, got {}", sum)));
        }
        Ok(())
    }
}

/// Everything the priority engine needs besides the batch and the date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: PriorityWeights,
    pub max_effort_hours: f64,
    pub no_due_date_days: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: PriorityWeights::default(),
            max_effort_hours: MAX_EFFORT_HOURS,
            no_due_date_days: NO_DUE_DATE_DAYS,
        }
    }
}

impl ScoringConfig {
    pub fn with_weights(mut self, weights: PriorityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        if !self.max_effort_hours.is_finite() || self.max_effort_hours <= 0.0 {
            return Err(TaskRankError::InvalidConfig(format!(
                "max_effort_hours must be positive, got {}",
                self.max_effort_hours
            )));
        }

        // Zero or less would make undated tasks look overdue
        if self.no_due_date_days <= 0 {
            return Err(TaskRankError::InvalidConfig(format!(
                "no_due_date_days must be positive, got {}",
                self.no_due_date_days
            )));
        }
        Ok(())
    }
}
