//! Scoring module for task prioritization.
//!
//! This module provides:
//! - **Weights**: the named, swappable weight set and scoring constants.
//! - **DependencyGraph**: blocker counts and cycle detection over one batch.
//! - **PriorityEngine**: combines urgency, importance, effort and dependency
//!   pressure into a score with a human-readable explanation.
//!
//! # Example
//!
//! ```ignore
//! use taskrank::scoring::{PriorityEngine, ScoringConfig};
//!
//! let engine = PriorityEngine::new(ScoringConfig::default());
//! let breakdowns = engine.score_batch(&mut tasks);
//! ```

mod engine;
mod graph;
mod weights;

pub use engine::{PriorityEngine, ScoreBreakdown};
pub use graph::{CycleDetector, DependencyGraph};
pub use weights::{
    MAX_EFFORT_HOURS, NO_DUE_DATE_DAYS, PriorityWeights, ScoringConfig, WEIGHT_DEPENDENCY, WEIGHT_EFFORT,
    WEIGHT_IMPORTANCE, WEIGHT_URGENCY,
};
