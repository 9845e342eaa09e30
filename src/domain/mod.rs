//! Domain types for TaskRank
//!
//! - CanonicalTask: the validated task record that flows through scoring
//! - Suggestion: the reduced record returned by `suggest`
//! - PriorityLevel: coarse bucket for a score

pub mod suggestion;
pub mod task;

pub use suggestion::{PriorityLevel, Suggestion};
pub use task::{CanonicalTask, DEFAULT_ESTIMATED_HOURS, DEFAULT_IMPORTANCE};
