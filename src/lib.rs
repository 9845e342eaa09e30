//! TaskRank - multi-factor task prioritization
//!
//! TaskRank takes an unordered batch of loosely-typed task records, normalizes
//! them, and ranks them by urgency, importance, effort and dependency pressure,
//! attaching a human-readable explanation to every score.

pub mod domain;
pub mod error;
pub mod id;
pub mod normalize;
pub mod ranking;
pub mod scoring;

pub use error::{Result, TaskRankError};
