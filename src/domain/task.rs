//! Canonical task record
//!
//! A CanonicalTask is the trusted, defaulted form of one submitted task. It is
//! built by the normalizer, scored in place by the priority engine, and then
//! serialized back to the caller.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Importance used when none (or an unusable one) was supplied
pub const DEFAULT_IMPORTANCE: i64 = 5;

/// Estimated hours used when none (or an unusable one) was supplied
pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;

/// A validated task, ready for scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalTask {
    //=== Identity ===
    /// Unique within its batch, never empty
    pub id: String,

    /// Passed through from the input untouched
    pub title: Option<String>,

    //=== Scoring inputs ===
    /// None means "no due date"; serialized as `YYYY-MM-DD` or null
    pub due_date: Option<NaiveDate>,

    /// Always finite and non-negative
    pub estimated_hours: f64,

    /// Conventionally 1-10
    pub importance: i64,

    /// Ids of tasks this one depends on, in submission order
    pub dependencies: Vec<String>,

    //=== Scoring outputs ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Any input keys this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanonicalTask {
    /// Create a task with default scoring inputs
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            due_date: None,
            estimated_hours: DEFAULT_ESTIMATED_HOURS,
            importance: DEFAULT_IMPORTANCE,
            dependencies: vec![],
            priority_score: None,
            explanation: None,
            extra: Map::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Title for error messages and listings
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("<no title>")
    }

    /// Returns true if this task lists `id` among its dependencies
    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == id)
    }

    /// Returns true once the priority engine has filled in a score
    pub fn is_scored(&self) -> bool {
        self.priority_score.is_some()
    }

    /// Serialize back into the loosely-typed input shape
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
