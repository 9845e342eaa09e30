//! Normalizer: loosely-typed task input to CanonicalTask.
//!
//! Ambiguous fields are defaulted rather than rejected (see `fields`). The only
//! hard failures are a document that is not an array, an element that is not
//! an object, and a due date that cannot be read as `YYYY-MM-DD`. Any failure
//! aborts the whole batch.

pub mod fields;

use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::domain::CanonicalTask;
use crate::error::{Result, TaskRankError};
use crate::id::generate_unique_task_id;

pub use fields::{
    coerce_dependencies, coerce_estimated_hours, coerce_id, coerce_importance, coerce_title, parse_due_date,
};

/// Keys interpreted by the normalizer. Everything else is carried in `extra`.
pub const KNOWN_FIELDS: [&str; 8] = [
    "id",
    "title",
    "due_date",
    "estimated_hours",
    "importance",
    "dependencies",
    "priority_score",
    "explanation",
];

/// Normalize a whole input document, which must be a JSON array.
pub fn normalize_document(document: &Value) -> Result<Vec<CanonicalTask>> {
    match document {
        Value::Array(items) => normalize_batch(items),
        _ => Err(TaskRankError::NotABatch),
    }
}

/// Normalize a batch, preserving order.
///
/// Ids are unique on return: caller ids are kept on first use, and missing,
/// blank, non-string or repeated ids are replaced with fresh UUIDs that avoid
/// every id the caller supplied.
pub fn normalize_batch(raw: &[Value]) -> Result<Vec<CanonicalTask>> {
    let mut taken: HashSet<String> = raw
        .iter()
        .filter_map(|item| coerce_id(item.get("id")))
        .collect();
    let mut claimed: HashSet<String> = HashSet::with_capacity(raw.len());

    let mut tasks = Vec::with_capacity(raw.len());
    for (index, item) in raw.iter().enumerate() {
        let fields = item.as_object().ok_or(TaskRankError::MalformedTask { index })?;

        let id = match coerce_id(fields.get("id")) {
            Some(id) if claimed.contains(&id) => {
                let fresh = generate_unique_task_id(&mut taken);
                warn!("Duplicate task id '{}' at index {}, reassigned to {}", id, index, fresh);
                fresh
            }
            Some(id) => id,
            None => {
                let fresh = generate_unique_task_id(&mut taken);
                debug!("Generated id {} for task at index {}", fresh, index);
                fresh
            }
        };
        claimed.insert(id.clone());

        tasks.push(normalize_fields(id, fields)?);
    }

    debug!("Normalized {} tasks", tasks.len());
    Ok(tasks)
}

fn normalize_fields(id: String, fields: &Map<String, Value>) -> Result<CanonicalTask> {
    let title = coerce_title(fields.get("title"));

    let due_date = parse_due_date(fields.get("due_date")).map_err(|value| TaskRankError::InvalidDate {
        title: title.clone().unwrap_or_else(|| "<no title>".to_string()),
        value,
    })?;

    let extra = fields
        .iter()
        .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(CanonicalTask {
        id,
        title,
        due_date,
        estimated_hours: coerce_estimated_hours(fields.get("estimated_hours")),
        importance: coerce_importance(fields.get("importance")),
        dependencies: coerce_dependencies(fields.get("dependencies")),
        priority_score: None,
        explanation: None,
        extra,
    })
}
