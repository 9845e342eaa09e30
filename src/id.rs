//! ID generation utilities for TaskRank
//!
//! Tasks submitted without an id get a random v4 UUID so they can still take
//! part in dependency lookups within their batch.

use std::collections::HashSet;

/// Generate a random task id
///
/// Format: hyphenated UUID v4 (122 random bits)
/// Example: `67e55044-10b1-426f-9247-bb680e5fe0c8`
pub fn generate_task_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate a task id not already present in `taken`, and reserve it
pub fn generate_unique_task_id(taken: &mut HashSet<String>) -> String {
    loop {
        let id = generate_task_id();
        if taken.insert(id.clone()) {
            return id;
        }
    }
}
