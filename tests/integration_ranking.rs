//! Batch ranking integration tests
//!
//! Drives normalize -> score -> sort through the public API with a pinned date.

use chrono::{Duration, NaiveDate};
use serde_json::{Value, json};
use taskrank::TaskRankError;
use taskrank::domain::CanonicalTask;
use taskrank::normalize::normalize_document;
use taskrank::ranking::{SortStrategy, analyze, score_document, suggest};
use taskrank::scoring::{DependencyGraph, PriorityEngine, ScoringConfig};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn engine() -> PriorityEngine {
    PriorityEngine::new(ScoringConfig::default()).with_today(today())
}

fn due(days: i64) -> String {
    (today() + Duration::days(days)).to_string()
}

fn task(id: &str, days: i64, hours: f64, importance: i64, deps: &[&str]) -> Value {
    json!({
        "id": id,
        "title": id,
        "due_date": due(days),
        "estimated_hours": hours,
        "importance": importance,
        "dependencies": deps,
    })
}

fn score_of<'a>(tasks: &'a [CanonicalTask], id: &str) -> &'a CanonicalTask {
    tasks.iter().find(|t| t.id == id).unwrap()
}

/// Urgency dominates: due tomorrow and trivial beats due in a month and important
#[test]
fn test_urgent_beats_important() {
    let doc = json!([
        task("urgent", 1, 1.0, 3, &[]),
        task("important", 30, 15.0, 10, &[]),
    ]);
    let tasks = score_document(&doc, &engine()).unwrap();
    let urgent = score_of(&tasks, "urgent").priority_score.unwrap();
    let important = score_of(&tasks, "important").priority_score.unwrap();
    assert!(urgent > important);
    assert!(urgent > 0.5);
}

/// More days overdue scores higher, and the explanation names the lateness
#[test]
fn test_past_due_handling() {
    let doc = json!([
        task("late1", -1, 2.0, 5, &[]),
        task("late5", -5, 8.0, 7, &[]),
    ]);
    let tasks = score_document(&doc, &engine()).unwrap();
    let late1 = score_of(&tasks, "late1");
    let late5 = score_of(&tasks, "late5");
    assert!(late5.priority_score > late1.priority_score);
    assert!(late5.explanation.as_deref().unwrap().contains("Critically Past Due (5 days)"));
    assert!(late1.explanation.as_deref().unwrap().contains("Critically Past Due (1 days)"));
}

/// A blocking task outranks an otherwise identical non-blocking one
#[test]
fn test_dependency_boosting() {
    let doc = json!([
        task("a", 10, 5.0, 8, &[]),
        task("b", 10, 5.0, 8, &[]),
        task("c", 20, 3.0, 4, &["a"]),
    ]);
    let tasks = score_document(&doc, &engine()).unwrap();
    let a = score_of(&tasks, "a");
    let b = score_of(&tasks, "b");
    assert!(a.priority_score > b.priority_score);
    assert!(a.explanation.as_deref().unwrap().ends_with("Blocks 1 other tasks."));
    assert!(b.explanation.as_deref().unwrap().ends_with("Blocks 0 other tasks."));
}

/// Mutual dependencies suppress the dependency factor entirely
#[test]
fn test_dependency_cycle_detection() {
    let doc = json!([
        task("X_ID", 5, 3.0, 7, &["Y_ID"]),
        task("Y_ID", 5, 3.0, 7, &["X_ID"]),
    ]);
    let mut tasks = normalize_document(&doc).unwrap();
    let engine = engine();
    let breakdown = {
        let graph = DependencyGraph::from_tasks(&tasks);
        engine.score_task(&tasks[0], &graph)
    };
    assert!(breakdown.has_cycle);
    assert_eq!(breakdown.dependency, 0.0);
    assert!(breakdown.explanation.contains("Dependency factor ignored"));

    engine.score_batch(&mut tasks);
    assert!(tasks[1].explanation.as_deref().unwrap().contains("Dependency factor ignored"));
}

/// Cycles and blockers do not depend on due dates
#[test]
fn test_cycle_and_blockers_independent_of_due_date() {
    let near = json!([task("a", -3, 1.0, 5, &["b"]), task("b", 2, 1.0, 5, &["a"]), task("c", 0, 1.0, 5, &["a"])]);
    let far = json!([task("a", 90, 1.0, 5, &["b"]), task("b", 40, 1.0, 5, &["a"]), task("c", 7, 1.0, 5, &["a"])]);

    for doc in [near, far] {
        let mut tasks = normalize_document(&doc).unwrap();
        let breakdowns = engine().score_batch(&mut tasks);
        assert!(breakdowns[0].has_cycle);
        assert!(breakdowns[1].has_cycle);
        assert!(breakdowns[2].has_cycle);
    }
}

/// A bad date aborts the batch and names the task and the value
#[test]
fn test_malformed_date_aborts_batch() {
    let doc = json!([
        task("ok", 1, 1.0, 5, &[]),
        {"title": "Bad Task", "due_date": "not-a-date"},
    ]);
    let err = analyze(&doc, &engine(), SortStrategy::Smart).unwrap_err();
    assert!(err.is_invalid_input());
    let msg = err.to_string();
    assert!(msg.contains("Bad Task"));
    assert!(msg.contains("not-a-date"));

    let body = err.to_body();
    assert_eq!(body.error, "Invalid input data");

    assert!(suggest(&doc, &engine(), 3).is_err());
}

#[test]
fn test_non_array_document_rejected() {
    let err = analyze(&json!({"tasks": []}), &engine(), SortStrategy::Smart).unwrap_err();
    assert!(matches!(err, TaskRankError::NotABatch));
}

/// Equal scores keep their input order
#[test]
fn test_sort_stability() {
    let doc = json!([
        {"id": "first", "importance": 6},
        {"id": "second", "importance": 6},
        {"id": "top", "importance": 9},
        {"id": "third", "importance": 6},
    ]);
    let tasks = analyze(&doc, &engine(), SortStrategy::Smart).unwrap();
    let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["top", "first", "second", "third"]);
}

#[test]
fn test_empty_batch() {
    let tasks = analyze(&json!([]), &engine(), SortStrategy::Smart).unwrap();
    assert!(tasks.is_empty());
    assert!(suggest(&json!([]), &engine(), 3).unwrap().is_empty());
}

/// Analyze output re-normalizes to the same records
#[test]
fn test_normalize_roundtrip_of_analyze_output() {
    let doc = json!([
        {"title": "No id", "dependencies": "b, c"},
        {"id": "b", "due_date": due(3), "importance": "8", "estimated_hours": "2.5"},
        {"id": "c", "due_date": null, "dependencies": ["b"], "owner": "kim"},
    ]);
    let scored = analyze(&doc, &engine(), SortStrategy::Smart).unwrap();
    let output = serde_json::to_value(&scored).unwrap();

    let again = normalize_document(&output).unwrap();
    assert_eq!(again.len(), scored.len());
    for (before, after) in scored.iter().zip(&again) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.due_date, after.due_date);
        assert_eq!(before.dependencies, after.dependencies);
        assert_eq!(before.importance, after.importance);
        assert_eq!(before.estimated_hours, after.estimated_hours);
        assert_eq!(before.extra, after.extra);
    }
}

/// Output shape: ISO date or null, score and explanation present, extras kept
#[test]
fn test_analyze_output_shape() {
    let doc = json!([
        {"id": "a", "due_date": due(2), "owner": "kim"},
        {"id": "b"},
    ]);
    let tasks = analyze(&doc, &engine(), SortStrategy::Smart).unwrap();
    let output = serde_json::to_value(&tasks).unwrap();

    assert_eq!(output[0]["id"], "a");
    assert_eq!(output[0]["due_date"], due(2));
    assert_eq!(output[0]["owner"], "kim");
    assert!(output[0]["priority_score"].is_f64());
    assert!(output[0]["explanation"].is_string());
    assert!(output[1]["due_date"].is_null());
}

/// Suggest returns the top 3 in reduced form
#[test]
fn test_suggest_top_three() {
    let doc = json!([
        task("d", 30, 1.0, 5, &[]),
        task("a", -2, 1.0, 5, &[]),
        task("c", 7, 1.0, 5, &[]),
        task("b", 1, 1.0, 5, &[]),
    ]);
    let suggestions = suggest(&doc, &engine(), 3).unwrap();
    let ids: Vec<&str> = suggestions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    let json = serde_json::to_value(&suggestions).unwrap();
    let first = json[0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["explanation", "id", "priority_score", "title"]);
}

/// Suggested scores round from the stored value, ties to even
#[test]
fn test_suggest_rounds_like_stored_score() {
    let doc = json!([
        {"id": "quick", "due_date": due(0), "importance": 1, "estimated_hours": 0},
        {"id": "long", "due_date": due(0), "importance": 1, "estimated_hours": 15},
    ]);
    let suggestions = suggest(&doc, &engine(), 3).unwrap();
    assert_eq!(suggestions[0].id, "quick");
    assert_eq!(suggestions[0].priority_score, 0.72);
    assert_eq!(suggestions[1].id, "long");
    assert_eq!(suggestions[1].priority_score, 0.62);
}
