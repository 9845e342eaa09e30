//! Per-field coercion rules.
//!
//! Each function takes the raw JSON value for one field (None when the key is
//! missing) and returns the canonical value. Every fallback is an explicit
//! match arm; only `parse_due_date` can reject its input.

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{DEFAULT_ESTIMATED_HOURS, DEFAULT_IMPORTANCE};

/// A caller-supplied id, if it is a non-blank string
pub fn coerce_id(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Titles pass through; non-string scalars keep their JSON text
pub fn coerce_title(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Parse a due date.
///
/// Missing, null and empty values mean "no due date". Strings must be exactly
/// `YYYY-MM-DD`. On failure the raw value is returned as text so the caller
/// can report it.
pub fn parse_due_date(value: Option<&Value>) -> Result<Option<NaiveDate>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => parse_iso_date(s).map(Some).ok_or_else(|| s.clone()),
        Some(other) => Err(other.to_string()),
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Dependencies as an ordered list of ids.
///
/// - list: each element becomes a trimmed string (null and nested values dropped)
/// - string: split on `,`, trimmed, empty pieces dropped
/// - object: its keys
/// - anything else: empty
pub fn coerce_dependencies(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => vec![],
        Some(Value::Array(items)) => items.iter().filter_map(dependency_id).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => vec![],
    }
}

fn dependency_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Importance as an integer; zero, falsy or unparsable values fall back to the default.
pub fn coerce_importance(value: Option<&Value>) -> i64 {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => DEFAULT_IMPORTANCE,
        Some(Value::Bool(true)) => 1,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => DEFAULT_IMPORTANCE,
            Some(i) => i,
            None => match n.as_f64() {
                Some(f) if f.is_finite() && f != 0.0 => f.trunc() as i64,
                _ => DEFAULT_IMPORTANCE,
            },
        },
        Some(Value::String(s)) => match s.trim().parse::<i64>() {
            Ok(0) | Err(_) => DEFAULT_IMPORTANCE,
            Ok(i) => i,
        },
        Some(Value::Array(_)) | Some(Value::Object(_)) => DEFAULT_IMPORTANCE,
    }
}

/// Estimated hours as a finite, non-negative real. Zero is a valid estimate.
pub fn coerce_estimated_hours(value: Option<&Value>) -> f64 {
    let parsed = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Bool(true)) => Some(1.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    };

    match parsed {
        Some(hours) if hours.is_finite() && hours >= 0.0 => hours,
        _ => DEFAULT_ESTIMATED_HOURS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_coerce_id() {
        assert_eq!(coerce_id(Some(&json!("abc"))), Some("abc".to_string()));
        assert_eq!(coerce_id(Some(&json!(""))), None);
        assert_eq!(coerce_id(Some(&json!("   "))), None);
        assert_eq!(coerce_id(Some(&json!(42))), None);
        assert_eq!(coerce_id(Some(&Value::Null)), None);
        assert_eq!(coerce_id(None), None);
    }

    #[test]
    fn test_coerce_title() {
        assert_eq!(coerce_title(Some(&json!("Ship it"))), Some("Ship it".to_string()));
        assert_eq!(coerce_title(Some(&json!(""))), Some(String::new()));
        assert_eq!(coerce_title(Some(&json!(7))), Some("7".to_string()));
        assert_eq!(coerce_title(None), None);
    }

    #[test]
    fn test_parse_due_date_absent_or_empty() {
        assert_eq!(parse_due_date(None), Ok(None));
        assert_eq!(parse_due_date(Some(&Value::Null)), Ok(None));
        assert_eq!(parse_due_date(Some(&json!(""))), Ok(None));
    }

    #[test]
    fn test_parse_due_date_valid() {
        assert_eq!(parse_due_date(Some(&json!("2025-02-28"))), Ok(Some(date(2025, 2, 28))));
        assert_eq!(parse_due_date(Some(&json!("2024-02-29"))), Ok(Some(date(2024, 2, 29))));
    }

    #[test]
    fn test_parse_due_date_strict() {
        assert_eq!(parse_due_date(Some(&json!("not-a-date"))), Err("not-a-date".to_string()));
        assert_eq!(parse_due_date(Some(&json!("2025-2-8"))), Err("2025-2-8".to_string()));
        assert_eq!(parse_due_date(Some(&json!("2025-02-30"))), Err("2025-02-30".to_string()));
        assert_eq!(parse_due_date(Some(&json!("2025/02/10"))), Err("2025/02/10".to_string()));
        assert_eq!(parse_due_date(Some(&json!(" 2025-02-10"))), Err(" 2025-02-10".to_string()));
        assert_eq!(parse_due_date(Some(&json!("2025-02-10T00:00"))), Err("2025-02-10T00:00".to_string()));
    }

    #[test]
    fn test_parse_due_date_non_string() {
        assert_eq!(parse_due_date(Some(&json!(20250210))), Err("20250210".to_string()));
        assert!(parse_due_date(Some(&json!({"year": 2025}))).is_err());
    }

    #[test]
    fn test_coerce_dependencies_list() {
        let deps = coerce_dependencies(Some(&json!([" a ", "b", 3, null, ["x"]])));
        assert_eq!(deps, vec!["a", "b", "3"]);
    }

    #[test]
    fn test_coerce_dependencies_list_keeps_empty_entries() {
        let deps = coerce_dependencies(Some(&json!(["a", ""])));
        assert_eq!(deps, vec!["a", ""]);
    }

    #[test]
    fn test_coerce_dependencies_comma_string() {
        let deps = coerce_dependencies(Some(&json!(" a, b ,,c , ")));
        assert_eq!(deps, vec!["a", "b", "c"]);
        assert!(coerce_dependencies(Some(&json!(""))).is_empty());
    }

    #[test]
    fn test_coerce_dependencies_fallbacks() {
        assert!(coerce_dependencies(None).is_empty());
        assert!(coerce_dependencies(Some(&Value::Null)).is_empty());
        assert!(coerce_dependencies(Some(&json!(17))).is_empty());
        assert!(coerce_dependencies(Some(&json!(true))).is_empty());
    }

    #[test]
    fn test_coerce_dependencies_object_keys() {
        let deps = coerce_dependencies(Some(&json!({"a": 1, "b": 2})));
        assert_eq!(deps, vec!["a", "b"]);
    }

    #[test]
    fn test_coerce_importance() {
        assert_eq!(coerce_importance(Some(&json!(8))), 8);
        assert_eq!(coerce_importance(Some(&json!("9"))), 9);
        assert_eq!(coerce_importance(Some(&json!(" 3 "))), 3);
        assert_eq!(coerce_importance(Some(&json!(7.9))), 7);
        assert_eq!(coerce_importance(Some(&json!(true))), 1);
    }

    #[test]
    fn test_coerce_importance_defaults() {
        assert_eq!(coerce_importance(None), 5);
        assert_eq!(coerce_importance(Some(&Value::Null)), 5);
        assert_eq!(coerce_importance(Some(&json!(0))), 5);
        assert_eq!(coerce_importance(Some(&json!("0"))), 5);
        assert_eq!(coerce_importance(Some(&json!(""))), 5);
        assert_eq!(coerce_importance(Some(&json!("high"))), 5);
        assert_eq!(coerce_importance(Some(&json!("7.5"))), 5);
        assert_eq!(coerce_importance(Some(&json!(false))), 5);
        assert_eq!(coerce_importance(Some(&json!([1]))), 5);
    }

    #[test]
    fn test_coerce_estimated_hours() {
        assert_eq!(coerce_estimated_hours(Some(&json!(2.5))), 2.5);
        assert_eq!(coerce_estimated_hours(Some(&json!(4))), 4.0);
        assert_eq!(coerce_estimated_hours(Some(&json!(" 3.25 "))), 3.25);
        assert_eq!(coerce_estimated_hours(Some(&json!("0"))), 0.0);
        assert_eq!(coerce_estimated_hours(Some(&json!(0))), 0.0);
    }

    #[test]
    fn test_coerce_estimated_hours_defaults() {
        assert_eq!(coerce_estimated_hours(None), 1.0);
        assert_eq!(coerce_estimated_hours(Some(&json!(""))), 1.0);
        assert_eq!(coerce_estimated_hours(Some(&json!("lots"))), 1.0);
        assert_eq!(coerce_estimated_hours(Some(&json!(-2))), 1.0);
        assert_eq!(coerce_estimated_hours(Some(&json!("inf"))), 1.0);
        assert_eq!(coerce_estimated_hours(Some(&json!("NaN"))), 1.0);
        assert_eq!(coerce_estimated_hours(Some(&json!({"h": 1}))), 1.0);
    }
}
