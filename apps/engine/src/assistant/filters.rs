//! Filter-token normalization — fixed, case-insensitive keyword rules
//! mapping free-text tokens onto the canonical filter values.
//!
//! Unrecognized work-mode and job-type tokens pass through unchanged.

use serde_json::Value;

use crate::models::MatchScoreBand;

/// Maps a work-mode token onto `remote` / `hybrid` / `onsite`.
pub fn normalize_work_mode(token: &str) -> String {
    let lower = token.to_lowercase();
    if lower.contains("remote") {
        "remote".to_string()
    } else if lower.contains("hybrid") {
        "hybrid".to_string()
    } else if lower.contains("onsite") || lower.contains("office") {
        "onsite".to_string()
    } else {
        token.to_string()
    }
}

/// Maps a job-type token onto the canonical employment types.
pub fn normalize_job_type(token: &str) -> String {
    let lower = token.to_lowercase();
    if lower.contains("full") {
        "full-time".to_string()
    } else if lower.contains("part") {
        "part-time".to_string()
    } else if lower.contains("contract") {
        "contract".to_string()
    } else if lower.contains("intern") {
        "internship".to_string()
    } else {
        token.to_string()
    }
}

/// Maps a match-score token onto a band. Anything not clearly high or
/// medium widens to `all`.
pub fn normalize_match_score(token: &str) -> MatchScoreBand {
    let lower = token.to_lowercase();
    if lower.contains("high") || lower.contains("best") {
        MatchScoreBand::High
    } else if lower.contains("medium") || lower.contains("moderate") {
        MatchScoreBand::Medium
    } else {
        MatchScoreBand::All
    }
}

/// Coerces a classifier parameter that may be a scalar or a list into a
/// string list.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(value_as_string).collect(),
        other => value_as_string(other).into_iter().collect(),
    }
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
