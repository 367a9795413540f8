//! Conversation types — per-user chat history and the accumulated
//! job-search filter set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Messages
// ────────────────────────────────────────────────────────────────────────────

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat turn. Assistant messages carry the filter update the
/// turn produced, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_update: Option<FilterUpdate>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            filter_update: None,
        }
    }

    pub fn assistant(content: impl Into<String>, filter_update: Option<FilterUpdate>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            filter_update,
        }
    }
}

/// Per-user conversation record. Owned by the caller/session layer; the
/// router only reads it and returns deltas. Messages are append-only and
/// chronological.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub user_id: String,
    pub messages: Vec<Message>,
    #[serde(default)]
    pub current_filters: FilterUpdate,
}

impl ConversationState {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            messages: Vec::new(),
            current_filters: FilterUpdate::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Filters
// ────────────────────────────────────────────────────────────────────────────

/// When a posting went live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePosted {
    #[serde(rename = "24h")]
    Last24h,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[default]
    #[serde(rename = "anytime")]
    Anytime,
}

impl DatePosted {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePosted::Last24h => "24h",
            DatePosted::Week => "week",
            DatePosted::Month => "month",
            DatePosted::Anytime => "anytime",
        }
    }
}

/// Match-score band filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchScoreBand {
    High,
    Medium,
    #[default]
    All,
}

impl MatchScoreBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchScoreBand::High => "high",
            MatchScoreBand::Medium => "medium",
            MatchScoreBand::All => "all",
        }
    }
}

/// Partial patch applied to a user's accumulated job-search filters.
/// Only fields the turn actually changed are present; merging is a
/// shallow overwrite, and lists replace wholesale rather than append.
///
/// `work_mode` and `job_type` stay open string lists: normalization maps
/// recognized tokens onto the canonical values (`remote`/`hybrid`/
/// `onsite`, `full-time`/`part-time`/`contract`/`internship`) and passes
/// unrecognized tokens through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<DatePosted>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_mode: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<MatchScoreBand>,
}

impl FilterUpdate {
    /// A patch that resets every filter to its default.
    pub fn cleared() -> Self {
        Self {
            role: Some(String::new()),
            skills: Some(Vec::new()),
            date_posted: Some(DatePosted::Anytime),
            job_type: Some(Vec::new()),
            work_mode: Some(Vec::new()),
            location: Some(String::new()),
            match_score: Some(MatchScoreBand::All),
        }
    }

    /// True when no field is present at all.
    pub fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.skills.is_none()
            && self.date_posted.is_none()
            && self.job_type.is_none()
            && self.work_mode.is_none()
            && self.location.is_none()
            && self.match_score.is_none()
    }

    /// Shallow-merges `update` into `self`: present keys overwrite
    /// wholesale, absent keys leave the current value untouched.
    pub fn merge(&mut self, update: &FilterUpdate) {
        if let Some(role) = &update.role {
            self.role = Some(role.clone());
        }
        if let Some(skills) = &update.skills {
            self.skills = Some(skills.clone());
        }
        if let Some(date_posted) = &update.date_posted {
            self.date_posted = Some(*date_posted);
        }
        if let Some(job_type) = &update.job_type {
            self.job_type = Some(job_type.clone());
        }
        if let Some(work_mode) = &update.work_mode {
            self.work_mode = Some(work_mode.clone());
        }
        if let Some(location) = &update.location {
            self.location = Some(location.clone());
        }
        if let Some(match_score) = &update.match_score {
            self.match_score = Some(*match_score);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_absent_keys_leave_current_unchanged() {
        let mut current = FilterUpdate {
            role: Some("frontend".to_string()),
            skills: Some(vec!["React".to_string()]),
            ..Default::default()
        };
        let update = FilterUpdate {
            location: Some("Berlin".to_string()),
            ..Default::default()
        };

        current.merge(&update);

        assert_eq!(current.role.as_deref(), Some("frontend"));
        assert_eq!(current.skills, Some(vec!["React".to_string()]));
        assert_eq!(current.location.as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_merge_lists_replace_wholesale() {
        let mut current = FilterUpdate {
            skills: Some(vec!["React".to_string(), "TypeScript".to_string()]),
            ..Default::default()
        };
        let update = FilterUpdate {
            skills: Some(vec!["Python".to_string()]),
            ..Default::default()
        };

        current.merge(&update);

        // No concatenation: the new list replaces the old one entirely
        assert_eq!(current.skills, Some(vec!["Python".to_string()]));
    }

    #[test]
    fn test_cleared_resets_every_field_to_defaults() {
        let cleared = FilterUpdate::cleared();
        assert_eq!(cleared.role.as_deref(), Some(""));
        assert_eq!(cleared.skills, Some(vec![]));
        assert_eq!(cleared.date_posted, Some(DatePosted::Anytime));
        assert_eq!(cleared.job_type, Some(vec![]));
        assert_eq!(cleared.work_mode, Some(vec![]));
        assert_eq!(cleared.location.as_deref(), Some(""));
        assert_eq!(cleared.match_score, Some(MatchScoreBand::All));
    }

    #[test]
    fn test_is_empty() {
        assert!(FilterUpdate::default().is_empty());
        assert!(!FilterUpdate::cleared().is_empty());
        let update = FilterUpdate {
            work_mode: Some(vec!["remote".to_string()]),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_filter_update_serializes_camel_case() {
        let update = FilterUpdate {
            date_posted: Some(DatePosted::Last24h),
            work_mode: Some(vec!["remote".to_string()]),
            match_score: Some(MatchScoreBand::High),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["datePosted"], "24h");
        assert_eq!(json["workMode"][0], "remote");
        assert_eq!(json["matchScore"], "high");
        // Absent fields are omitted entirely
        assert!(json.get("role").is_none());
    }

    #[test]
    fn test_conversation_state_deserializes_without_filters() {
        let json = r#"{"userId": "u1", "messages": []}"#;
        let state: ConversationState = serde_json::from_str(json).unwrap();
        assert_eq!(state.user_id, "u1");
        assert!(state.current_filters.is_empty());
    }

    #[test]
    fn test_message_roles_serialize_lowercase() {
        let message = Message::user("hi");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        let message = Message::assistant("hello", None);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");
        assert!(json.get("filterUpdate").is_none());
    }
}
