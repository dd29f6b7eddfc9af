//! Shared data models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix carried by every generated schedule id.
const SCHEDULE_ID_PREFIX: &str = "sche-";

/// Generate a new schedule id: the `sche-` prefix plus a time-ordered UUID.
pub fn new_schedule_id() -> String {
    format!("{}{}", SCHEDULE_ID_PREFIX, Uuid::now_v7())
}

/// A user record. Owned by an external system; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub user_name: String,
    /// Ids of the schedules this user may view and edit, in order.
    #[serde(default)]
    pub editable_schedules: Vec<String>,
}

/// Lifecycle state of a schedule. Every new schedule starts in `Preselect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleType {
    Preselect,
}

impl ScheduleType {
    /// Stored string form of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleType::Preselect => "PRESELECT",
        }
    }
}

/// A full schedule record as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub schedule_id: String,
    pub schedule_title: String,
    pub target_area: String,
    pub owner_id: String,
    pub editor_ids: Vec<String>,
    pub schedule_type: ScheduleType,
    pub schedule_content: HashMap<String, serde_json::Value>,
}

impl Schedule {
    /// Build a fresh schedule for `owner`. An empty `title` defaults to
    /// `"<userName>: <scheduleId>"`.
    pub fn new(schedule_id: String, owner: &User, target_area: String, title: String) -> Self {
        let schedule_title = if title.is_empty() {
            format!("{}: {}", owner.user_name, schedule_id)
        } else {
            title
        };
        Self {
            schedule_id,
            schedule_title,
            target_area,
            owner_id: owner.user_id.clone(),
            editor_ids: Vec::new(),
            schedule_type: ScheduleType::Preselect,
            schedule_content: HashMap::new(),
        }
    }
}

/// The projection of a schedule returned by the list operation.
///
/// `schedule_type` stays a plain string: list passes through whatever the
/// store holds, it never interprets the state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub schedule_id: String,
    pub schedule_title: String,
    pub target_area: String,
    pub schedule_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> User {
        User {
            user_id: "u1".to_string(),
            user_name: "Alice".to_string(),
            editable_schedules: vec![],
        }
    }

    #[test]
    fn test_schedule_id_format() {
        let id = new_schedule_id();
        assert!(id.starts_with("sche-"));
        assert_ne!(id, new_schedule_id());
    }

    #[test]
    fn test_empty_title_defaults_to_user_and_id() {
        let schedule = Schedule::new(
            "sche-123".to_string(),
            &owner(),
            "".to_string(),
            "".to_string(),
        );
        assert_eq!(schedule.schedule_title, "Alice: sche-123");
    }

    #[test]
    fn test_explicit_title_kept() {
        let schedule = Schedule::new(
            "sche-123".to_string(),
            &owner(),
            "Kyoto".to_string(),
            "Spring trip".to_string(),
        );
        assert_eq!(schedule.schedule_title, "Spring trip");
        assert_eq!(schedule.target_area, "Kyoto");
        assert_eq!(schedule.owner_id, "u1");
    }

    #[test]
    fn test_new_schedule_initial_state() {
        let schedule = Schedule::new(
            "sche-123".to_string(),
            &owner(),
            "".to_string(),
            "title".to_string(),
        );
        assert_eq!(schedule.schedule_type, ScheduleType::Preselect);
        assert!(schedule.editor_ids.is_empty());
        assert!(schedule.schedule_content.is_empty());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let schedule = Schedule::new(
            "sche-123".to_string(),
            &owner(),
            "".to_string(),
            "title".to_string(),
        );
        let value = serde_json::to_value(&schedule).unwrap();
        assert_eq!(value["scheduleId"], "sche-123");
        assert_eq!(value["scheduleType"], "PRESELECT");
        assert_eq!(value["ownerId"], "u1");
        assert!(value["editorIds"].as_array().unwrap().is_empty());
        assert!(value["scheduleContent"].as_object().unwrap().is_empty());
    }
}
