use serde::{Deserialize, Serialize};

use super::repo_types::Reminder;

/// Fixed set of reminder categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderType {
    Exercise,
    Medication,
    Appointment,
    Practice,
    Hydration,
    Diet,
}

impl ReminderType {
    pub const ALL: [ReminderType; 6] = [
        Self::Exercise,
        Self::Medication,
        Self::Appointment,
        Self::Practice,
        Self::Hydration,
        Self::Diet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exercise => "exercise",
            Self::Medication => "medication",
            Self::Appointment => "appointment",
            Self::Practice => "practice",
            Self::Hydration => "hydration",
            Self::Diet => "diet",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    #[serde(rename = "type")]
    pub reminder_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub time: Option<String>,
    pub is_active: Option<bool>,
    pub selected_days: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateReminderRequest {
    #[serde(rename = "type")]
    pub reminder_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub time: Option<String>,
    pub is_active: Option<bool>,
    pub selected_days: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReminderListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReminderList {
    pub reminders: Vec<Reminder>,
}
