use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub reminder_type: String,
    pub title: String,
    pub description: Option<String>,
    pub frequency: String,
    #[serde(rename = "time")]
    pub time_of_day: String,
    pub is_active: bool,
    pub selected_days: Option<serde_json::Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug)]
pub struct NewReminder {
    pub reminder_type: &'static str,
    pub title: String,
    pub description: Option<String>,
    pub frequency: String,
    pub time_of_day: String,
    pub is_active: bool,
    pub selected_days: Option<serde_json::Value>,
}

#[derive(Debug, Default)]
pub struct ReminderChanges {
    pub reminder_type: Option<&'static str>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub time_of_day: Option<String>,
    pub is_active: Option<bool>,
    pub selected_days: Option<serde_json::Value>,
}
