use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PainRecord {
    pub id: i64,
    pub user_id: i64,
    pub body_parts: Vec<String>,
    pub intensity: i32,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub record_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Validated values for an insert.
#[derive(Debug)]
pub struct NewPainRecord {
    pub body_parts: Vec<String>,
    pub intensity: i32,
    pub description: Option<String>,
    pub record_time: Option<OffsetDateTime>,
}

/// Validated partial update; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct PainRecordChanges {
    pub body_parts: Option<Vec<String>>,
    pub intensity: Option<i32>,
    pub description: Option<String>,
    pub record_time: Option<OffsetDateTime>,
}

/// Inclusive bounds on `record_time`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordWindow {
    pub start: Option<OffsetDateTime>,
    pub end: Option<OffsetDateTime>,
}
