use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Feedback {
    pub id: i64,
    pub user_id: i64,
    pub feedback_type: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Feedback joined with its author, for the admin views.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedbackWithAuthor {
    pub id: i64,
    pub user_id: i64,
    pub feedback_type: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
}

#[derive(Debug)]
pub struct NewFeedback {
    pub feedback_type: &'static str,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
}

/// Admin listing filters. `search` is an ILIKE pattern.
#[derive(Debug, Default)]
pub struct FeedbackFilter {
    pub search: Option<String>,
    pub feedback_type: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
