use sqlx::FromRow;
use time::{Date, OffsetDateTime};

/// User record in the database. Not serializable: responses go through
/// `PublicUser`, so the hash never leaves the store layer.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String, // Argon2 PHC string
    pub name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<Date>,
    pub sex: Option<String>,
    pub diagnosis: Option<String>,
    pub comorbidities: Option<String>,
    pub data_share_preference: String,
    pub notification_preferences: Option<serde_json::Value>,
    pub is_admin: bool,
    pub created_at: OffsetDateTime,
}

/// Profile fields accepted at registration.
#[derive(Debug, Default)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub birth_date: Option<Date>,
    pub sex: Option<&'a str>,
    pub diagnosis: Option<&'a str>,
    pub comorbidities: Option<&'a str>,
}

/// Partial profile update; `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct ProfileChanges<'a> {
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub birth_date: Option<Date>,
    pub sex: Option<&'a str>,
    pub diagnosis: Option<&'a str>,
    pub comorbidities: Option<&'a str>,
    pub data_share_preference: Option<&'a str>,
    pub notification_preferences: Option<serde_json::Value>,
}
