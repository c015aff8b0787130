use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::auth::repo_types::User;

/// How much of a user's data may be shared with caregivers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSharePreference {
    #[default]
    None,
    Full,
    Diagnostic,
}

impl DataSharePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Full => "full",
            Self::Diagnostic => "diagnostic",
        }
    }

    /// Unknown stored values fall back to the most restrictive preference.
    pub fn from_db(raw: &str) -> Self {
        match raw {
            "full" => Self::Full,
            "diagnostic" => Self::Diagnostic,
            _ => Self::None,
        }
    }
}

/// Optional profile fields shared by registration and profile update.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(default, with = "crate::dates::optional_date")]
    pub birth_date: Option<Date>,
    pub sex: Option<String>,
    pub diagnosis: Option<String>,
    pub comorbidities: Option<String>,
}

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(flatten)]
    pub profile: ProfileFields,
    pub data_share_preference: Option<DataSharePreference>,
    pub notification_preferences: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(alias = "current_password")]
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub password: Option<String>,
}

/// Response returned after login or register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(with = "crate::dates::optional_date")]
    pub birth_date: Option<Date>,
    pub sex: Option<String>,
    pub diagnosis: Option<String>,
    pub comorbidities: Option<String>,
    pub data_share_preference: DataSharePreference,
    pub notification_preferences: Option<serde_json::Value>,
    pub is_admin: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            phone: u.phone,
            birth_date: u.birth_date,
            sex: u.sex,
            diagnosis: u.diagnosis,
            comorbidities: u.comorbidities,
            data_share_preference: DataSharePreference::from_db(&u.data_share_preference),
            notification_preferences: u.notification_preferences,
            is_admin: u.is_admin,
            created_at: u.created_at,
        }
    }
}
