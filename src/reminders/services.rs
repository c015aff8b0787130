use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::info;

use super::{
    dto::{CreateReminderRequest, ReminderListQuery, ReminderType, UpdateReminderRequest},
    repo,
    repo_types::{NewReminder, Reminder, ReminderChanges},
};
use crate::{
    db::{clamp_limit, DEFAULT_LIST_LIMIT},
    error::{ApiResult, AppError},
};

pub const DEFAULT_FREQUENCY: &str = "daily";

lazy_static! {
    static ref TIME_RE: Regex = Regex::new(r"^(([01]\d|2[0-3]):[0-5]\d)(:[0-5]\d)?$").unwrap();
}

/// `HH:MM` or `HH:MM:SS`, 24-hour clock.
pub fn is_valid_time_of_day(raw: &str) -> bool {
    TIME_RE.is_match(raw)
}

/// Reduces an accepted time to `HH:MM`; seconds are dropped.
pub fn normalize_time_of_day(raw: &str) -> Option<String> {
    TIME_RE
        .captures(raw.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn reminder_type(raw: &str) -> ApiResult<&'static str> {
    ReminderType::parse(raw)
        .map(ReminderType::as_str)
        .ok_or_else(|| AppError::validation("invalid reminder type"))
}

fn time_of_day(raw: &str) -> ApiResult<String> {
    normalize_time_of_day(raw).ok_or_else(|| AppError::validation("time must be HH:MM"))
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_new(req: CreateReminderRequest) -> ApiResult<NewReminder> {
    let Some(kind) = present(req.reminder_type) else {
        return Err(AppError::validation("missing required field: type"));
    };
    let Some(title) = present(req.title) else {
        return Err(AppError::validation("missing required field: title"));
    };
    let Some(time) = present(req.time) else {
        return Err(AppError::validation("missing required field: time"));
    };
    Ok(NewReminder {
        reminder_type: reminder_type(&kind)?,
        title,
        description: req.description.map(|d| d.trim().to_string()),
        frequency: present(req.frequency).unwrap_or_else(|| DEFAULT_FREQUENCY.to_string()),
        time_of_day: time_of_day(&time)?,
        is_active: req.is_active.unwrap_or(true),
        selected_days: req.selected_days,
    })
}

pub fn validate_changes(req: UpdateReminderRequest) -> ApiResult<ReminderChanges> {
    Ok(ReminderChanges {
        reminder_type: present(req.reminder_type)
            .map(|t| reminder_type(&t))
            .transpose()?,
        title: present(req.title),
        description: req.description.map(|d| d.trim().to_string()),
        frequency: present(req.frequency),
        time_of_day: present(req.time).map(|t| time_of_day(&t)).transpose()?,
        is_active: req.is_active,
        selected_days: req.selected_days,
    })
}

pub async fn create(db: &PgPool, user_id: i64, req: CreateReminderRequest) -> ApiResult<Reminder> {
    let new = validate_new(req)?;
    let reminder = repo::insert(db, user_id, &new).await?;
    info!(user_id, reminder_id = reminder.id, "reminder created");
    Ok(reminder)
}

pub async fn list(db: &PgPool, user_id: i64, q: &ReminderListQuery) -> ApiResult<Vec<Reminder>> {
    let limit = clamp_limit(q.limit, DEFAULT_LIST_LIMIT);
    Ok(repo::list_by_user(db, user_id, limit).await?)
}

pub async fn get(db: &PgPool, user_id: i64, id: i64) -> ApiResult<Reminder> {
    repo::get_owned(db, user_id, id)
        .await?
        .ok_or_else(|| AppError::not_found("reminder not found"))
}

pub async fn update(
    db: &PgPool,
    user_id: i64,
    id: i64,
    req: UpdateReminderRequest,
) -> ApiResult<Reminder> {
    let changes = validate_changes(req)?;
    let reminder = repo::update_owned(db, user_id, id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found("reminder not found"))?;
    info!(user_id, reminder_id = id, "reminder updated");
    Ok(reminder)
}

pub async fn delete(db: &PgPool, user_id: i64, id: i64) -> ApiResult<()> {
    if !repo::delete_owned(db, user_id, id).await? {
        return Err(AppError::not_found("reminder not found"));
    }
    info!(user_id, reminder_id = id, "reminder deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_req(kind: &str, title: &str, time: &str) -> CreateReminderRequest {
        CreateReminderRequest {
            reminder_type: Some(kind.into()),
            title: Some(title.into()),
            description: None,
            frequency: None,
            time: Some(time.into()),
            is_active: None,
            selected_days: None,
        }
    }

    #[test]
    fn time_of_day_format() {
        assert!(is_valid_time_of_day("00:00"));
        assert!(is_valid_time_of_day("08:30"));
        assert!(is_valid_time_of_day("23:59"));
        assert!(!is_valid_time_of_day("24:00"));
        assert!(!is_valid_time_of_day("8:30"));
        assert!(!is_valid_time_of_day("08:60"));
        assert!(is_valid_time_of_day("08:30:00"));
        assert!(!is_valid_time_of_day("08:30:60"));
        assert!(!is_valid_time_of_day("08:30:0"));
    }

    #[test]
    fn seconds_are_dropped() {
        assert_eq!(normalize_time_of_day(" 08:30:45 ").as_deref(), Some("08:30"));
        assert_eq!(normalize_time_of_day("21:00").as_deref(), Some("21:00"));
        assert_eq!(normalize_time_of_day("7:00"), None);

        let new = validate_new(create_req("hydration", "Water", "10:15:00")).unwrap();
        assert_eq!(new.time_of_day, "10:15");
    }

    #[test]
    fn every_known_type_round_trips() {
        for t in ReminderType::ALL {
            assert_eq!(ReminderType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ReminderType::parse("yoga"), None);
    }

    #[test]
    fn new_reminder_gets_defaults() {
        let new = validate_new(create_req("medication", " Take pill ", "21:00")).unwrap();
        assert_eq!(new.reminder_type, "medication");
        assert_eq!(new.title, "Take pill");
        assert_eq!(new.frequency, DEFAULT_FREQUENCY);
        assert!(new.is_active);
    }

    #[test]
    fn new_reminder_rejects_bad_input() {
        let err = validate_new(create_req("yoga", "Stretch", "07:00")).unwrap_err();
        assert_eq!(err.to_string(), "invalid reminder type");
        let err = validate_new(create_req("exercise", "  ", "07:00")).unwrap_err();
        assert_eq!(err.to_string(), "missing required field: title");
        assert!(validate_new(create_req("exercise", "Walk", "7am")).is_err());
    }

    #[test]
    fn changes_check_type_when_present() {
        let ok = validate_changes(UpdateReminderRequest {
            is_active: Some(false),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ok.is_active, Some(false));
        assert!(ok.reminder_type.is_none());

        let bad = validate_changes(UpdateReminderRequest {
            reminder_type: Some("nap".into()),
            ..Default::default()
        });
        assert!(bad.is_err());
    }
}
