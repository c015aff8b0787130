use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{NewReminder, Reminder, ReminderChanges};

const REMINDER_COLUMNS: &str = "id, user_id, reminder_type, title, description, frequency, \
     time_of_day, is_active, selected_days, created_at, updated_at";

pub async fn insert(db: &PgPool, user_id: i64, new: &NewReminder) -> anyhow::Result<Reminder> {
    let sql = format!(
        r#"
        INSERT INTO reminders (user_id, reminder_type, title, description, frequency,
                               time_of_day, is_active, selected_days)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {REMINDER_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, Reminder>(&sql)
        .bind(user_id)
        .bind(new.reminder_type)
        .bind(&new.title)
        .bind(new.description.as_deref())
        .bind(&new.frequency)
        .bind(&new.time_of_day)
        .bind(new.is_active)
        .bind(new.selected_days.clone())
        .fetch_one(db)
        .await
        .context("insert reminder")?;
    Ok(row)
}

pub async fn list_by_user(db: &PgPool, user_id: i64, limit: i64) -> anyhow::Result<Vec<Reminder>> {
    let sql = format!(
        "SELECT {REMINDER_COLUMNS} FROM reminders WHERE user_id = $1 \
         ORDER BY created_at DESC, id DESC LIMIT $2"
    );
    let rows = sqlx::query_as::<_, Reminder>(&sql)
        .bind(user_id)
        .bind(limit)
        .fetch_all(db)
        .await
        .context("list reminders")?;
    Ok(rows)
}

pub async fn get_owned(db: &PgPool, user_id: i64, id: i64) -> anyhow::Result<Option<Reminder>> {
    let sql = format!("SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = $1 AND user_id = $2");
    let row = sqlx::query_as::<_, Reminder>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("get reminder")?;
    Ok(row)
}

pub async fn update_owned(
    db: &PgPool,
    user_id: i64,
    id: i64,
    changes: &ReminderChanges,
) -> anyhow::Result<Option<Reminder>> {
    let sql = format!(
        r#"
        UPDATE reminders
           SET reminder_type = COALESCE($3, reminder_type),
               title = COALESCE($4, title),
               description = COALESCE($5, description),
               frequency = COALESCE($6, frequency),
               time_of_day = COALESCE($7, time_of_day),
               is_active = COALESCE($8, is_active),
               selected_days = COALESCE($9, selected_days),
               updated_at = NOW()
         WHERE id = $1 AND user_id = $2
        RETURNING {REMINDER_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, Reminder>(&sql)
        .bind(id)
        .bind(user_id)
        .bind(changes.reminder_type)
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.frequency.as_deref())
        .bind(changes.time_of_day.as_deref())
        .bind(changes.is_active)
        .bind(changes.selected_days.clone())
        .fetch_optional(db)
        .await
        .context("update reminder")?;
    Ok(row)
}

pub async fn delete_owned(db: &PgPool, user_id: i64, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM reminders WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete reminder")?;
    Ok(res.rows_affected() > 0)
}
