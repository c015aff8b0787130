use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{NewPainRecord, PainRecord, PainRecordChanges, RecordWindow};

const RECORD_COLUMNS: &str =
    "id, user_id, body_parts, intensity, description, record_time, created_at, updated_at";

/// Insert a record owned by `user_id`.
pub async fn insert(db: &PgPool, user_id: i64, new: &NewPainRecord) -> anyhow::Result<PainRecord> {
    let sql = format!(
        r#"
        INSERT INTO pain_records (user_id, body_parts, intensity, description, record_time)
        VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
        RETURNING {RECORD_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, PainRecord>(&sql)
        .bind(user_id)
        .bind(&new.body_parts)
        .bind(new.intensity)
        .bind(new.description.as_deref())
        .bind(new.record_time)
        .fetch_one(db)
        .await
        .context("insert pain record")?;
    Ok(row)
}

/// Newest first by `record_time`; equal timestamps keep insertion order.
pub async fn list_by_user(
    db: &PgPool,
    user_id: i64,
    window: RecordWindow,
    limit: i64,
) -> anyhow::Result<Vec<PainRecord>> {
    let sql = format!(
        r#"
        SELECT {RECORD_COLUMNS}
          FROM pain_records
         WHERE user_id = $1
           AND ($2::timestamptz IS NULL OR record_time >= $2)
           AND ($3::timestamptz IS NULL OR record_time <= $3)
         ORDER BY record_time DESC, id ASC
         LIMIT $4
        "#
    );
    let rows = sqlx::query_as::<_, PainRecord>(&sql)
        .bind(user_id)
        .bind(window.start)
        .bind(window.end)
        .bind(limit)
        .fetch_all(db)
        .await
        .context("list pain records")?;
    Ok(rows)
}

pub async fn get_owned(db: &PgPool, user_id: i64, id: i64) -> anyhow::Result<Option<PainRecord>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM pain_records WHERE id = $1 AND user_id = $2");
    let row = sqlx::query_as::<_, PainRecord>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("get pain record")?;
    Ok(row)
}

pub async fn update_owned(
    db: &PgPool,
    user_id: i64,
    id: i64,
    changes: &PainRecordChanges,
) -> anyhow::Result<Option<PainRecord>> {
    let sql = format!(
        r#"
        UPDATE pain_records
           SET body_parts = COALESCE($3, body_parts),
               intensity = COALESCE($4, intensity),
               description = COALESCE($5, description),
               record_time = COALESCE($6, record_time),
               updated_at = NOW()
         WHERE id = $1 AND user_id = $2
        RETURNING {RECORD_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, PainRecord>(&sql)
        .bind(id)
        .bind(user_id)
        .bind(changes.body_parts.as_ref())
        .bind(changes.intensity)
        .bind(changes.description.as_deref())
        .bind(changes.record_time)
        .fetch_optional(db)
        .await
        .context("update pain record")?;
    Ok(row)
}

/// Returns false when the record is missing or owned by someone else.
pub async fn delete_owned(db: &PgPool, user_id: i64, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM pain_records WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete pain record")?;
    Ok(res.rows_affected() > 0)
}
