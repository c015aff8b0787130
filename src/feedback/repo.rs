use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{Feedback, FeedbackFilter, FeedbackWithAuthor, NewFeedback};

const JOINED_COLUMNS: &str = "f.id, f.user_id, f.feedback_type, f.name, f.email, f.message, \
     f.created_at, u.name AS user_name, u.email AS user_email, u.phone AS user_phone";

const FILTER: &str = r#"
    ($1::text IS NULL
        OR f.name ILIKE $1 OR f.email ILIKE $1 OR f.message ILIKE $1
        OR u.name ILIKE $1 OR u.email ILIKE $1)
    AND ($2::text IS NULL OR f.feedback_type = $2)
"#;

pub async fn insert(db: &PgPool, user_id: i64, new: &NewFeedback) -> anyhow::Result<Feedback> {
    let row = sqlx::query_as::<_, Feedback>(
        r#"
        INSERT INTO feedback (user_id, feedback_type, name, email, message)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, feedback_type, name, email, message, created_at
        "#,
    )
    .bind(user_id)
    .bind(new.feedback_type)
    .bind(new.name.as_deref())
    .bind(new.email.as_deref())
    .bind(&new.message)
    .fetch_one(db)
    .await
    .context("insert feedback")?;
    Ok(row)
}

/// One page of matching feedback plus the total match count.
pub async fn search(
    db: &PgPool,
    filter: &FeedbackFilter,
) -> anyhow::Result<(Vec<FeedbackWithAuthor>, i64)> {
    let sql = format!(
        r#"
        SELECT {JOINED_COLUMNS}
          FROM feedback f
          LEFT JOIN users u ON u.id = f.user_id
         WHERE {FILTER}
         ORDER BY f.created_at DESC, f.id DESC
         LIMIT $3 OFFSET $4
        "#
    );
    let rows = sqlx::query_as::<_, FeedbackWithAuthor>(&sql)
        .bind(filter.search.as_deref())
        .bind(filter.feedback_type.as_deref())
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(db)
        .await
        .context("search feedback")?;

    let count_sql = format!(
        r#"
        SELECT COUNT(*)
          FROM feedback f
          LEFT JOIN users u ON u.id = f.user_id
         WHERE {FILTER}
        "#
    );
    let total = sqlx::query_scalar::<_, i64>(&count_sql)
        .bind(filter.search.as_deref())
        .bind(filter.feedback_type.as_deref())
        .fetch_one(db)
        .await
        .context("count feedback")?;

    Ok((rows, total))
}

pub async fn get(db: &PgPool, id: i64) -> anyhow::Result<Option<FeedbackWithAuthor>> {
    let sql = format!(
        r#"
        SELECT {JOINED_COLUMNS}
          FROM feedback f
          LEFT JOIN users u ON u.id = f.user_id
         WHERE f.id = $1
        "#
    );
    let row = sqlx::query_as::<_, FeedbackWithAuthor>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("get feedback")?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM feedback WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("delete feedback")?;
    Ok(res.rows_affected() > 0)
}
