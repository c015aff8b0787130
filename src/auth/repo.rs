use anyhow::Context;
use sqlx::PgPool;

use crate::auth::repo_types::{NewUser, ProfileChanges, User};

const USER_COLUMNS: &str = "id, email, password_hash, name, phone, birth_date, sex, \
     diagnosis, comorbidities, data_share_preference, notification_preferences, \
     is_admin, created_at";

impl User {
    /// Find a user by (already normalized) email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(db)
            .await
            .context("find user by email")?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("find user by id")?;
        Ok(user)
    }

    /// Insert a new user. The hash must already be computed.
    pub async fn create(db: &PgPool, new: &NewUser<'_>) -> anyhow::Result<User> {
        let sql = format!(
            r#"
            INSERT INTO users (email, password_hash, name, phone, birth_date, sex,
                               diagnosis, comorbidities)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(new.email)
            .bind(new.password_hash)
            .bind(new.name)
            .bind(new.phone)
            .bind(new.birth_date)
            .bind(new.sex)
            .bind(new.diagnosis)
            .bind(new.comorbidities)
            .fetch_one(db)
            .await
            .context("insert user")?;
        Ok(user)
    }

    pub async fn update_profile(
        db: &PgPool,
        id: i64,
        changes: &ProfileChanges<'_>,
    ) -> anyhow::Result<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users
               SET name = COALESCE($2, name),
                   phone = COALESCE($3, phone),
                   birth_date = COALESCE($4, birth_date),
                   sex = COALESCE($5, sex),
                   diagnosis = COALESCE($6, diagnosis),
                   comorbidities = COALESCE($7, comorbidities),
                   data_share_preference = COALESCE($8, data_share_preference),
                   notification_preferences = COALESCE($9, notification_preferences),
                   updated_at = NOW()
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.phone)
            .bind(changes.birth_date)
            .bind(changes.sex)
            .bind(changes.diagnosis)
            .bind(changes.comorbidities)
            .bind(changes.data_share_preference)
            .bind(changes.notification_preferences.clone())
            .fetch_optional(db)
            .await
            .context("update user profile")?;
        Ok(user)
    }

    /// Returns false when no such user exists.
    pub async fn set_password_hash(db: &PgPool, id: i64, hash: &str) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(hash)
        .execute(db)
        .await
        .context("update password hash")?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn admin_flag(db: &PgPool, id: i64) -> anyhow::Result<Option<bool>> {
        let flag = sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .context("load admin flag")?;
        Ok(flag)
    }

    pub async fn set_admin(db: &PgPool, id: i64, is_admin: bool) -> anyhow::Result<Option<User>> {
        let sql = format!(
            "UPDATE users SET is_admin = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(is_admin)
            .fetch_optional(db)
            .await
            .context("update admin flag")?;
        Ok(user)
    }

    /// Case-insensitive match on name or email; `pattern` is an ILIKE pattern.
    pub async fn list(db: &PgPool, pattern: Option<&str>) -> anyhow::Result<Vec<User>> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
              FROM users
             WHERE $1::text IS NULL OR name ILIKE $1 OR email ILIKE $1
             ORDER BY created_at DESC, id DESC
            "#
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(pattern)
            .fetch_all(db)
            .await
            .context("list users")?;
        Ok(users)
    }

    /// Deletes the user and every row it owns in one transaction. Returns
    /// false (and changes nothing) when the user does not exist.
    pub async fn delete_cascade(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let mut tx = db.begin().await.context("begin tx")?;

        for table in ["feedback", "reminders", "pain_records"] {
            let sql = format!("DELETE FROM {table} WHERE user_id = $1");
            sqlx::query(&sql)
                .bind(id)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("delete {table} of user"))?;
        }

        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("delete user")?;

        if res.rows_affected() == 0 {
            tx.rollback().await.context("rollback tx")?;
            return Ok(false);
        }
        tx.commit().await.context("commit tx")?;
        Ok(true)
    }
}
