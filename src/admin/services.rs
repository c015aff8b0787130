use sqlx::PgPool;
use tracing::info;

use super::dto::{SetAdminRequest, UserSearch};
use crate::{
    auth::repo_types::User,
    db::{clamp_limit, search_term},
    error::{ApiResult, AppError},
    pain::{
        repo as pain_repo,
        repo_types::{PainRecord, RecordWindow},
    },
};

pub const DEFAULT_RECORD_LIMIT: i64 = 10;

pub async fn list_users(db: &PgPool, q: &UserSearch) -> ApiResult<Vec<User>> {
    let pattern = search_term(q.search.as_deref());
    Ok(User::list(db, pattern.as_deref()).await?)
}

pub async fn get_user(db: &PgPool, user_id: i64) -> ApiResult<User> {
    User::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))
}

pub async fn delete_user(db: &PgPool, admin_id: i64, user_id: i64) -> ApiResult<()> {
    if admin_id == user_id {
        return Err(AppError::validation(
            "use the account deletion route to delete your own account",
        ));
    }
    if !User::delete_cascade(db, user_id).await? {
        return Err(AppError::not_found("user not found"));
    }
    info!(admin_id, user_id, "user deleted by admin");
    Ok(())
}

pub async fn set_admin(
    db: &PgPool,
    admin_id: i64,
    user_id: i64,
    req: SetAdminRequest,
) -> ApiResult<User> {
    let is_admin = req
        .is_admin
        .ok_or_else(|| AppError::validation("is_admin is required"))?;
    if admin_id == user_id && !is_admin {
        return Err(AppError::validation("cannot revoke your own admin access"));
    }
    let user = User::set_admin(db, user_id, is_admin)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;
    info!(admin_id, user_id, is_admin, "admin flag changed");
    Ok(user)
}

/// Most recent records of one user, regardless of ownership.
pub async fn user_records(
    db: &PgPool,
    user_id: i64,
    limit: Option<i64>,
) -> ApiResult<Vec<PainRecord>> {
    get_user(db, user_id).await?;
    let limit = clamp_limit(limit, DEFAULT_RECORD_LIMIT);
    Ok(pain_repo::list_by_user(db, user_id, RecordWindow::default(), limit).await?)
}
