use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{RecordLimit, SetAdminRequest, SetPasswordRequest, UserList, UserRecords, UserSearch},
    services,
};
use crate::{
    auth::{
        dto::{MessageResponse, UserEnvelope},
        services::force_password,
        AdminUser,
    },
    error::ApiResult,
    extract::{Params, Payload, RowId},
    feedback::{
        dto::{FeedbackPage, FeedbackQuery},
        repo_types::FeedbackWithAuthor,
        services as feedback,
    },
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id", get(get_user).delete(delete_user))
        .route("/admin/users/:id/password", put(set_password))
        .route("/admin/users/:id/admin", put(set_admin))
        .route("/admin/users/:id/pain-records", get(user_records))
}

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/feedback", get(list_feedback))
        .route("/admin/feedback/:id", get(get_feedback).delete(delete_feedback))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Params(q): Params<UserSearch>,
) -> ApiResult<Json<UserList>> {
    let users = services::list_users(&state.db, &q).await?;
    Ok(Json(UserList {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    RowId(id): RowId,
) -> ApiResult<Json<UserEnvelope>> {
    let user = services::get_user(&state.db, id).await?;
    Ok(Json(UserEnvelope { user: user.into() }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    RowId(id): RowId,
) -> ApiResult<Json<MessageResponse>> {
    services::delete_user(&state.db, admin_id, id).await?;
    Ok(Json(MessageResponse::new("user deleted")))
}

#[instrument(skip(state, payload))]
pub async fn set_password(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    RowId(id): RowId,
    Payload(payload): Payload<SetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    force_password(&state.db, id, payload.new_password.as_deref()).await?;
    Ok(Json(MessageResponse::new("password updated")))
}

#[instrument(skip(state, payload))]
pub async fn set_admin(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    RowId(id): RowId,
    Payload(payload): Payload<SetAdminRequest>,
) -> ApiResult<Json<UserEnvelope>> {
    let user = services::set_admin(&state.db, admin_id, id, payload).await?;
    Ok(Json(UserEnvelope { user: user.into() }))
}

#[instrument(skip(state))]
pub async fn user_records(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    RowId(id): RowId,
    Params(q): Params<RecordLimit>,
) -> ApiResult<Json<UserRecords>> {
    let records = services::user_records(&state.db, id, q.limit).await?;
    Ok(Json(UserRecords { user_id: id, records }))
}

#[instrument(skip(state))]
pub async fn list_feedback(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Params(q): Params<FeedbackQuery>,
) -> ApiResult<Json<FeedbackPage>> {
    Ok(Json(feedback::search(&state.db, &q).await?))
}

#[instrument(skip(state))]
pub async fn get_feedback(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    RowId(id): RowId,
) -> ApiResult<Json<FeedbackWithAuthor>> {
    Ok(Json(feedback::get(&state.db, id).await?))
}

#[instrument(skip(state))]
pub async fn delete_feedback(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    RowId(id): RowId,
) -> ApiResult<Json<MessageResponse>> {
    feedback::delete(&state.db, id).await?;
    Ok(Json(MessageResponse::new("feedback deleted")))
}
