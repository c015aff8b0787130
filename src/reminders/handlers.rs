use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use super::{
    dto::{CreateReminderRequest, ReminderList, ReminderListQuery, UpdateReminderRequest},
    repo_types::Reminder,
    services,
};
use crate::{
    auth::{dto::MessageResponse, AuthUser},
    error::ApiResult,
    extract::{Params, Payload, RowId},
    state::AppState,
};

pub fn reminder_routes() -> Router<AppState> {
    Router::new()
        .route("/reminders", get(list_reminders).post(create_reminder))
        .route(
            "/reminders/:id",
            get(get_reminder).put(update_reminder).delete(delete_reminder),
        )
}

#[instrument(skip(state))]
pub async fn list_reminders(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Params(q): Params<ReminderListQuery>,
) -> ApiResult<Json<ReminderList>> {
    let reminders = services::list(&state.db, user_id, &q).await?;
    Ok(Json(ReminderList { reminders }))
}

#[instrument(skip(state, payload))]
pub async fn create_reminder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Payload(payload): Payload<CreateReminderRequest>,
) -> ApiResult<(StatusCode, Json<Reminder>)> {
    let reminder = services::create(&state.db, user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

#[instrument(skip(state))]
pub async fn get_reminder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    RowId(id): RowId,
) -> ApiResult<Json<Reminder>> {
    Ok(Json(services::get(&state.db, user_id, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_reminder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    RowId(id): RowId,
    Payload(payload): Payload<UpdateReminderRequest>,
) -> ApiResult<Json<Reminder>> {
    Ok(Json(services::update(&state.db, user_id, id, payload).await?))
}

#[instrument(skip(state))]
pub async fn delete_reminder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    RowId(id): RowId,
) -> ApiResult<Json<MessageResponse>> {
    services::delete(&state.db, user_id, id).await?;
    Ok(Json(MessageResponse::new("reminder deleted")))
}
