use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use super::{
    dto::{CreatePainRecordRequest, ListQuery, RecordList, UpdatePainRecordRequest},
    repo_types::PainRecord,
    services,
};
use crate::{
    auth::{dto::MessageResponse, AuthUser},
    error::ApiResult,
    extract::{Params, Payload, RowId},
    state::AppState,
};

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/pain/records", get(list_records).post(create_record))
        .route(
            "/pain/records/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Payload(payload): Payload<CreatePainRecordRequest>,
) -> ApiResult<(StatusCode, Json<PainRecord>)> {
    let record = services::create(&state.db, user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[instrument(skip(state))]
pub async fn list_records(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Params(q): Params<ListQuery>,
) -> ApiResult<Json<RecordList>> {
    let records = services::list(&state.db, user_id, &q).await?;
    Ok(Json(RecordList { records }))
}

#[instrument(skip(state))]
pub async fn get_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    RowId(id): RowId,
) -> ApiResult<Json<PainRecord>> {
    Ok(Json(services::get(&state.db, user_id, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    RowId(id): RowId,
    Payload(payload): Payload<UpdatePainRecordRequest>,
) -> ApiResult<Json<PainRecord>> {
    Ok(Json(services::update(&state.db, user_id, id, payload).await?))
}

#[instrument(skip(state))]
pub async fn delete_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    RowId(id): RowId,
) -> ApiResult<Json<MessageResponse>> {
    services::delete(&state.db, user_id, id).await?;
    Ok(Json(MessageResponse::new("record deleted")))
}
