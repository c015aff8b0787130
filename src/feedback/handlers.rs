use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::instrument;

use super::{
    dto::{CreateFeedbackRequest, FeedbackCreated},
    services,
};
use crate::{auth::AuthUser, error::ApiResult, extract::Payload, state::AppState};

pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/feedback", post(create_feedback))
}

#[instrument(skip(state, payload))]
pub async fn create_feedback(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Payload(payload): Payload<CreateFeedbackRequest>,
) -> ApiResult<(StatusCode, Json<FeedbackCreated>)> {
    let feedback = services::create(&state.db, user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(FeedbackCreated::new(feedback.id))))
}
