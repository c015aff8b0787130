use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{
            AuthResponse, ChangePasswordRequest, DeleteAccountRequest, LoginRequest,
            MessageResponse, RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
            UserEnvelope,
        },
        extractors::AuthUser,
        services,
    },
    error::ApiResult,
    extract::Payload,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/reset-password", post(reset_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/profile", get(get_profile).put(update_profile))
        .route("/auth/me", get(get_profile))
        .route("/auth/password", put(change_password))
        .route("/auth/delete-account", delete(delete_account))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Payload(payload): Payload<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let res = services::register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Payload(payload): Payload<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    Ok(Json(services::login(&state, payload).await?))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Payload(payload): Payload<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    services::reset_password(&state.db, payload).await?;
    Ok(Json(MessageResponse::new("password reset")))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<UserEnvelope>> {
    let user = services::load_profile(&state.db, user_id).await?;
    Ok(Json(UserEnvelope { user: user.into() }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Payload(payload): Payload<UpdateProfileRequest>,
) -> ApiResult<Json<UserEnvelope>> {
    let user = services::update_profile(&state.db, user_id, payload).await?;
    Ok(Json(UserEnvelope { user: user.into() }))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Payload(payload): Payload<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    services::change_password(&state.db, user_id, payload).await?;
    Ok(Json(MessageResponse::new("password changed")))
}

#[instrument(skip(state, payload))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Payload(payload): Payload<DeleteAccountRequest>,
) -> ApiResult<Json<MessageResponse>> {
    services::delete_account(&state.db, user_id, payload).await?;
    Ok(Json(MessageResponse::new("account deleted")))
}
