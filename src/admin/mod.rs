//! Back-office routes. Every handler requires [`crate::auth::AdminUser`].

pub mod dto;
pub mod handlers;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::user_routes())
        .merge(handlers::feedback_routes())
}
