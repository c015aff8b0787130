use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::jwt::JwtKeys;
use crate::{auth::repo_types::User, error::AppError, state::AppState};

/// Authenticated caller, resolved from the `Authorization` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

/// Authenticated caller whose account carries the admin flag.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub i64);

/// Pulls the raw token out of an `Authorization` value; the `Bearer ` prefix
/// is optional.
pub(crate) fn bearer_token(header: &str) -> Option<&str> {
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .unwrap_or(header)
        .trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| AppError::Unauthorized("missing token".into()))?;

        let keys = JwtKeys::from_ref(state);
        match keys.verify(token) {
            Some(claims) => Ok(AuthUser(claims.user_id)),
            None => {
                warn!("invalid or expired token");
                Err(AppError::Unauthorized("invalid or expired token".into()))
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user_id) = AuthUser::from_request_parts(parts, state).await?;

        match User::admin_flag(&state.db, user_id).await? {
            Some(true) => Ok(AdminUser(user_id)),
            Some(false) => {
                warn!(user_id, "non-admin on admin route");
                Err(AppError::Forbidden("admin access required".into()))
            }
            None => Err(AppError::not_found("user not found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/pain/records");
        if let Some(value) = auth {
            builder = builder.header("authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_prefix_is_optional() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token(""), None);
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let state = AppState::fake();
        let err = AuthUser::from_request_parts(&mut parts_with(None), &state)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "missing token");
    }

    #[tokio::test]
    async fn bad_token_is_unauthorized() {
        let state = AppState::fake();
        let err = AuthUser::from_request_parts(&mut parts_with(Some("Bearer nope")), &state)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "invalid or expired token");
    }

    #[tokio::test]
    async fn valid_token_resolves_user_with_or_without_prefix() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign(99).unwrap();

        let AuthUser(id) =
            AuthUser::from_request_parts(&mut parts_with(Some(&format!("Bearer {token}"))), &state)
                .await
                .unwrap();
        assert_eq!(id, 99);

        let AuthUser(id) = AuthUser::from_request_parts(&mut parts_with(Some(&token)), &state)
            .await
            .unwrap();
        assert_eq!(id, 99);
    }

    #[tokio::test]
    async fn admin_gate_checks_token_before_store() {
        let state = AppState::fake();
        let err = AdminUser::from_request_parts(&mut parts_with(None), &state)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
