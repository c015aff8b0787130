use axum::extract::FromRef;
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, ChangePasswordRequest, DeleteAccountRequest, LoginRequest,
            ProfileFields, RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
        },
        jwt::JwtKeys,
        password::{check_strength, hash_password, verify_password},
        repo_types::{NewUser, ProfileChanges, User},
    },
    db::is_unique_violation,
    error::{ApiResult, AppError},
    state::AppState,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trims a required string field and rejects it when absent or blank.
fn required<'a>(value: &'a Option<String>, msg: &str) -> ApiResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::validation(msg))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn issue(state: &AppState, user: User) -> ApiResult<AuthResponse> {
    let token = JwtKeys::from_ref(state).sign(user.id)?;
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

pub async fn register(state: &AppState, req: RegisterRequest) -> ApiResult<AuthResponse> {
    let (email, password) = match (non_blank(&req.email), req.password.as_deref()) {
        (Some(e), Some(p)) if !p.is_empty() => (normalize_email(e), p),
        _ => return Err(AppError::validation("email and password are required")),
    };
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::validation("invalid email"));
    }
    check_strength(password)?;

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("email already registered".into()));
    }

    let hash = hash_password(password)?;
    let ProfileFields {
        name,
        phone,
        birth_date,
        sex,
        diagnosis,
        comorbidities,
    } = &req.profile;
    let new = NewUser {
        email: &email,
        password_hash: &hash,
        name: non_blank(name),
        phone: non_blank(phone),
        birth_date: *birth_date,
        sex: non_blank(sex),
        diagnosis: non_blank(diagnosis),
        comorbidities: non_blank(comorbidities),
    };

    // The pre-check above races with concurrent registrations; the unique
    // index is the final arbiter.
    let user = match User::create(&state.db, &new).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "email registered concurrently");
            return Err(AppError::Conflict("email already registered".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, email = %user.email, "user registered");
    issue(state, user)
}

pub async fn login(state: &AppState, req: LoginRequest) -> ApiResult<AuthResponse> {
    let (email, password) = match (non_blank(&req.email), req.password.as_deref()) {
        (Some(e), Some(p)) if !p.is_empty() => (normalize_email(e), p),
        _ => return Err(AppError::validation("email and password are required")),
    };

    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Unauthorized("invalid credentials".into()));
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::Unauthorized("invalid credentials".into()));
    }

    info!(user_id = user.id, "user logged in");
    issue(state, user)
}

pub async fn load_profile(db: &PgPool, user_id: i64) -> ApiResult<User> {
    User::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))
}

pub async fn update_profile(
    db: &PgPool,
    user_id: i64,
    req: UpdateProfileRequest,
) -> ApiResult<User> {
    let p = &req.profile;
    let changes = ProfileChanges {
        name: non_blank(&p.name),
        phone: non_blank(&p.phone),
        birth_date: p.birth_date,
        sex: non_blank(&p.sex),
        diagnosis: non_blank(&p.diagnosis),
        comorbidities: non_blank(&p.comorbidities),
        data_share_preference: req.data_share_preference.map(|d| d.as_str()),
        notification_preferences: req.notification_preferences.clone(),
    };
    let user = User::update_profile(db, user_id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;
    info!(user_id, "profile updated");
    Ok(user)
}

pub async fn change_password(
    db: &PgPool,
    user_id: i64,
    req: ChangePasswordRequest,
) -> ApiResult<()> {
    let old = required(&req.old_password, "old_password and new_password are required")?;
    let new = required(&req.new_password, "old_password and new_password are required")?;
    check_strength(new)?;

    let user = load_profile(db, user_id).await?;
    if !verify_password(old, &user.password_hash)? {
        warn!(user_id, "password change with wrong old password");
        return Err(AppError::Unauthorized("current password is incorrect".into()));
    }

    let hash = hash_password(new)?;
    if !User::set_password_hash(db, user_id, &hash).await? {
        return Err(AppError::not_found("user not found"));
    }
    info!(user_id, "password changed");
    Ok(())
}

pub async fn reset_password(db: &PgPool, req: ResetPasswordRequest) -> ApiResult<()> {
    let email = required(&req.email, "email and new_password are required")?;
    let new = required(&req.new_password, "email and new_password are required")?;
    check_strength(new)?;

    let email = normalize_email(email);
    let Some(user) = User::find_by_email(db, &email).await? else {
        warn!(email = %email, "password reset for unknown email");
        return Err(AppError::not_found("email not found"));
    };

    let hash = hash_password(new)?;
    User::set_password_hash(db, user.id, &hash).await?;
    info!(user_id = user.id, "password reset");
    Ok(())
}

pub async fn delete_account(
    db: &PgPool,
    user_id: i64,
    req: DeleteAccountRequest,
) -> ApiResult<()> {
    let password = required(&req.password, "password confirmation is required")?;
    let user = load_profile(db, user_id).await?;

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id, "account deletion with wrong password");
        return Err(AppError::Unauthorized("incorrect password".into()));
    }

    if !User::delete_cascade(db, user_id).await? {
        return Err(AppError::not_found("user not found"));
    }
    info!(user_id, "account deleted");
    Ok(())
}

/// Shared by admin password resets, which skip the old-password check.
pub async fn force_password(db: &PgPool, user_id: i64, new: Option<&str>) -> ApiResult<()> {
    let new = new
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("new_password is required"))?;
    check_strength(new)?;
    let hash = hash_password(new)?;
    if !User::set_password_hash(db, user_id, &hash).await? {
        return Err(AppError::not_found("user not found"));
    }
    info!(user_id, "password set by admin");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("alice@x.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@x"));
        assert!(!is_valid_email("al ice@x.com"));
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Alice@X.COM "), "alice@x.com");
    }

    #[test]
    fn required_rejects_blank() {
        assert!(required(&None, "m").is_err());
        assert!(required(&Some("   ".into()), "m").is_err());
        assert_eq!(required(&Some("pw".into()), "m").unwrap(), "pw");
    }

    #[test]
    fn short_new_password_is_validation_error() {
        let err = check_strength("12345").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(check_strength("123456").is_ok());
    }

    #[tokio::test]
    async fn register_validates_before_touching_store() {
        let state = AppState::fake();
        let missing = RegisterRequest {
            email: Some("alice@x.com".into()),
            password: None,
            profile: ProfileFields::default(),
        };
        let err = register(&state, missing).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let bad_email = RegisterRequest {
            email: Some("not-an-email".into()),
            password: Some("pw123456".into()),
            profile: ProfileFields::default(),
        };
        let err = register(&state, bad_email).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid email");
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let state = AppState::fake();
        let err = login(
            &state,
            LoginRequest {
                email: Some("alice@x.com".into()),
                password: Some(String::new()),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
