use sqlx::PgPool;
use tracing::info;

use super::{
    dto::{CreateFeedbackRequest, FeedbackPage, FeedbackQuery, FeedbackType},
    repo,
    repo_types::{Feedback, FeedbackFilter, FeedbackWithAuthor, NewFeedback},
};
use crate::{
    db::{clamp_limit, search_term, DEFAULT_LIST_LIMIT},
    error::{ApiResult, AppError},
};

pub const MIN_MESSAGE_LEN: usize = 10;

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_new(req: CreateFeedbackRequest) -> ApiResult<NewFeedback> {
    let kind = optional(req.feedback_type)
        .ok_or_else(|| AppError::validation("feedback_type is required"))?;
    let feedback_type = FeedbackType::parse(&kind)
        .ok_or_else(|| AppError::validation("invalid feedback type"))?;

    let message =
        optional(req.message).ok_or_else(|| AppError::validation("message is required"))?;
    if message.chars().count() < MIN_MESSAGE_LEN {
        return Err(AppError::validation(format!(
            "message must be at least {MIN_MESSAGE_LEN} characters"
        )));
    }

    Ok(NewFeedback {
        feedback_type: feedback_type.as_str(),
        name: optional(req.name),
        email: optional(req.email),
        message,
    })
}

pub fn filter_from_query(q: &FeedbackQuery) -> FeedbackFilter {
    FeedbackFilter {
        search: search_term(q.search.as_deref()),
        feedback_type: q
            .feedback_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        limit: clamp_limit(q.limit, DEFAULT_LIST_LIMIT),
        offset: q.offset.unwrap_or(0).max(0),
    }
}

pub async fn create(
    db: &PgPool,
    user_id: i64,
    req: CreateFeedbackRequest,
) -> ApiResult<Feedback> {
    let new = validate_new(req)?;
    let feedback = repo::insert(db, user_id, &new).await?;
    info!(user_id, feedback_id = feedback.id, kind = new.feedback_type, "feedback received");
    Ok(feedback)
}

pub async fn search(db: &PgPool, q: &FeedbackQuery) -> ApiResult<FeedbackPage> {
    let filter = filter_from_query(q);
    let (feedbacks, total) = repo::search(db, &filter).await?;
    Ok(FeedbackPage {
        feedbacks,
        total,
        limit: filter.limit,
        offset: filter.offset,
    })
}

pub async fn get(db: &PgPool, id: i64) -> ApiResult<FeedbackWithAuthor> {
    repo::get(db, id)
        .await?
        .ok_or_else(|| AppError::not_found("feedback not found"))
}

pub async fn delete(db: &PgPool, id: i64) -> ApiResult<()> {
    if !repo::delete(db, id).await? {
        return Err(AppError::not_found("feedback not found"));
    }
    info!(feedback_id = id, "feedback deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(kind: Option<&str>, message: Option<&str>) -> CreateFeedbackRequest {
        CreateFeedbackRequest {
            feedback_type: kind.map(Into::into),
            name: Some("  ".into()),
            email: Some(" ana@x.com ".into()),
            message: message.map(Into::into),
        }
    }

    #[test]
    fn accepts_valid_feedback() {
        let new = validate_new(req(Some("compliment"), Some("  Great app, thanks!  "))).unwrap();
        assert_eq!(new.feedback_type, "compliment");
        assert_eq!(new.message, "Great app, thanks!");
        assert_eq!(new.name, None);
        assert_eq!(new.email.as_deref(), Some("ana@x.com"));
    }

    #[test]
    fn message_length_counts_trimmed_text() {
        assert!(validate_new(req(Some("problem"), Some("   short    "))).is_err());
        assert!(validate_new(req(Some("problem"), Some("exactly 10"))).is_ok());
        assert!(validate_new(req(Some("problem"), None)).is_err());
    }

    #[test]
    fn type_must_be_known() {
        let err = validate_new(req(Some("rant"), Some("long enough message"))).unwrap_err();
        assert_eq!(err.to_string(), "invalid feedback type");
        let err = validate_new(req(None, Some("long enough message"))).unwrap_err();
        assert_eq!(err.to_string(), "feedback_type is required");
    }

    #[test]
    fn type_alias_is_accepted() {
        let req: CreateFeedbackRequest =
            serde_json::from_str(r#"{"type":"other","message":"0123456789"}"#).unwrap();
        assert_eq!(validate_new(req).unwrap().feedback_type, "other");
    }

    #[test]
    fn filter_defaults() {
        let f = filter_from_query(&FeedbackQuery::default());
        assert_eq!(f.limit, DEFAULT_LIST_LIMIT);
        assert_eq!(f.offset, 0);
        assert!(f.search.is_none());

        let f = filter_from_query(&FeedbackQuery {
            search: Some("dor".into()),
            feedback_type: Some("problem".into()),
            limit: Some(5),
            offset: Some(-3),
        });
        assert_eq!(f.search.as_deref(), Some("%dor%"));
        assert_eq!(f.feedback_type.as_deref(), Some("problem"));
        assert_eq!(f.limit, 5);
        assert_eq!(f.offset, 0);
    }

    #[test]
    fn created_response_is_a_confirmation() {
        let body = serde_json::to_value(crate::feedback::dto::FeedbackCreated::new(9)).unwrap();
        assert_eq!(body, serde_json::json!({ "id": 9, "message": "feedback sent" }));
    }
}
