use sqlx::PgPool;
use tracing::info;

use super::{
    dto::{CreatePainRecordRequest, ListQuery, UpdatePainRecordRequest},
    repo,
    repo_types::{NewPainRecord, PainRecord, PainRecordChanges, RecordWindow},
};
use crate::{
    dates::{parse_timestamp, RangeEdge},
    db::{clamp_limit, DEFAULT_LIST_LIMIT},
    error::{ApiResult, AppError},
};

pub const MIN_INTENSITY: i64 = 0;
pub const MAX_INTENSITY: i64 = 10;

/// Accepts only JSON integers in `[0, 10]`.
pub fn parse_intensity(raw: &serde_json::Number) -> ApiResult<i32> {
    match raw.as_i64() {
        Some(v) if (MIN_INTENSITY..=MAX_INTENSITY).contains(&v) => Ok(v as i32),
        _ => Err(AppError::validation(
            "intensity must be an integer between 0 and 10",
        )),
    }
}

/// Trims tags, drops blanks and requires at least one remaining.
pub fn clean_body_parts(parts: Vec<String>) -> ApiResult<Vec<String>> {
    let cleaned: Vec<String> = parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if cleaned.is_empty() {
        return Err(AppError::validation(
            "body_parts is required and must be a non-empty list",
        ));
    }
    Ok(cleaned)
}

fn parse_record_time(raw: Option<&str>) -> ApiResult<Option<time::OffsetDateTime>> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_timestamp(s, RangeEdge::Start).map_err(AppError::Validation))
        .transpose()
}

pub fn window_from_query(q: &ListQuery) -> ApiResult<RecordWindow> {
    let parse = |raw: &Option<String>, edge: RangeEdge| {
        raw.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| parse_timestamp(s, edge).map_err(AppError::Validation))
            .transpose()
    };
    let window = RecordWindow {
        start: parse(&q.start_date, RangeEdge::Start)?,
        end: parse(&q.end_date, RangeEdge::End)?,
    };
    if let (Some(start), Some(end)) = (window.start, window.end) {
        if start > end {
            return Err(AppError::validation("start_date must not be after end_date"));
        }
    }
    Ok(window)
}

pub fn validate_new(req: CreatePainRecordRequest) -> ApiResult<NewPainRecord> {
    let body_parts = clean_body_parts(req.body_parts.unwrap_or_default())?;
    let intensity = req
        .intensity
        .as_ref()
        .ok_or_else(|| AppError::validation("intensity is required"))
        .and_then(parse_intensity)?;
    Ok(NewPainRecord {
        body_parts,
        intensity,
        description: req.description.map(|d| d.trim().to_string()),
        record_time: parse_record_time(req.record_time.as_deref())?,
    })
}

pub fn validate_changes(req: UpdatePainRecordRequest) -> ApiResult<PainRecordChanges> {
    Ok(PainRecordChanges {
        body_parts: req.body_parts.map(clean_body_parts).transpose()?,
        intensity: req.intensity.as_ref().map(parse_intensity).transpose()?,
        description: req.description.map(|d| d.trim().to_string()),
        record_time: parse_record_time(req.record_time.as_deref())?,
    })
}

pub async fn create(
    db: &PgPool,
    user_id: i64,
    req: CreatePainRecordRequest,
) -> ApiResult<PainRecord> {
    let new = validate_new(req)?;
    let record = repo::insert(db, user_id, &new).await?;
    info!(user_id, record_id = record.id, "pain record created");
    Ok(record)
}

pub async fn list(db: &PgPool, user_id: i64, q: &ListQuery) -> ApiResult<Vec<PainRecord>> {
    let window = window_from_query(q)?;
    let limit = clamp_limit(q.limit, DEFAULT_LIST_LIMIT);
    Ok(repo::list_by_user(db, user_id, window, limit).await?)
}

/// Missing and foreign records look the same to the caller.
pub async fn get(db: &PgPool, user_id: i64, id: i64) -> ApiResult<PainRecord> {
    repo::get_owned(db, user_id, id)
        .await?
        .ok_or_else(|| AppError::not_found("record not found"))
}

pub async fn update(
    db: &PgPool,
    user_id: i64,
    id: i64,
    req: UpdatePainRecordRequest,
) -> ApiResult<PainRecord> {
    let changes = validate_changes(req)?;
    let record = repo::update_owned(db, user_id, id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found("record not found"))?;
    info!(user_id, record_id = id, "pain record updated");
    Ok(record)
}

pub async fn delete(db: &PgPool, user_id: i64, id: i64) -> ApiResult<()> {
    if !repo::delete_owned(db, user_id, id).await? {
        return Err(AppError::not_found("record not found"));
    }
    info!(user_id, record_id = id, "pain record deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use time::macros::datetime;

    fn num(raw: &str) -> serde_json::Number {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn intensity_bounds_are_inclusive() {
        assert_eq!(parse_intensity(&num("0")).unwrap(), 0);
        assert_eq!(parse_intensity(&num("10")).unwrap(), 10);
        for bad in ["-1", "11", "5.5", "1e3"] {
            let err = parse_intensity(&num(bad)).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{bad}");
        }
    }

    #[test]
    fn body_parts_are_trimmed_and_required() {
        assert_eq!(
            clean_body_parts(vec![" head ".into(), "".into(), "neck".into()]).unwrap(),
            vec!["head".to_string(), "neck".to_string()]
        );
        assert!(clean_body_parts(vec![]).is_err());
        assert!(clean_body_parts(vec!["  ".into()]).is_err());
    }

    #[test]
    fn new_record_requires_intensity() {
        let req = CreatePainRecordRequest {
            body_parts: Some(vec!["head".into()]),
            intensity: None,
            description: None,
            record_time: None,
        };
        assert!(validate_new(req).is_err());
    }

    #[test]
    fn new_record_parses_record_time() {
        let req = CreatePainRecordRequest {
            body_parts: Some(vec!["knee".into()]),
            intensity: Some(num("3")),
            description: Some("  after walk ".into()),
            record_time: Some("2024-06-01T09:00:00Z".into()),
        };
        let new = validate_new(req).unwrap();
        assert_eq!(new.intensity, 3);
        assert_eq!(new.description.as_deref(), Some("after walk"));
        assert_eq!(new.record_time, Some(datetime!(2024-06-01 09:00:00 UTC)));
    }

    #[test]
    fn changes_validate_only_present_fields() {
        let changes = validate_changes(UpdatePainRecordRequest {
            intensity: Some(num("8")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes.intensity, Some(8));
        assert!(changes.body_parts.is_none());

        let bad = validate_changes(UpdatePainRecordRequest {
            intensity: Some(num("12")),
            ..Default::default()
        });
        assert!(bad.is_err());
    }

    #[test]
    fn window_is_inclusive_and_ordered() {
        let q = ListQuery {
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-31".into()),
            limit: None,
        };
        let w = window_from_query(&q).unwrap();
        assert_eq!(w.start, Some(datetime!(2024-01-01 00:00:00 UTC)));
        assert!(w.end.unwrap() > datetime!(2024-01-31 23:59:59 UTC));

        let reversed = ListQuery {
            start_date: Some("2024-02-01".into()),
            end_date: Some("2024-01-01".into()),
            limit: None,
        };
        assert!(window_from_query(&reversed).is_err());

        let garbage = ListQuery {
            start_date: Some("last week".into()),
            ..Default::default()
        };
        assert!(window_from_query(&garbage).is_err());
    }
}
