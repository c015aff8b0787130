use sqlx::migrate::Migrator;

/// Versioned schema history under `./migrations`. sqlx records applied
/// versions in `_sqlx_migrations` and runs each file once, in order.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 500;

pub fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_LIST_LIMIT)
}

/// Builds an `ILIKE` substring pattern with `%`, `_` and `\` escaped.
pub fn like_pattern(search: &str) -> String {
    let mut out = String::with_capacity(search.len() + 2);
    out.push('%');
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

/// Non-blank search term, trimmed.
pub fn search_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(like_pattern)
}

pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<sqlx::Error>(),
            Some(sqlx::Error::Database(db)) if db.is_unique_violation()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None, DEFAULT_LIST_LIMIT), 50);
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIST_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-5), 10), 1);
        assert_eq!(clamp_limit(Some(10_000), 10), MAX_LIST_LIMIT);
        assert_eq!(clamp_limit(Some(7), 10), 7);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ana"), "%ana%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(search_term(None), None);
        assert_eq!(search_term(Some("   ")), None);
        assert_eq!(search_term(Some(" maria ")), Some("%maria%".into()));
    }

    #[test]
    fn plain_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&anyhow::anyhow!("boom")));
        let wrapped = anyhow::Error::from(sqlx::Error::RowNotFound).context("insert user");
        assert!(!is_unique_violation(&wrapped));
    }
}
