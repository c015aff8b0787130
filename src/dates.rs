//! Date helpers shared by the DTOs.
//!
//! Calendar dates travel as `YYYY-MM-DD`, timestamps as RFC 3339. Legacy
//! clients send empty strings or MySQL-style `0000-00-00` sentinels for
//! "no date"; those are read as `None`.

use time::{
    format_description::well_known::{Iso8601, Rfc3339},
    Date, OffsetDateTime, PrimitiveDateTime, Time,
};

pub fn is_zero_date(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.starts_with("0000-00-00")
}

/// Parses a calendar date, accepting a full timestamp and keeping its date part.
pub fn parse_date(raw: &str) -> Result<Option<Date>, String> {
    if is_zero_date(raw) {
        return Ok(None);
    }
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    Date::parse(head, &Iso8601::DATE)
        .map(Some)
        .map_err(|_| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}

pub fn format_date(date: Date) -> String {
    date.format(&Iso8601::DATE)
        .unwrap_or_else(|_| date.to_string())
}

/// Which end of an inclusive range a date-only value stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEdge {
    Start,
    End,
}

/// Parses an RFC 3339 timestamp or a bare date. A bare date is widened to the
/// first (`Start`) or last (`End`) instant of that UTC day.
pub fn parse_timestamp(raw: &str, edge: RangeEdge) -> Result<OffsetDateTime, String> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(ts);
    }
    if raw.len() == 10 {
        if let Ok(date) = Date::parse(raw, &Iso8601::DATE) {
            let time = match edge {
                RangeEdge::Start => Time::MIDNIGHT,
                RangeEdge::End => {
                    Time::from_hms_nano(23, 59, 59, 999_999_999).unwrap_or(Time::MIDNIGHT)
                }
            };
            return Ok(PrimitiveDateTime::new(date, time).assume_utc());
        }
    }
    Err(format!(
        "invalid timestamp '{raw}', expected RFC 3339 or YYYY-MM-DD"
    ))
}

/// `#[serde(with = "crate::dates::optional_date")]`
pub mod optional_date {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(value: &Option<Date>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => s.serialize_some(&super::format_date(*date)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw {
            Some(raw) => super::parse_date(&raw).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn zero_dates_become_none() {
        assert_eq!(parse_date("").unwrap(), None);
        assert_eq!(parse_date("0000-00-00").unwrap(), None);
        assert_eq!(parse_date("0000-00-00 00:00:00").unwrap(), None);
    }

    #[test]
    fn parses_plain_and_timestamp_dates() {
        assert_eq!(parse_date("1990-04-12").unwrap(), Some(date!(1990 - 04 - 12)));
        assert_eq!(
            parse_date("1990-04-12T10:00:00Z").unwrap(),
            Some(date!(1990 - 04 - 12))
        );
        assert!(parse_date("12/04/1990").is_err());
    }

    #[test]
    fn formats_iso_date() {
        assert_eq!(format_date(date!(2024 - 01 - 05)), "2024-01-05");
    }

    #[test]
    fn bare_dates_cover_whole_day() {
        let start = parse_timestamp("2024-03-01", RangeEdge::Start).unwrap();
        let end = parse_timestamp("2024-03-01", RangeEdge::End).unwrap();
        assert_eq!(start, datetime!(2024-03-01 00:00:00 UTC));
        assert!(end > datetime!(2024-03-01 23:59:59 UTC));
        assert!(end < datetime!(2024-03-02 00:00:00 UTC));
    }

    #[test]
    fn rfc3339_is_taken_verbatim() {
        let ts = parse_timestamp("2024-03-01T08:30:00-03:00", RangeEdge::End).unwrap();
        assert_eq!(ts, datetime!(2024-03-01 11:30:00 UTC));
        assert!(parse_timestamp("yesterday", RangeEdge::Start).is_err());
    }
}
