use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

use foredesk_common::{AgentError, SpanPoint};

/// Resolve a natural-language date phrase to a calendar date.
///
/// Substring matching is case-insensitive and first-match-wins. Every branch
/// resolves strictly into the future relative to `base_date` (which defaults
/// to today); unrecognized phrases fall back to the next day.
pub fn resolve_date_phrase(phrase: &str, base_date: Option<NaiveDate>) -> NaiveDate {
    let base = base_date.unwrap_or_else(|| Local::now().date_naive());
    let phrase = phrase.to_lowercase();

    if phrase.contains("tomorrow") {
        base + Duration::days(1)
    } else if phrase.contains("next week") || phrase.contains("next monday") {
        next_monday(base)
    } else if phrase.contains("this weekend") {
        next_saturday(base)
    } else if phrase.contains("fight night") || phrase.contains("fight weekend") {
        // Fight cards land on Saturdays
        next_saturday(base)
    } else {
        base + Duration::days(1)
    }
}

/// The next Monday strictly after `base`. A Monday base advances a full week.
fn next_monday(base: NaiveDate) -> NaiveDate {
    let weekday = base.weekday().num_days_from_monday() as i64;
    base + Duration::days(7 - weekday)
}

/// The next Saturday strictly after `base`. A Saturday base advances a full week.
fn next_saturday(base: NaiveDate) -> NaiveDate {
    let weekday = base.weekday().num_days_from_monday() as i64;
    let mut offset = (5 - weekday).rem_euclid(7);
    if offset == 0 {
        offset = 7;
    }
    base + Duration::days(offset)
}

/// Parse a modification boundary from its wire form.
///
/// `YYYY-MM-DD` always parses to a calendar day. When `allow_datetime` is set
/// (detailed prompt style) a value with a time component parses as
/// `YYYY-MM-DD HH:MM`.
pub fn parse_span_point(s: &str, allow_datetime: bool) -> Result<SpanPoint, AgentError> {
    if allow_datetime && s.contains(' ') {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
            .map(SpanPoint::Moment)
            .map_err(|e| AgentError::InvalidField(format!("bad datetime {s:?}: {e}")))
    } else {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(SpanPoint::Day)
            .map_err(|e| AgentError::InvalidField(format!("bad date {s:?}: {e}")))
    }
}
