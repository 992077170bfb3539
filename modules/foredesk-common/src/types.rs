use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::AgentError;

// --- Enums ---

/// A forecast quantity the interpreter can adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Rooms,
    Cleaning,
    Security,
}

impl Metric {
    pub fn from_wire(s: &str) -> Result<Self, AgentError> {
        match s {
            "rooms" => Ok(Metric::Rooms),
            "cleaning" => Ok(Metric::Cleaning),
            "security" => Ok(Metric::Security),
            other => Err(AgentError::InvalidField(format!("unknown metric: {other}"))),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Rooms => write!(f, "rooms"),
            Metric::Cleaning => write!(f, "cleaning"),
            Metric::Security => write!(f, "security"),
        }
    }
}

/// How a modification's value is applied to the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Percentage,
    Absolute,
    Set,
}

impl AdjustmentKind {
    pub fn from_wire(s: &str) -> Result<Self, AgentError> {
        match s {
            "percentage" => Ok(AdjustmentKind::Percentage),
            "absolute" => Ok(AdjustmentKind::Absolute),
            "set" => Ok(AdjustmentKind::Set),
            other => Err(AgentError::InvalidField(format!(
                "unknown adjustment kind: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentKind::Percentage => write!(f, "percentage"),
            AdjustmentKind::Absolute => write!(f, "absolute"),
            AdjustmentKind::Set => write!(f, "set"),
        }
    }
}

// --- Time types ---

/// A modification boundary: a calendar day, or a timestamped moment when the
/// model supplied an hour component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpanPoint {
    Day(NaiveDate),
    Moment(NaiveDateTime),
}

impl SpanPoint {
    pub fn date(&self) -> NaiveDate {
        match self {
            SpanPoint::Day(d) => *d,
            SpanPoint::Moment(dt) => dt.date(),
        }
    }
}

impl std::fmt::Display for SpanPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpanPoint::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            SpanPoint::Moment(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
        }
    }
}

static TIME_WINDOW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):[0-5]\d-([01]\d|2[0-3]):[0-5]\d$").unwrap()
});

/// A validated `"HH:MM-HH:MM"` daily window narrowing a modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeWindow(String);

impl TimeWindow {
    pub fn parse(s: &str) -> Result<Self, AgentError> {
        if TIME_WINDOW_RE.is_match(s) {
            Ok(TimeWindow(s.to_string()))
        } else {
            Err(AgentError::InvalidField(format!(
                "invalid time range: {s}"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Core types ---

/// One proposed change to the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    pub metric: Metric,
    pub kind: AdjustmentKind,
    pub value: f64,
    pub start: SpanPoint,
    pub end: SpanPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeWindow>,
    pub reason: String,
}

/// The interpreter's answer to one user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub response: String,
    pub modifications: Vec<Modification>,
}

// --- Conversation history ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_wire_names() {
        assert_eq!(Metric::from_wire("rooms").unwrap(), Metric::Rooms);
        assert_eq!(Metric::from_wire("cleaning").unwrap(), Metric::Cleaning);
        assert_eq!(Metric::from_wire("security").unwrap(), Metric::Security);
        assert!(Metric::from_wire("staffing").is_err());
        assert!(Metric::from_wire("Rooms").is_err());
    }

    #[test]
    fn adjustment_kind_wire_names() {
        assert_eq!(
            AdjustmentKind::from_wire("percentage").unwrap(),
            AdjustmentKind::Percentage
        );
        assert_eq!(
            AdjustmentKind::from_wire("absolute").unwrap(),
            AdjustmentKind::Absolute
        );
        assert_eq!(AdjustmentKind::from_wire("set").unwrap(), AdjustmentKind::Set);
        assert!(AdjustmentKind::from_wire("relative").is_err());
    }

    #[test]
    fn time_window_accepts_valid_ranges() {
        assert!(TimeWindow::parse("10:00-14:00").is_ok());
        assert!(TimeWindow::parse("00:00-23:59").is_ok());
        assert_eq!(TimeWindow::parse("21:00-01:00").unwrap().as_str(), "21:00-01:00");
    }

    #[test]
    fn time_window_rejects_malformed_ranges() {
        assert!(TimeWindow::parse("9:00-17:00").is_err());
        assert!(TimeWindow::parse("25:00-26:00").is_err());
        assert!(TimeWindow::parse("10:00").is_err());
        assert!(TimeWindow::parse("afternoons").is_err());
        assert!(TimeWindow::parse("").is_err());
    }

    #[test]
    fn span_point_display_round_trips() {
        let day = SpanPoint::Day(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(day.to_string(), "2024-06-10");
        assert_eq!(day.date(), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());

        let moment = SpanPoint::Moment(
            NaiveDate::from_ymd_opt(2024, 6, 10)
                .unwrap()
                .and_hms_opt(15, 30, 0)
                .unwrap(),
        );
        assert_eq!(moment.to_string(), "2024-06-10 15:30");
    }
}
