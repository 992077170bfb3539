use serde::Deserialize;

use ai_client::util::strip_code_fence;
use foredesk_common::{
    AdjustmentKind, AgentError, Interpretation, Metric, Modification, TimeWindow,
};

use crate::dates::parse_span_point;
use crate::prompt::PromptStyle;
use crate::scan::first_json_object;

/// The modification entry as the model emits it. The wire field is
/// `material`; some replies already use the canonical `metric` name, so both
/// are accepted here and mapped to the domain name in one place.
#[derive(Debug, Deserialize)]
struct RawModification {
    #[serde(alias = "metric")]
    material: String,
    #[serde(rename = "type")]
    kind: String,
    value: f64,
    start_date: String,
    end_date: String,
    #[serde(default)]
    time_range: Option<String>,
    reason: String,
}

#[derive(Debug, Deserialize)]
struct RawReply {
    response: String,
    #[serde(default)]
    modifications: Vec<RawModification>,
}

/// Turn the model's free-form reply into a domain `Interpretation`.
///
/// Any failure — no balanced JSON object, a parse error, an unknown metric or
/// kind, a bad date or time window — fails the whole reply. No partial result
/// is ever produced.
pub(crate) fn parse_reply(text: &str, style: PromptStyle) -> Result<Interpretation, AgentError> {
    let body = first_json_object(strip_code_fence(text)).ok_or(AgentError::NoJson)?;
    let raw: RawReply = serde_json::from_str(body)?;

    if raw.response.trim().is_empty() {
        return Err(AgentError::InvalidField("empty response field".into()));
    }

    let allow_datetime = style.allows_datetime();
    let mut modifications = Vec::with_capacity(raw.modifications.len());
    for entry in raw.modifications {
        modifications.push(Modification {
            metric: Metric::from_wire(&entry.material)?,
            kind: AdjustmentKind::from_wire(&entry.kind)?,
            value: entry.value,
            start: parse_span_point(&entry.start_date, allow_datetime)?,
            end: parse_span_point(&entry.end_date, allow_datetime)?,
            time_range: entry
                .time_range
                .as_deref()
                .map(TimeWindow::parse)
                .transpose()?,
            reason: entry.reason,
        });
    }

    Ok(Interpretation {
        response: raw.response,
        modifications,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use foredesk_common::SpanPoint;

    const GOOD_REPLY: &str = r#"Here is the plan you asked for:
{
    "response": "Expect a full house for the fight.",
    "modifications": [
        {
            "material": "rooms",
            "type": "set",
            "value": 95,
            "start_date": "2024-06-15",
            "end_date": "2024-06-16",
            "reason": "Fight weekend demand"
        },
        {
            "metric": "security",
            "type": "percentage",
            "value": 40,
            "start_date": "2024-06-15",
            "end_date": "2024-06-16",
            "time_range": "21:00-03:00",
            "reason": "Crowd control"
        }
    ]
}
Let me know if you need adjustments."#;

    #[test]
    fn parses_reply_with_surrounding_prose() {
        let result = parse_reply(GOOD_REPLY, PromptStyle::Detailed).unwrap();
        assert_eq!(result.response, "Expect a full house for the fight.");
        assert_eq!(result.modifications.len(), 2);

        let rooms = &result.modifications[0];
        assert_eq!(rooms.metric, Metric::Rooms);
        assert_eq!(rooms.kind, AdjustmentKind::Set);
        assert_eq!(rooms.value, 95.0);
        assert_eq!(
            rooms.start,
            SpanPoint::Day(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        );
        assert!(rooms.time_range.is_none());

        // Second entry used the canonical wire name already.
        let security = &result.modifications[1];
        assert_eq!(security.metric, Metric::Security);
        assert_eq!(security.time_range.as_ref().unwrap().as_str(), "21:00-03:00");
    }

    #[test]
    fn parses_fenced_reply() {
        let fenced = format!("```json\n{}\n```", r#"{"response": "ok", "modifications": []}"#);
        let result = parse_reply(&fenced, PromptStyle::Concise).unwrap();
        assert_eq!(result.response, "ok");
        assert!(result.modifications.is_empty());
    }

    #[test]
    fn parses_fenced_reply_with_surrounding_prose() {
        let reply = concat!(
            "Here is the plan:\n",
            "```json\n",
            r#"{"response": "ok", "modifications": []}"#,
            "\n```\n",
            "Let me know if that works."
        );
        let result = parse_reply(reply, PromptStyle::Detailed).unwrap();
        assert_eq!(result.response, "ok");
    }

    #[test]
    fn missing_modifications_array_means_empty() {
        let result = parse_reply(r#"{"response": "nothing to change"}"#, PromptStyle::Detailed)
            .unwrap();
        assert!(result.modifications.is_empty());
    }

    #[test]
    fn datetime_bounds_only_in_detailed_style() {
        let reply = r#"{
            "response": "evening push",
            "modifications": [{
                "material": "cleaning",
                "type": "percentage",
                "value": 25,
                "start_date": "2024-06-15 18:00",
                "end_date": "2024-06-15 23:00",
                "reason": "turnovers"
            }]
        }"#;

        let detailed = parse_reply(reply, PromptStyle::Detailed).unwrap();
        assert_eq!(
            detailed.modifications[0].start,
            SpanPoint::Moment(
                NaiveDate::from_ymd_opt(2024, 6, 15)
                    .unwrap()
                    .and_hms_opt(18, 0, 0)
                    .unwrap()
            )
        );

        assert!(matches!(
            parse_reply(reply, PromptStyle::Concise),
            Err(AgentError::InvalidField(_))
        ));
    }

    #[test]
    fn no_json_is_a_parse_failure() {
        assert!(matches!(
            parse_reply("I could not help with that.", PromptStyle::Detailed),
            Err(AgentError::NoJson)
        ));
    }

    #[test]
    fn missing_response_field_fails() {
        assert!(matches!(
            parse_reply(r#"{"modifications": []}"#, PromptStyle::Detailed),
            Err(AgentError::MalformedReply(_))
        ));
    }

    #[test]
    fn blank_response_field_fails() {
        assert!(matches!(
            parse_reply(r#"{"response": "   "}"#, PromptStyle::Detailed),
            Err(AgentError::InvalidField(_))
        ));
    }

    #[test]
    fn unknown_metric_fails_the_whole_reply() {
        let reply = r#"{
            "response": "ok",
            "modifications": [{
                "material": "valet",
                "type": "percentage",
                "value": 10,
                "start_date": "2024-06-15",
                "end_date": "2024-06-16",
                "reason": "r"
            }]
        }"#;
        assert!(matches!(
            parse_reply(reply, PromptStyle::Detailed),
            Err(AgentError::InvalidField(_))
        ));
    }

    #[test]
    fn bad_time_window_fails_the_whole_reply() {
        let reply = r#"{
            "response": "ok",
            "modifications": [{
                "material": "cleaning",
                "type": "percentage",
                "value": 50,
                "start_date": "2024-06-15",
                "end_date": "2024-06-16",
                "time_range": "afternoons",
                "reason": "pool season"
            }]
        }"#;
        assert!(matches!(
            parse_reply(reply, PromptStyle::Detailed),
            Err(AgentError::InvalidField(_))
        ));
    }
}
