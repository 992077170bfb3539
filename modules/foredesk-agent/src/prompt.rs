use chrono::{NaiveDate, NaiveTime};

use ai_client::util::truncate_to_char_boundary;

/// Keep pathological inputs from blowing up the prompt.
const MAX_MESSAGE_BYTES: usize = 4_000;

/// Which prompt template the interpreter sends upstream.
///
/// `Detailed` embeds the current time, hourly operating patterns, and the
/// optional per-day time window, and allows date-time modification bounds.
/// `Concise` is the shorter template with date-only bounds and a tighter
/// output budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    Concise,
    #[default]
    Detailed,
}

impl PromptStyle {
    /// Output bound requested from the model.
    pub fn max_tokens(&self) -> u32 {
        match self {
            PromptStyle::Concise => 500,
            PromptStyle::Detailed => 1000,
        }
    }

    /// Whether `YYYY-MM-DD HH:MM` modification bounds are accepted.
    pub fn allows_datetime(&self) -> bool {
        matches!(self, PromptStyle::Detailed)
    }

    pub fn build(&self, message: &str, today: NaiveDate, now: NaiveTime) -> String {
        let message = truncate_to_char_boundary(message, MAX_MESSAGE_BYTES);
        match self {
            PromptStyle::Concise => concise_prompt(message, today),
            PromptStyle::Detailed => detailed_prompt(message, today, now),
        }
    }
}

fn concise_prompt(message: &str, today: NaiveDate) -> String {
    format!(
        r#"You are an AI assistant for Las Vegas resort operations forecasting.
Analyze the user's message about hotel operations and provide recommendations.

User message: "{message}"
Today's date: {today}
Forecast period: Next 168 hours (7 days)

Parse the user's intent for modifications to:
- rooms (occupancy percentage)
- cleaning (staff needed)
- security (staff needed)

Examples:
- "Big UFC fight this Saturday" → Increase rooms to 95%, security +40%, cleaning +25%
- "Convention Monday morning" → Cleaning +30% (10am-2pm), rooms 85%+
- "Pool party season starting" → Cleaning +50% afternoons, security +20%

Return ONLY valid JSON in this format:
{{
    "response": "Natural language explanation of the changes and reasoning",
    "modifications": [
        {{
            "material": "rooms|cleaning|security",
            "type": "percentage|absolute|set",
            "value": number,
            "start_date": "YYYY-MM-DD",
            "end_date": "YYYY-MM-DD",
            "reason": "brief operational reason"
        }}
    ]
}}

If no modifications needed, return empty modifications array."#,
        message = message,
        today = today.format("%Y-%m-%d"),
    )
}

fn detailed_prompt(message: &str, today: NaiveDate, now: NaiveTime) -> String {
    format!(
        r#"You are an AI assistant for Las Vegas resort operations forecasting.
Analyze the user's message about hotel operations and provide detailed recommendations for:
- rooms (occupancy percentage)
- cleaning (staff needed)
- security (staff needed)

User message: "{message}"
Today's date: {today}
Current time: {now}
Forecast period: Next 168 hours (7 days)

IMPORTANT: Always provide a detailed explanation of WHY you're making these changes, showing your understanding of Vegas resort operations.

Extract modifications and return JSON:
{{
    "response": "Detailed explanation of the operational impact and why these specific changes make sense",
    "modifications": [
        {{
            "material": "rooms|cleaning|security",
            "type": "percentage|absolute|set",
            "value": number,
            "start_date": "YYYY-MM-DD",
            "end_date": "YYYY-MM-DD",
            "time_range": "HH:MM-HH:MM",
            "reason": "specific operational reason"
        }}
    ]
}}

Vegas-specific considerations:
- UFC/Boxing events: Rooms 95-100%, security +40% (crowd control), cleaning +25% (quick turnovers)
- Conventions: Cleaning +30% mornings (10am-2pm for group checkouts), rooms 85%+
- Pool parties: Cleaning +50% afternoons, security +20% (alcohol-related incidents)
- Major shows: Security +15% evenings (9pm-1am), moderate room increase
- Construction/Strip closures: Rooms -10% (access issues)
- Holidays: Everything increases, especially security

Hourly patterns to consider:
- Check-in rush: 3-6 PM (cleaning preparing rooms)
- Check-out rush: 10 AM-12 PM (cleaning heavy load)
- Casino peaks: 10 PM-3 AM (security focus)
- Pool hours: 10 AM-6 PM (cleaning/security)

Be specific about time ranges and explain the business reasoning."#,
        message = message,
        today = today.format("%Y-%m-%d"),
        now = now.format("%H:%M"),
    )
}
