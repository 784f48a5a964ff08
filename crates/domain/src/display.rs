//! Derived display logic
//!
//! Pure functions turning record values into what a page shows: days until
//! a due date, urgency colouring, money and percentage formatting.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use complyform_core::Tone;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Fewer days than this is urgent
pub const URGENT_DAYS: i64 = 7;

/// Fewer days than this (and not urgent) is a warning
pub const WARNING_DAYS: i64 = 14;

/// Whole days until a due date, rounded up
///
/// The due date is taken at UTC midnight; a due date later today but already
/// past midnight yields `0`.
pub fn days_until_due(due: Option<NaiveDate>, now: DateTime<Utc>) -> Option<i64> {
    let due = due?.and_time(NaiveTime::MIN).and_utc();
    let millis = (due - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    Some(if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    })
}

/// How pressing a due date is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueUrgency {
    Urgent,
    Warning,
    Neutral,
}

impl DueUrgency {
    /// Classify a day count; no due date is neutral
    pub fn from_days(days: Option<i64>) -> Self {
        match days {
            Some(d) if d < URGENT_DAYS => DueUrgency::Urgent,
            Some(d) if d < WARNING_DAYS => DueUrgency::Warning,
            _ => DueUrgency::Neutral,
        }
    }

    /// Colour for the urgency
    pub fn tone(&self) -> Tone {
        match self {
            DueUrgency::Urgent => Tone::Red,
            DueUrgency::Warning => Tone::Yellow,
            DueUrgency::Neutral => Tone::Neutral,
        }
    }
}

/// Label like `5 days left`, `Due today` or `3 days overdue`
pub fn due_label(days: Option<i64>) -> String {
    match days {
        None => "No due date".to_string(),
        Some(0) => "Due today".to_string(),
        Some(1) => "1 day left".to_string(),
        Some(-1) => "1 day overdue".to_string(),
        Some(d) if d < 0 => format!("{} days overdue", -d),
        Some(d) => format!("{d} days left"),
    }
}

/// Format a dollar amount with thousands separators (`$1,250,000`)
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let rem = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if rem == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{rem:02}")
    }
}

/// Format an optional amount, `-` when absent
pub fn format_optional_currency(value: Option<f64>) -> String {
    value.map(format_currency).unwrap_or_else(|| "-".to_string())
}

/// Format a percentage with at most one decimal (`15%`, `12.5%`)
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}%", rounded as i64)
    } else {
        format!("{rounded:.1}%")
    }
}

/// Format an optional percentage, `-` when absent
pub fn format_optional_percent(value: Option<f64>) -> String {
    value.map(format_percent).unwrap_or_else(|| "-".to_string())
}
