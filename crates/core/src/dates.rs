//! Age computation and display-date formatting.
//!
//! Both operations are date-only: timestamps are truncated to their calendar
//! date and no timezone normalisation is applied beyond that.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

/// Placeholder shown when a date cannot be parsed.
pub const DATE_PLACEHOLDER: &str = "—";

/// Spanish month names, indexed by `month0`.
const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Parse an ISO date or timestamp down to its calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (with offset), and naive
/// `YYYY-MM-DDTHH:MM:SS[.frac]` timestamps.
fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    None
}

/// Whole years lived at `reference`, or `None` when the birth date does not
/// parse.
///
/// Year difference, minus one when the reference (month, day) still precedes
/// the birth (month, day); the birthday itself counts as already turned.
pub fn age_in_years(birth_date: &str, reference: NaiveDate) -> Option<u32> {
    let birth = parse_iso_date(birth_date)?;
    let mut age = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Age at today's local date.
pub fn age_in_years_today(birth_date: &str) -> Option<u32> {
    age_in_years(birth_date, Local::now().date_naive())
}

/// Format an ISO date or timestamp as `"{day} de {month} de {year}"`.
///
/// Never panics: unparseable input yields [`DATE_PLACEHOLDER`].
pub fn format_display_date(input: &str) -> String {
    match parse_iso_date(input) {
        Some(date) => format!(
            "{} de {} de {}",
            date.day(),
            MONTHS_ES[date.month0() as usize],
            date.year()
        ),
        None => {
            if !input.trim().is_empty() {
                tracing::debug!(input, "unparseable display date");
            }
            DATE_PLACEHOLDER.to_string()
        }
    }
}
