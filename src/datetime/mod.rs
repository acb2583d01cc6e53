pub mod extract;
pub mod parse;

pub use extract::{extract_date_time, extract_time_only, remove_date_time, remove_time_only};
pub use parse::parse_user_date;

use chrono::NaiveDate;

/// Stored date format for dates the app stamps itself (time-only input).
pub const USER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Split free-text input into a clean description and an optional stored
/// due-date string.
///
/// A full date (with or without time) is stored verbatim. A standalone
/// time gets stamped with the given calendar day and keeps its time part,
/// so a same-day reminder can still fire. No match means no due date.
pub fn split_date_time(text: &str, today: NaiveDate) -> (String, Option<String>) {
    if let Some(date) = extract_date_time(text) {
        let clean = remove_date_time(text);
        return (clean, Some(date.to_string()));
    }

    if let Some(time) = extract_time_only(text) {
        let clean = remove_time_only(text);
        let stamped = format!("{} {}", today.format(USER_DATE_FORMAT), time);
        return (clean, Some(stamped));
    }

    (text.trim().to_string(), None)
}
