use regex::Regex;
use std::sync::LazyLock;

/// `D/M/YYYY` or `D-M-YYYY` (2-4 digit year), optionally followed by
/// `H:MM` and a meridiem marker.
static DATE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}(\s+\d{1,2}:\d{2}(\s?(?i:AM|PM))?)?")
        .expect("date/time pattern is valid")
});

/// Standalone `H:MM` with a mandatory meridiem marker.
static TIME_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}\s?(?i:AM|PM)").expect("time pattern is valid"));

/// First date(+time) substring in the text, returned verbatim.
pub fn extract_date_time(text: &str) -> Option<&str> {
    DATE_TIME_RE.find(text).map(|m| m.as_str())
}

/// First standalone time substring (no date required), returned verbatim.
pub fn extract_time_only(text: &str) -> Option<&str> {
    TIME_ONLY_RE.find(text).map(|m| m.as_str())
}

/// Input with the first date(+time) match removed and whitespace trimmed.
pub fn remove_date_time(text: &str) -> String {
    remove_match(text, &DATE_TIME_RE)
}

/// Input with the first standalone time match removed and whitespace trimmed.
pub fn remove_time_only(text: &str) -> String {
    remove_match(text, &TIME_ONLY_RE)
}

fn remove_match(text: &str, re: &Regex) -> String {
    match re.find(text) {
        Some(m) => {
            let mut out = String::with_capacity(text.len() - m.len());
            out.push_str(&text[..m.start()]);
            out.push_str(&text[m.end()..]);
            out.trim().to_string()
        }
        None => text.trim().to_string(),
    }
}
