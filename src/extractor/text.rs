use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static LINK_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-(\d{4})(?:/|$)").unwrap());

/// Collapse every whitespace run to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").into_owned()
}

/// Release year encoded in a title slug such as `/title/dune-2021/`.
pub fn year_from_link(href: &str) -> Option<&str> {
    LINK_YEAR
        .captures(href)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// `"Title (2021)"` when a year is known, the bare title otherwise.
pub fn with_year(title: &str, year: Option<&str>) -> String {
    match year {
        Some(year) if !year.is_empty() => format!("{} ({})", title, year),
        _ => title.to_string(),
    }
}

/// Leading base-10 integer of `s`, ignoring leading whitespace.
///
/// Stops at the first non-digit, so `"1,234"` yields 1. Returns `None` when
/// no digit follows the optional sign.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// First number in `s`, with `,` and `.` thousands separators dropped.
pub fn parse_count(s: &str) -> Option<u64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}
