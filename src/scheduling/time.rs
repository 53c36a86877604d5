//! Clock-time parsing and arithmetic
//!
//! All times are naive local `HH:MM` strings. The empty string is the
//! "unscheduled" value; it never represents midnight.

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Normalize a raw clock string to zero-padded 24-hour `HH:MM`.
///
/// Accepts `H:MM` or `HH:MM` with hour in `0..=23` and minute in `0..=59`.
/// Anything else (including 12-hour `AM`/`PM` input) yields `""`.
pub fn normalize(raw: &str) -> String {
    match parse_minutes(raw) {
        Some(total) => render(total),
        None => String::new(),
    }
}

/// Whether `raw` normalizes to a real clock time.
pub fn is_valid(raw: &str) -> bool {
    parse_minutes(raw).is_some()
}

/// Minutes since midnight for a clock string, if it is well formed.
pub fn parse_minutes(raw: &str) -> Option<i32> {
    let (hour, minute) = raw.trim().split_once(':')?;

    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().all(|b| b.is_ascii_digit()) || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour: i32 = hour.parse().ok()?;
    let minute: i32 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }

    Some(hour * 60 + minute)
}

/// Shift a clock time by `delta` minutes.
///
/// The result wraps within the same nominal day: `23:45 + 30` is `00:15`,
/// with no calendar rollover. Returns `None` when `raw` is not a valid time.
pub fn add_minutes(raw: &str, delta: i32) -> Option<String> {
    let total = parse_minutes(raw)?;
    Some(render((total + delta).rem_euclid(MINUTES_PER_DAY)))
}

fn render(total: i32) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_well_formed_times() {
        assert_eq!(normalize("09:30"), "09:30");
        assert_eq!(normalize("9:30"), "09:30");
        assert_eq!(normalize("0:00"), "00:00");
        assert_eq!(normalize("23:59"), "23:59");
    }

    #[test]
    fn rejects_malformed_times() {
        assert_eq!(normalize("9:5"), "");
        assert_eq!(normalize("25:00"), "");
        assert_eq!(normalize("12:60"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("9.30"), "");
        assert_eq!(normalize("9:30 PM"), "");
        assert_eq!(normalize("123:00"), "");
        assert_eq!(normalize("-1:00"), "");
        assert_eq!(normalize(":30"), "");
        assert_eq!(normalize("10:30:00"), "");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(normalize(" 7:05 "), "07:05");
    }

    #[test]
    fn adds_minutes_with_hour_carry() {
        assert_eq!(add_minutes("14:45", 30).as_deref(), Some("15:15"));
        assert_eq!(add_minutes("9:00", -180).as_deref(), Some("06:00"));
    }

    #[test]
    fn arithmetic_wraps_within_the_day() {
        assert_eq!(add_minutes("23:45", 30).as_deref(), Some("00:15"));
        assert_eq!(add_minutes("01:00", -180).as_deref(), Some("22:00"));
        assert_eq!(add_minutes("later", 30), None);
    }
}
