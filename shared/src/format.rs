use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Group digits in threes with commas (e.g. 1234567 -> "1,234,567").
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a roster join date as `M/D/YYYY`, or `N/A` when absent or unreadable.
pub fn format_join_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Accepts RFC 3339, PostgreSQL text timestamps (`2024-01-02 03:04:05+00`),
/// naive ISO date-times (assumed UTC), bare dates and RFC 2822.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let mut normalized = raw.replacen(' ', "T", 1);
    if let Some(tail) = normalized.get(normalized.len().saturating_sub(3)..) {
        let tail = tail.as_bytes();
        if tail.len() == 3
            && (tail[0] == b'+' || tail[0] == b'-')
            && tail[1].is_ascii_digit()
            && tail[2].is_ascii_digit()
        {
            normalized.push_str(":00");
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(15_300), "15,300");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn join_date_from_rfc3339() {
        assert_eq!(format_join_date(Some("2024-01-02T03:04:05Z")), "1/2/2024");
    }

    #[test]
    fn join_date_from_postgres_text() {
        assert_eq!(format_join_date(Some("2023-11-30 22:15:00+00")), "11/30/2023");
    }

    #[test]
    fn join_date_from_naive_iso() {
        assert_eq!(format_join_date(Some("2024-07-04T12:00:00.123456")), "7/4/2024");
        assert_eq!(format_join_date(Some("2024-07-04")), "7/4/2024");
    }

    #[test]
    fn join_date_from_rfc2822() {
        assert_eq!(
            format_join_date(Some("Tue, 02 Jan 2024 03:04:05 GMT")),
            "1/2/2024"
        );
    }

    #[test]
    fn join_date_missing_or_garbage() {
        assert_eq!(format_join_date(None), "N/A");
        assert_eq!(format_join_date(Some("")), "N/A");
        assert_eq!(format_join_date(Some("last tuesday")), "N/A");
    }
}
