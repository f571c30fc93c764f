use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse the timestamp shapes the API produces. Anything else is `None`.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render how long ago `ts` was relative to `now`.
///
/// Uses the coarsest unit that fits: minutes below an hour, hours below a
/// day, days otherwise. Timestamps in the future read as `0m ago`.
pub fn time_ago_at(ts: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(then) = ts.and_then(parse_timestamp) else {
        return String::new();
    };

    let mins = (now - then).num_minutes().max(0);
    if mins < 60 {
        return format!("{}m ago", mins);
    }
    let hrs = mins / 60;
    if hrs < 24 {
        return format!("{}h ago", hrs);
    }
    format!("{}d ago", hrs / 24)
}

/// [`time_ago_at`] against the current wall clock.
///
/// The result depends on when it is called, not just on `ts`.
pub fn time_ago(ts: Option<&str>) -> String {
    time_ago_at(ts, Utc::now())
}

/// The `YYYY-MM-DD` prefix of a timestamp string.
pub fn date_prefix(ts: &str) -> String {
    ts.chars().take(10).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn ago(d: Duration) -> String {
        (now() - d).to_rfc3339()
    }

    #[test]
    fn picks_coarsest_unit() {
        assert_eq!(time_ago_at(Some(&ago(Duration::minutes(5))), now()), "5m ago");
        assert_eq!(time_ago_at(Some(&ago(Duration::minutes(90))), now()), "1h ago");
        assert_eq!(time_ago_at(Some(&ago(Duration::hours(23))), now()), "23h ago");
        assert_eq!(time_ago_at(Some(&ago(Duration::hours(49))), now()), "2d ago");
    }

    #[test]
    fn seconds_floor_to_zero_minutes() {
        assert_eq!(time_ago_at(Some(&ago(Duration::seconds(59))), now()), "0m ago");
    }

    #[test]
    fn missing_or_invalid_is_empty() {
        assert_eq!(time_ago_at(None, now()), "");
        assert_eq!(time_ago_at(Some(""), now()), "");
        assert_eq!(time_ago_at(Some("yesterday"), now()), "");
        assert_eq!(time_ago(None), "");
    }

    #[test]
    fn future_clamps_to_zero() {
        let later = (now() + Duration::hours(3)).to_rfc3339();
        assert_eq!(time_ago_at(Some(&later), now()), "0m ago");
    }

    #[test]
    fn accepts_naive_and_date_only() {
        assert_eq!(time_ago_at(Some("2025-03-10T10:30:00"), now()), "1h ago");
        assert_eq!(time_ago_at(Some("2025-03-07"), now()), "3d ago");
        assert_eq!(time_ago_at(Some("2025-03-10T10:59:59.250Z"), now()), "1h ago");
    }

    #[test]
    fn date_prefix_truncates() {
        assert_eq!(date_prefix("2025-03-10T11:00:00Z"), "2025-03-10");
        assert_eq!(date_prefix("2025"), "2025");
        assert_eq!(date_prefix(""), "");
    }
}
