use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::{Number, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses a decimal literal into a JSON number; integers stay integers.
pub fn parse_number(raw: &str) -> Option<Value> {
    let raw = raw.trim();
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Value::from(int));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `2024-03-01` or any RFC 3339 / local datetime -> `2024-03-01T00:00:00.000Z`.
pub fn to_iso_instant(raw: &str) -> Option<String> {
    parse_instant(raw).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Full instant -> `YYYY-MM-DD`; time of day is dropped.
pub fn to_calendar_date(raw: &str) -> Option<String> {
    parse_instant(raw).map(|dt| dt.date_naive().format(DATE_FORMAT).to_string())
}

/// Comparison operand as shown to the user: `YYYY-MM-DD` at midnight UTC,
/// the full instant otherwise, so recompiling yields the same instant.
pub fn to_date_operand(raw: &str) -> Option<String> {
    parse_instant(raw).map(|dt| {
        if dt.time() == NaiveTime::MIN {
            dt.date_naive().format(DATE_FORMAT).to_string()
        } else {
            dt.to_rfc3339_opts(SecondsFormat::Millis, true)
        }
    })
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("18"), Some(json!(18)));
        assert_eq!(parse_number(" 2.5 "), Some(json!(2.5)));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn test_to_iso_instant() {
        assert_eq!(
            to_iso_instant("2024-03-01").as_deref(),
            Some("2024-03-01T00:00:00.000Z")
        );
        assert_eq!(
            to_iso_instant("2024-03-01T10:30").as_deref(),
            Some("2024-03-01T10:30:00.000Z")
        );
        assert_eq!(
            to_iso_instant("2024-03-01T10:30:00-03:00").as_deref(),
            Some("2024-03-01T13:30:00.000Z")
        );
        assert_eq!(to_iso_instant("yesterday"), None);
    }

    #[test]
    fn test_to_calendar_date_drops_time() {
        assert_eq!(
            to_calendar_date("2024-03-01T23:10:00.000Z").as_deref(),
            Some("2024-03-01")
        );
        assert_eq!(to_calendar_date("2024-03-01").as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_to_date_operand_keeps_time_of_day() {
        assert_eq!(
            to_date_operand("2024-03-01T00:00:00.000Z").as_deref(),
            Some("2024-03-01")
        );
        assert_eq!(
            to_date_operand("2024-03-01T10:30:00.000Z").as_deref(),
            Some("2024-03-01T10:30:00.000Z")
        );
        assert_eq!(
            to_iso_instant(&to_date_operand("2024-03-01T10:30:00.000Z").unwrap_or_default()),
            to_iso_instant("2024-03-01T10:30")
        );
        assert_eq!(to_date_operand("soon"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }
}
