use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use core::fmt::{Display, Formatter, Result as FmtResult};
use serde_json::Value;

/// Formats accepted for expiry values carrying a time of day, interpreted as UTC.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// Formats accepted for date-only expiry values, interpreted as UTC midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y", "%B %d %Y"];

/// The point in time after which an exception no longer suppresses its finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expiry {
    /// The exception holds up to and including this instant.
    At(DateTime<Utc>),

    /// The configured value could not be interpreted as a point in time.
    Invalid(String),
}

impl Expiry {
    /// Interpret the `expiry` field of an exception entry.
    ///
    /// Numbers are epoch milliseconds and strings are dates. Falsy values (`null`, `false`,
    /// `0`, `""`) mean the entry has no expiry and yield `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(Self::parse(text)),
            Value::Number(n) => match n.as_i64() {
                Some(0) => None,
                Some(millis) => Some(
                    Utc.timestamp_millis_opt(millis)
                        .single()
                        .map_or_else(|| Self::Invalid(n.to_string()), Self::At),
                ),
                None => Some(Self::Invalid(n.to_string())),
            },
            other => Some(Self::Invalid(other.to_string())),
        }
    }

    /// Parse a textual date or date-time.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::At(dt.with_timezone(&Utc));
        }

        for format in DATE_TIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Self::At(dt.and_utc());
            }
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Self::At(date.and_time(NaiveTime::MIN).and_utc());
            }
        }

        Self::Invalid(text.to_owned())
    }

    /// Whether the exception still holds at `now`.
    ///
    /// An expiry equal to `now` still holds. Invalid expiries never hold.
    #[must_use]
    pub fn holds_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::At(at) => *at >= now,
            Self::Invalid(_) => false,
        }
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::At(_))
    }
}

impl Display for Expiry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::At(at) if at.time() == NaiveTime::MIN => write!(f, "{}", at.format("%Y-%m-%d")),
            Self::At(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M:%S UTC")),
            Self::Invalid(raw) => write!(f, "{raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_falsy_values_mean_no_expiry() {
        assert_eq!(Expiry::from_value(&Value::Null), None);
        assert_eq!(Expiry::from_value(&json!(false)), None);
        assert_eq!(Expiry::from_value(&json!(0)), None);
        assert_eq!(Expiry::from_value(&json!("")), None);
    }

    #[test]
    fn test_number_is_epoch_millis() {
        let expiry = Expiry::from_value(&json!(1_609_459_200_000_i64)).unwrap();
        assert_eq!(expiry, Expiry::At(utc(2021, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_float_number_is_invalid() {
        let expiry = Expiry::from_value(&json!(1.5)).unwrap();
        assert!(!expiry.is_valid());
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(Expiry::parse("2021-01-31"), Expiry::At(utc(2021, 1, 31, 0, 0, 0)));
        assert_eq!(Expiry::parse("2021/01/31"), Expiry::At(utc(2021, 1, 31, 0, 0, 0)));
    }

    #[test]
    fn test_parse_long_form_dates() {
        assert_eq!(Expiry::parse("1 January 2021"), Expiry::At(utc(2021, 1, 1, 0, 0, 0)));
        assert_eq!(Expiry::parse("January 1, 2021"), Expiry::At(utc(2021, 1, 1, 0, 0, 0)));
        assert_eq!(Expiry::parse("March 15 2022"), Expiry::At(utc(2022, 3, 15, 0, 0, 0)));
    }

    #[test]
    fn test_parse_date_time() {
        assert_eq!(Expiry::parse("2021-01-31 10:30:00"), Expiry::At(utc(2021, 1, 31, 10, 30, 0)));
        assert_eq!(Expiry::parse("2021-01-31T10:30:00"), Expiry::At(utc(2021, 1, 31, 10, 30, 0)));
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        assert_eq!(Expiry::parse("2021-01-31T12:00:00+02:00"), Expiry::At(utc(2021, 1, 31, 10, 0, 0)));
    }

    #[test]
    fn test_parse_garbage_is_invalid() {
        assert_eq!(Expiry::parse("next tuesday"), Expiry::Invalid("next tuesday".to_owned()));
        assert_eq!(Expiry::parse("2021-13-45"), Expiry::Invalid("2021-13-45".to_owned()));
    }

    #[test]
    fn test_non_scalar_values_are_invalid() {
        assert!(!Expiry::from_value(&json!(["2021-01-01"])).unwrap().is_valid());
        assert!(!Expiry::from_value(&json!({"date": "2021-01-01"})).unwrap().is_valid());
        assert!(!Expiry::from_value(&json!(true)).unwrap().is_valid());
    }

    #[test]
    fn test_holds_at_boundaries() {
        let now = utc(2024, 6, 1, 12, 0, 0);

        assert!(Expiry::At(now).holds_at(now));
        assert!(Expiry::At(utc(2024, 6, 1, 12, 0, 1)).holds_at(now));
        assert!(!Expiry::At(utc(2024, 6, 1, 11, 59, 59)).holds_at(now));
        assert!(!Expiry::Invalid("soon".to_owned()).holds_at(now));
    }

    #[test]
    fn test_display() {
        assert_eq!(Expiry::parse("2021-01-31").to_string(), "2021-01-31");
        assert_eq!(Expiry::parse("2021-01-31 10:30:00").to_string(), "2021-01-31 10:30:00 UTC");
        assert_eq!(Expiry::parse("whenever").to_string(), "whenever");
    }
}
