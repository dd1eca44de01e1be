use alloc::format;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

use super::FieldType;
use crate::error::{Error, Result};
use crate::hydrate::Resolved;
use crate::info::TypeTag;
use crate::record::value_kind;
use crate::ser::{FieldValue, SerializeOptions};
use crate::{Value, config};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a raw value into a date-time in the timezone `tz`.
///
/// Strings are read as RFC 3339, `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS` (optionally with fractional seconds) or
/// `YYYY-MM-DD`; strings without offset are taken to be in `tz`.
/// Numbers are unix timestamps in seconds. The result is converted to `tz`.
///
/// # Examples
///
/// ```
/// use chrono::FixedOffset;
/// use dobj_mapper::resolve::parse_temporal;
/// use serde_json::json;
///
/// let tz = FixedOffset::east_opt(5 * 3600).unwrap();
///
/// let dt = parse_temporal(&json!("2024-01-31T09:51:00Z"), tz).unwrap();
/// assert_eq!(dt.to_rfc3339(), "2024-01-31T14:51:00+05:00");
///
/// let dt = parse_temporal(&json!("2024-01-31 14:51:00"), tz).unwrap();
/// assert_eq!(dt.to_rfc3339(), "2024-01-31T14:51:00+05:00");
///
/// assert!(parse_temporal(&json!("yesterday"), tz).is_err());
/// ```
pub fn parse_temporal(value: &Value, tz: FixedOffset) -> Result<DateTime<FixedOffset>> {
    match value {
        Value::String(s) => parse_str(s.trim(), tz),
        Value::Number(n) => {
            let dt = if let Some(secs) = n.as_i64() {
                DateTime::from_timestamp(secs, 0)
            } else {
                n.as_f64().and_then(|f| {
                    let secs = f.floor();
                    let nanos = ((f - secs) * 1e9) as u32;
                    DateTime::from_timestamp(secs as i64, nanos)
                })
            };
            dt.map(|dt| dt.with_timezone(&tz))
                .ok_or_else(|| Error::mismatch(format!("timestamp {n} is out of range")))
        }
        other => Err(Error::mismatch(format!(
            "expected a date-time string or timestamp, found {}",
            value_kind(other)
        ))),
    }
}

fn parse_str(s: &str, tz: FixedOffset) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&tz));
    }

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });

    naive
        .and_then(|naive| tz.from_local_datetime(&naive).single())
        .ok_or_else(|| Error::mismatch(format!("cannot parse `{s}` as a date-time")))
}

// -----------------------------------------------------------------------------
// DateTime<FixedOffset>

impl FieldType for DateTime<FixedOffset> {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::Temporal
    }

    fn from_resolved(resolved: Resolved) -> Result<Self> {
        match resolved {
            Resolved::Temporal(dt) => Ok(dt),
            Resolved::Value(raw) if !raw.is_null() => parse_temporal(&raw, config::timezone()),
            other => Err(Error::mismatch(format!(
                "expected a date-time, found {}",
                other.kind()
            ))),
        }
    }
}

impl FieldValue for DateTime<FixedOffset> {
    #[inline]
    fn to_value(&self, _options: SerializeOptions) -> Value {
        Value::String(self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, Timelike};
    use serde_json::json;

    use super::parse_temporal;
    use crate::hydrate::Resolved;
    use crate::resolve::FieldType;

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600).unwrap()
    }

    #[test]
    fn accepted_forms() {
        let cases = [
            (json!("2024-01-31T14:51:00+05:00"), "2024-01-31T14:51:00+05:00"),
            (json!("2024-01-31T14:51:00.250"), "2024-01-31T14:51:00.250+05:00"),
            (json!("2024-01-31 14:51:00"), "2024-01-31T14:51:00+05:00"),
            (json!("2024-01-31"), "2024-01-31T00:00:00+05:00"),
            (json!(0), "1970-01-01T05:00:00+05:00"),
            (json!(1.5), "1970-01-01T05:00:01.500+05:00"),
        ];
        for (raw, expected) in cases {
            assert_eq!(parse_temporal(&raw, tz()).unwrap().to_rfc3339(), expected, "{raw}");
        }
    }

    #[test]
    fn rejected_forms() {
        for raw in [json!("31/01/2024"), json!(true), json!([]), json!(null)] {
            assert!(parse_temporal(&raw, tz()).is_err(), "{raw}");
        }
    }

    #[test]
    fn null_is_not_a_date() {
        assert!(<DateTime<FixedOffset>>::from_resolved(Resolved::Null).is_err());

        let dt = parse_temporal(&json!("2024-01-31T09:51:00Z"), tz()).unwrap();
        let same = <DateTime<FixedOffset>>::from_resolved(Resolved::Temporal(dt)).unwrap();
        assert_eq!(same.hour(), 14);
    }
}
