//! Backend-neutral column values
//!
//! Records expose their stored columns as [`FieldValue`]s so the same
//! predicate can be bound into SQL or evaluated against a record in memory.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, TimeZone, Timelike, Utc};

/// A single stored column value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
    /// Microseconds since the Unix epoch (UTC)
    Timestamp(i64),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn timestamp<Tz: TimeZone>(value: &DateTime<Tz>) -> Self {
        Self::Timestamp(value.timestamp_micros())
    }

    /// Compare two non-null values of the same kind.
    ///
    /// Returns `None` when either side is null or the kinds differ, which
    /// makes every ordered comparison against a null column false.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Ordering used for sorting, with null sorting lowest
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            _ => self.compare(other).unwrap_or(Ordering::Equal),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::timestamp(&v)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::timestamp(&v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Drop sub-microsecond precision so values survive a storage round trip
pub fn truncate_micros<Tz: TimeZone>(value: DateTime<Tz>) -> DateTime<Tz> {
    let nanos = value.nanosecond();
    let excess = nanos % 1_000;
    value.clone().with_nanosecond(nanos - excess).unwrap_or(value)
}

/// Rebuild a UTC timestamp from stored microseconds
pub fn utc_from_micros(micros: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
}

/// Rebuild an offset timestamp from stored microseconds and offset seconds
pub fn zoned_from_micros(micros: i64, offset_secs: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset_secs)?;
    Some(DateTime::from_timestamp_micros(micros)?.with_timezone(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_same_kind() {
        assert_eq!(
            FieldValue::Integer(1).compare(&FieldValue::Integer(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            FieldValue::from("b").compare(&FieldValue::from("a")),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_compare_null_is_unordered() {
        assert_eq!(FieldValue::Null.compare(&FieldValue::Integer(1)), None);
        assert_eq!(FieldValue::Integer(1).compare(&FieldValue::Null), None);
    }

    #[test]
    fn test_sort_cmp_null_lowest() {
        assert_eq!(
            FieldValue::Null.sort_cmp(&FieldValue::Integer(i64::MIN)),
            Ordering::Less
        );
        assert_eq!(FieldValue::Null.sort_cmp(&FieldValue::Null), Ordering::Equal);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(7_i32)), FieldValue::Integer(7));
    }

    #[test]
    fn test_zoned_instants_compare_equal() {
        let utc = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z").unwrap();
        let plus_two = DateTime::parse_from_rfc3339("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(FieldValue::from(utc), FieldValue::from(plus_two));
    }

    #[test]
    fn test_truncate_micros() {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T10:00:00.123456789Z").unwrap();
        assert_eq!(truncate_micros(ts).nanosecond(), 123_456_000);
    }

    #[test]
    fn test_zoned_from_micros_keeps_offset() {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T12:00:00+02:00").unwrap();
        let restored = zoned_from_micros(ts.timestamp_micros(), 7200).unwrap();
        assert_eq!(restored, ts);
        assert_eq!(restored.offset().local_minus_utc(), 7200);
    }
}
