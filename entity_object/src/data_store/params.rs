//! Parameter typing for PostgreSQL
//!
//! sqlx sends every bound value with the type of the Rust value it came
//! from, and PostgreSQL rejects a statement whose parameter type does not
//! match the column it meets (`text = bigint` has no operator). Attribute
//! values are therefore converted to the kind of their target column before
//! binding.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;
use type_mapping::{FieldValue, ValueKind};
use uuid::Uuid;

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// A value typed for one PostgreSQL column
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PgParam {
    Bool(Option<bool>),
    SmallInt(Option<i16>),
    Integer(Option<i32>),
    BigInt(Option<i64>),
    Real(Option<f32>),
    Double(Option<f64>),
    Numeric(Option<Decimal>),
    Text(Option<String>),
    Uuid(Option<Uuid>),
    Timestamp(Option<DateTime<Utc>>),
    NaiveTimestamp(Option<NaiveDateTime>),
    Date(Option<NaiveDate>),
    Time(Option<NaiveTime>),
    Json(Option<serde_json::Value>),
    TextArray(Option<Vec<String>>),
    IntegerArray(Option<Vec<i32>>),
    BigIntArray(Option<Vec<i64>>),
}

impl PgParam {
    /// Convert `value` for a column of `kind`.
    ///
    /// Returns `None` when the value has no representation in that type,
    /// such as `"john@example.com"` for a `bigint` column. NULL is always
    /// representable and is typed after the column.
    pub(crate) fn coerce(value: &FieldValue, kind: ValueKind) -> Option<Self> {
        if value.is_null() {
            return Some(Self::null(kind));
        }

        let param = match kind {
            ValueKind::Bool => Self::Bool(Some(value.as_bool()?)),
            ValueKind::SmallInt => Self::SmallInt(Some(i16::try_from(integer(value)?).ok()?)),
            ValueKind::Integer => Self::Integer(Some(i32::try_from(integer(value)?).ok()?)),
            ValueKind::BigInt => Self::BigInt(Some(integer(value)?)),
            ValueKind::Real => Self::Real(Some(value.as_f64()? as f32)),
            ValueKind::Double => Self::Double(Some(value.as_f64()?)),
            ValueKind::Numeric => Self::Numeric(Some(decimal(value)?)),
            ValueKind::Text => Self::Text(Some(value.to_string())),
            ValueKind::Uuid => Self::Uuid(Some(uuid(value)?)),
            ValueKind::Timestamp => Self::Timestamp(Some(timestamp(value)?)),
            ValueKind::NaiveTimestamp => Self::NaiveTimestamp(Some(naive_timestamp(value)?)),
            ValueKind::Date => Self::Date(Some(date(value)?)),
            ValueKind::Time => Self::Time(Some(time(value)?)),
            ValueKind::Json => Self::Json(Some(value.to_json())),
            ValueKind::TextArray => Self::TextArray(Some(elements(value, |item| {
                Some(
                    item.as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string()),
                )
            })?)),
            ValueKind::IntegerArray => Self::IntegerArray(Some(elements(value, |item| {
                i32::try_from(item.as_i64()?).ok()
            })?)),
            ValueKind::BigIntArray => {
                Self::BigIntArray(Some(elements(value, serde_json::Value::as_i64)?))
            }
            ValueKind::Other => Self::natural(value),
        };
        Some(param)
    }

    /// Bind as the value's own type. Used when the target column is unknown.
    pub(crate) fn natural(value: &FieldValue) -> Self {
        match value {
            // Untyped NULL is sent as text, the same as an absent string
            FieldValue::Null => Self::Text(None),
            FieldValue::Bool(b) => Self::Bool(Some(*b)),
            FieldValue::Int(i) => Self::BigInt(Some(*i)),
            FieldValue::Float(f) => Self::Double(Some(*f)),
            FieldValue::Text(s) => Self::Text(Some(s.clone())),
            FieldValue::Uuid(u) => Self::Uuid(Some(*u)),
            FieldValue::Timestamp(ts) => Self::Timestamp(Some(*ts)),
            FieldValue::Json(v) => Self::Json(Some(v.clone())),
        }
    }

    fn null(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Bool => Self::Bool(None),
            ValueKind::SmallInt => Self::SmallInt(None),
            ValueKind::Integer => Self::Integer(None),
            ValueKind::BigInt => Self::BigInt(None),
            ValueKind::Real => Self::Real(None),
            ValueKind::Double => Self::Double(None),
            ValueKind::Numeric => Self::Numeric(None),
            ValueKind::Text | ValueKind::Other => Self::Text(None),
            ValueKind::Uuid => Self::Uuid(None),
            ValueKind::Timestamp => Self::Timestamp(None),
            ValueKind::NaiveTimestamp => Self::NaiveTimestamp(None),
            ValueKind::Date => Self::Date(None),
            ValueKind::Time => Self::Time(None),
            ValueKind::Json => Self::Json(None),
            ValueKind::TextArray => Self::TextArray(None),
            ValueKind::IntegerArray => Self::IntegerArray(None),
            ValueKind::BigIntArray => Self::BigIntArray(None),
        }
    }

    pub(crate) fn bind<'q>(
        self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            PgParam::Bool(v) => query.bind(v),
            PgParam::SmallInt(v) => query.bind(v),
            PgParam::Integer(v) => query.bind(v),
            PgParam::BigInt(v) => query.bind(v),
            PgParam::Real(v) => query.bind(v),
            PgParam::Double(v) => query.bind(v),
            PgParam::Numeric(v) => query.bind(v),
            PgParam::Text(v) => query.bind(v),
            PgParam::Uuid(v) => query.bind(v),
            PgParam::Timestamp(v) => query.bind(v),
            PgParam::NaiveTimestamp(v) => query.bind(v),
            PgParam::Date(v) => query.bind(v),
            PgParam::Time(v) => query.bind(v),
            PgParam::Json(v) => query.bind(v.map(sqlx::types::Json)),
            PgParam::TextArray(v) => query.bind(v),
            PgParam::IntegerArray(v) => query.bind(v),
            PgParam::BigIntArray(v) => query.bind(v),
        }
    }
}

/// Whole numbers only; `"2.5"` and `2.5` have no integer form
fn integer(value: &FieldValue) -> Option<i64> {
    match value {
        FieldValue::Int(i) => Some(*i),
        FieldValue::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
        FieldValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn decimal(value: &FieldValue) -> Option<Decimal> {
    match value {
        FieldValue::Int(i) => Some(Decimal::from(*i)),
        FieldValue::Float(f) => Decimal::try_from(*f).ok(),
        FieldValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn uuid(value: &FieldValue) -> Option<Uuid> {
    match value {
        FieldValue::Uuid(u) => Some(*u),
        FieldValue::Text(s) => Uuid::parse_str(s.trim()).ok(),
        _ => None,
    }
}

fn timestamp(value: &FieldValue) -> Option<DateTime<Utc>> {
    match value {
        FieldValue::Timestamp(ts) => Some(*ts),
        FieldValue::Text(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| parse_naive_timestamp(s).map(|naive| naive.and_utc())),
        _ => None,
    }
}

fn naive_timestamp(value: &FieldValue) -> Option<NaiveDateTime> {
    match value {
        FieldValue::Timestamp(ts) => Some(ts.naive_utc()),
        FieldValue::Text(s) => parse_naive_timestamp(s).or_else(|| {
            DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.naive_utc())
        }),
        _ => None,
    }
}

fn parse_naive_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
}

fn date(value: &FieldValue) -> Option<NaiveDate> {
    match value {
        FieldValue::Timestamp(ts) => Some(ts.date_naive()),
        FieldValue::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        _ => None,
    }
}

fn time(value: &FieldValue) -> Option<NaiveTime> {
    match value {
        FieldValue::Timestamp(ts) => Some(ts.time()),
        FieldValue::Text(s) => TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(s.trim(), format).ok()),
        _ => None,
    }
}

/// Array columns take a JSON array whose every element converts
fn elements<T>(
    value: &FieldValue,
    convert: impl Fn(&serde_json::Value) -> Option<T>,
) -> Option<Vec<T>> {
    match value {
        FieldValue::Json(serde_json::Value::Array(items)) => items.iter().map(convert).collect(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_text_meets_bigint_column() {
        assert_eq!(
            PgParam::coerce(&FieldValue::from("42"), ValueKind::BigInt),
            Some(PgParam::BigInt(Some(42)))
        );
        assert_eq!(
            PgParam::coerce(&FieldValue::from("john@example.com"), ValueKind::BigInt),
            None
        );
    }

    #[test]
    fn test_integer_meets_text_column() {
        assert_eq!(
            PgParam::coerce(&FieldValue::Int(42), ValueKind::Text),
            Some(PgParam::Text(Some("42".to_string())))
        );
    }

    #[test]
    fn test_narrow_integer_columns_check_range() {
        assert_eq!(
            PgParam::coerce(&FieldValue::from("5"), ValueKind::Integer),
            Some(PgParam::Integer(Some(5)))
        );
        assert_eq!(
            PgParam::coerce(&FieldValue::Int(70_000), ValueKind::SmallInt),
            None
        );
        assert_eq!(
            PgParam::coerce(&FieldValue::Float(2.5), ValueKind::Integer),
            None
        );
    }

    #[test]
    fn test_null_takes_the_column_type() {
        assert_eq!(
            PgParam::coerce(&FieldValue::Null, ValueKind::BigInt),
            Some(PgParam::BigInt(None))
        );
        assert_eq!(
            PgParam::coerce(&FieldValue::Null, ValueKind::Date),
            Some(PgParam::Date(None))
        );
        assert_eq!(PgParam::natural(&FieldValue::Null), PgParam::Text(None));
    }

    #[test]
    fn test_exact_numeric_and_calendar_text() {
        assert_eq!(
            PgParam::coerce(&FieldValue::from("19.99"), ValueKind::Numeric),
            Some(PgParam::Numeric(Some(Decimal::new(1999, 2))))
        );
        assert_eq!(
            PgParam::coerce(&FieldValue::from("2024-03-01"), ValueKind::Date),
            NaiveDate::from_ymd_opt(2024, 3, 1).map(|d| PgParam::Date(Some(d)))
        );
        assert_eq!(
            PgParam::coerce(&FieldValue::from("09:30"), ValueKind::Time),
            NaiveTime::from_hms_opt(9, 30, 0).map(|t| PgParam::Time(Some(t)))
        );
        assert_eq!(
            PgParam::coerce(&FieldValue::from("yesterday"), ValueKind::Date),
            None
        );
    }

    #[test]
    fn test_timestamps_from_text() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .map(|naive| naive.and_utc());

        assert_eq!(
            PgParam::coerce(&FieldValue::from("2024-03-01T12:00:00Z"), ValueKind::Timestamp),
            expected.map(|ts| PgParam::Timestamp(Some(ts)))
        );
        assert_eq!(
            PgParam::coerce(
                &FieldValue::from("2024-03-01 12:00:00"),
                ValueKind::NaiveTimestamp
            ),
            expected.map(|ts| PgParam::NaiveTimestamp(Some(ts.naive_utc())))
        );
    }

    #[test]
    fn test_uuid_and_bool_from_text() {
        let id = Uuid::new_v4();
        assert_eq!(
            PgParam::coerce(&FieldValue::from(id.to_string()), ValueKind::Uuid),
            Some(PgParam::Uuid(Some(id)))
        );
        assert_eq!(
            PgParam::coerce(&FieldValue::from("true"), ValueKind::Bool),
            Some(PgParam::Bool(Some(true)))
        );
        assert_eq!(PgParam::coerce(&FieldValue::from("42"), ValueKind::Uuid), None);
    }

    #[test]
    fn test_arrays_from_json() {
        assert_eq!(
            PgParam::coerce(&FieldValue::Json(json!(["a", "b"])), ValueKind::TextArray),
            Some(PgParam::TextArray(Some(vec!["a".into(), "b".into()])))
        );
        assert_eq!(
            PgParam::coerce(&FieldValue::Json(json!([1, 2])), ValueKind::IntegerArray),
            Some(PgParam::IntegerArray(Some(vec![1, 2])))
        );
        assert_eq!(
            PgParam::coerce(&FieldValue::Json(json!([1, "x"])), ValueKind::BigIntArray),
            None
        );
        assert_eq!(PgParam::coerce(&FieldValue::from("a"), ValueKind::TextArray), None);
    }

    #[test]
    fn test_json_column_takes_any_value() {
        assert_eq!(
            PgParam::coerce(&FieldValue::from("plain"), ValueKind::Json),
            Some(PgParam::Json(Some(json!("plain"))))
        );
    }

    #[test]
    fn test_unknown_column_type_keeps_natural_binding() {
        assert_eq!(
            PgParam::coerce(&FieldValue::Int(7), ValueKind::Other),
            Some(PgParam::BigInt(Some(7)))
        );
    }
}
