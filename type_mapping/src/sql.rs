//! SQL type mapping utilities
//!
//! This module maps PostgreSQL column type names onto the attribute value
//! variant a decoded column should produce, and onto the Rust type a bound
//! parameter must carry for that column.

/// Decoding and binding target for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    /// Exact numeric, loaded as its canonical decimal text
    Numeric,
    Text,
    Uuid,
    Timestamp,
    NaiveTimestamp,
    Date,
    Time,
    Json,
    TextArray,
    IntegerArray,
    BigIntArray,
    /// Anything else, including user-defined types
    Other,
}

/// Map a PostgreSQL type name to a value kind.
///
/// Accepts the names sqlx reports for result columns (`INT4`, `TEXT[]`) as
/// well as catalog `udt_name` spellings (`int4`, `_text`).
pub fn pg_type_to_value_kind(pg_type: &str) -> ValueKind {
    match pg_type.trim().to_ascii_uppercase().as_str() {
        "BOOL" | "BOOLEAN" => ValueKind::Bool,
        "INT2" | "SMALLINT" | "SMALLSERIAL" => ValueKind::SmallInt,
        "INT4" | "INT" | "INTEGER" | "SERIAL" => ValueKind::Integer,
        "INT8" | "BIGINT" | "BIGSERIAL" => ValueKind::BigInt,
        "FLOAT4" | "REAL" => ValueKind::Real,
        "FLOAT8" | "DOUBLE PRECISION" => ValueKind::Double,
        "NUMERIC" | "DECIMAL" => ValueKind::Numeric,
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" | "CITEXT" => ValueKind::Text,
        "UUID" => ValueKind::Uuid,
        "TIMESTAMPTZ" | "TIMESTAMP WITH TIME ZONE" => ValueKind::Timestamp,
        "TIMESTAMP" | "TIMESTAMP WITHOUT TIME ZONE" => ValueKind::NaiveTimestamp,
        "DATE" => ValueKind::Date,
        "TIME" | "TIME WITHOUT TIME ZONE" => ValueKind::Time,
        "JSON" | "JSONB" => ValueKind::Json,
        "TEXT[]" | "VARCHAR[]" | "_TEXT" | "_VARCHAR" => ValueKind::TextArray,
        "INT4[]" | "_INT4" => ValueKind::IntegerArray,
        "INT8[]" | "_INT8" => ValueKind::BigIntArray,
        _ => ValueKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_column_types() {
        assert_eq!(pg_type_to_value_kind("INT4"), ValueKind::Integer);
        assert_eq!(pg_type_to_value_kind("int8"), ValueKind::BigInt);
        assert_eq!(pg_type_to_value_kind("VARCHAR"), ValueKind::Text);
        assert_eq!(pg_type_to_value_kind("TIMESTAMPTZ"), ValueKind::Timestamp);
        assert_eq!(pg_type_to_value_kind("JSONB"), ValueKind::Json);
        assert_eq!(pg_type_to_value_kind("INET"), ValueKind::Other);
    }

    #[test]
    fn test_exact_numeric_and_calendar_types() {
        assert_eq!(pg_type_to_value_kind("NUMERIC"), ValueKind::Numeric);
        assert_eq!(pg_type_to_value_kind("date"), ValueKind::Date);
        assert_eq!(pg_type_to_value_kind("TIME"), ValueKind::Time);
    }

    #[test]
    fn test_array_spellings_agree() {
        // result column name vs catalog udt_name
        assert_eq!(pg_type_to_value_kind("TEXT[]"), ValueKind::TextArray);
        assert_eq!(pg_type_to_value_kind("_text"), ValueKind::TextArray);
        assert_eq!(pg_type_to_value_kind("INT8[]"), ValueKind::BigIntArray);
        assert_eq!(pg_type_to_value_kind("_int4"), ValueKind::IntegerArray);
    }
}
