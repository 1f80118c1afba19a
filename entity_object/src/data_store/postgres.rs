//! PostgreSQL executor

use crate::attributes::AttributeStore;
use crate::data_store::executor::StatementExecutor;
use crate::data_store::params::PgParam;
use crate::errors::StoreError;
use crate::query_builder::{ParamRole, Statement};
use crate::result::{ExecutionResult, ResultRow};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow, PgTypeKind};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row, TypeInfo, ValueRef};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use type_mapping::{pg_type_to_value_kind, FieldValue, ValueKind};

const COLUMN_KINDS_SQL: &str = "SELECT column_name::text, udt_name::text \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = $1";

type ColumnKinds = HashMap<String, ValueKind>;

/// Executes statements on a sqlx PostgreSQL pool.
///
/// Parameters are typed after the column they are written to or compared
/// with. Column types are read from `information_schema` once per table in
/// the current schema and kept for the life of the executor. Clones share
/// them.
#[derive(Clone, Debug)]
pub struct PgExecutor {
    pool: PgPool,
    columns: Arc<RwLock<HashMap<String, Arc<ColumnKinds>>>>,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            columns: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn column_kinds(&self, table: &str) -> Result<Arc<ColumnKinds>, StoreError> {
        // Unquoted identifiers are folded to lower case by the server
        let table = table.to_ascii_lowercase();
        if let Ok(columns) = self.columns.read() {
            if let Some(kinds) = columns.get(&table) {
                return Ok(kinds.clone());
            }
        }

        let rows: Vec<(String, String)> = sqlx::query_as(COLUMN_KINDS_SQL)
            .bind(table.clone())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::query_execution(&table, COLUMN_KINDS_SQL, e))?;

        let kinds: ColumnKinds = rows
            .into_iter()
            .map(|(column, udt_name)| (column, pg_type_to_value_kind(&udt_name)))
            .collect();
        tracing::debug!(table = %table, columns = kinds.len(), "column types loaded");

        let kinds = Arc::new(kinds);
        // A table that does not exist yet is looked up again next time
        if !kinds.is_empty() {
            if let Ok(mut columns) = self.columns.write() {
                columns.insert(table, kinds.clone());
            }
        }
        Ok(kinds)
    }
}

#[async_trait]
impl StatementExecutor for PgExecutor {
    async fn execute(&self, statement: &Statement) -> Result<ExecutionResult, StoreError> {
        let kinds = self.column_kinds(statement.table()).await?;

        let Some(params) = typed_params(statement, &kinds)? else {
            // Some equality compares a column with a value it can never hold
            crate::debug_log!(
                "[PG] {} condition cannot match, skipping round trip",
                statement.table()
            );
            return Ok(ExecutionResult::empty());
        };

        let mut query: Query<'_, Postgres, PgArguments> = sqlx::query(statement.sql());
        for param in params {
            query = param.bind(query);
        }

        // Writes carry RETURNING *, so every kind yields rows
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::query_execution(statement.table(), statement.sql(), e))?;

        let decoded = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
        Ok(ExecutionResult::from_rows(decoded))
    }
}

/// Type every parameter after its column.
///
/// `Ok(None)` when a condition value has no form in its column type: the
/// conjunction of equalities is then false for every row. An assignment
/// value without such a form is an error. Columns missing from the catalog
/// keep the value's own type.
fn typed_params(
    statement: &Statement,
    kinds: &ColumnKinds,
) -> Result<Option<Vec<PgParam>>, StoreError> {
    let mut params = Vec::with_capacity(statement.params().len());
    for (role, value) in statement.bindings() {
        let kind = match role {
            ParamRole::Window => Some(ValueKind::BigInt),
            ParamRole::Assignment(column) | ParamRole::Condition(column) => {
                kinds.get(&column.to_ascii_lowercase()).copied()
            }
        };
        let Some(kind) = kind else {
            params.push(PgParam::natural(value));
            continue;
        };

        match (PgParam::coerce(value, kind), role) {
            (Some(param), _) => params.push(param),
            (None, ParamRole::Assignment(column)) => {
                return Err(StoreError::Coercion {
                    table: statement.table().to_string(),
                    column: column.clone(),
                    value_kind: value.kind_name(),
                    expected: kind,
                });
            }
            (None, _) => return Ok(None),
        }
    }
    Ok(Some(params))
}

fn decode_row(row: &PgRow) -> Result<ResultRow, StoreError> {
    let mut decoded = AttributeStore::new();
    for (index, column) in row.columns().iter().enumerate() {
        let type_info = column.type_info();
        let value = decode_column(row, index, type_info).map_err(|_| StoreError::Decode {
            column: column.name().to_string(),
            type_name: type_info.name().to_string(),
        })?;
        decoded.set(column.name(), value);
    }
    Ok(decoded)
}

fn decode_column(
    row: &PgRow,
    index: usize,
    type_info: &sqlx::postgres::PgTypeInfo,
) -> Result<FieldValue, sqlx::Error> {
    let value = match pg_type_to_value_kind(type_info.name()) {
        ValueKind::Bool => row.try_get::<Option<bool>, _>(index)?.into(),
        ValueKind::SmallInt => row.try_get::<Option<i16>, _>(index)?.into(),
        ValueKind::Integer => row.try_get::<Option<i32>, _>(index)?.into(),
        ValueKind::BigInt => row.try_get::<Option<i64>, _>(index)?.into(),
        ValueKind::Real => row.try_get::<Option<f32>, _>(index)?.into(),
        ValueKind::Double => row.try_get::<Option<f64>, _>(index)?.into(),
        ValueKind::Numeric => row
            .try_get::<Option<rust_decimal::Decimal>, _>(index)?
            .map(|d| d.to_string())
            .into(),
        ValueKind::Text => row.try_get::<Option<String>, _>(index)?.into(),
        ValueKind::Uuid => row.try_get::<Option<uuid::Uuid>, _>(index)?.into(),
        ValueKind::Timestamp => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)?
            .into(),
        ValueKind::NaiveTimestamp => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(index)?
            .map(|naive| naive.and_utc())
            .into(),
        ValueKind::Date => row
            .try_get::<Option<chrono::NaiveDate>, _>(index)?
            .map(|date| date.to_string())
            .into(),
        ValueKind::Time => row
            .try_get::<Option<chrono::NaiveTime>, _>(index)?
            .map(|time| time.to_string())
            .into(),
        ValueKind::Json => json_or_null(row.try_get::<Option<serde_json::Value>, _>(index)?),
        ValueKind::TextArray => json_or_null(
            row.try_get::<Option<Vec<String>>, _>(index)?
                .map(serde_json::Value::from),
        ),
        ValueKind::IntegerArray => json_or_null(
            row.try_get::<Option<Vec<i32>>, _>(index)?
                .map(serde_json::Value::from),
        ),
        ValueKind::BigIntArray => json_or_null(
            row.try_get::<Option<Vec<i64>>, _>(index)?
                .map(serde_json::Value::from),
        ),
        ValueKind::Other => decode_other(row, index, type_info)?,
    };
    Ok(value)
}

/// Enum labels arrive as their UTF-8 text. Other unknown types are refused.
fn decode_other(
    row: &PgRow,
    index: usize,
    type_info: &sqlx::postgres::PgTypeInfo,
) -> Result<FieldValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(FieldValue::Null);
    }
    if !matches!(type_info.kind(), PgTypeKind::Enum(_)) {
        return Err(sqlx::Error::ColumnDecode {
            index: index.to_string(),
            source: format!("no decoding for type {}", type_info.name()).into(),
        });
    }
    let bytes = raw.as_bytes().map_err(|source| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source,
    })?;
    let label = std::str::from_utf8(bytes).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })?;
    Ok(FieldValue::Text(label.to_string()))
}

fn json_or_null(value: Option<serde_json::Value>) -> FieldValue {
    value.map(FieldValue::Json).unwrap_or(FieldValue::Null)
}
