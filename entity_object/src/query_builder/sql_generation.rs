//! SQL text generation
//!
//! Placeholders are numbered `$1..$n` in the order their values are pushed:
//! assignments first, then conditions, then LIMIT / OFFSET.

use crate::errors::StatementError;
use crate::query_builder::assignment::AssignmentSet;
use crate::query_builder::condition::Condition;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::statement::{ParamRole, Statement, StatementKind};
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use type_mapping::FieldValue;

pub struct SqlGenerator;

impl SqlGenerator {
    pub fn generate(
        kind: StatementKind,
        table: &str,
        fields: &[String],
        condition: &Condition,
        assignments: &AssignmentSet,
        pagination: Option<Pagination>,
    ) -> Result<Statement, StatementError> {
        let table_name =
            ValidatedTableName::new(table).map_err(|e| StatementError::identifier(table, e))?;

        let mut params: Vec<(ParamRole, FieldValue)> = Vec::new();
        let sql = match kind {
            StatementKind::Select => {
                if !assignments.is_empty() {
                    return Err(StatementError::UnexpectedAssignments(kind.as_str()));
                }
                let projection = Self::build_projection(fields)?;
                let where_clause = Self::build_where_clause(condition, &mut params)?;
                let limit_clause = Self::build_limit_clause(pagination, &mut params);
                format!(
                    "SELECT {} FROM {}{}{}",
                    projection, table_name, where_clause, limit_clause
                )
            }
            StatementKind::Insert => {
                if assignments.is_empty() {
                    format!("INSERT INTO {} DEFAULT VALUES RETURNING *", table_name)
                } else {
                    let columns = Self::validated_columns(assignments)?;
                    let placeholders: Vec<String> = assignments
                        .entries
                        .iter()
                        .zip(&columns)
                        .map(|((_, value), column)| {
                            Self::push_param(
                                &mut params,
                                ParamRole::Assignment(column.clone()),
                                value.clone(),
                            )
                        })
                        .collect();
                    format!(
                        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
                        table_name,
                        columns.join(", "),
                        placeholders.join(", ")
                    )
                }
            }
            StatementKind::Update => {
                if assignments.is_empty() {
                    return Err(StatementError::EmptyAssignments(kind.as_str()));
                }
                if condition.is_empty() {
                    return Err(StatementError::UnboundedWrite(kind.as_str()));
                }
                let set_clause = Self::build_set_clause(assignments, &mut params)?;
                let where_clause = Self::build_where_clause(condition, &mut params)?;
                format!(
                    "UPDATE {} SET {}{} RETURNING *",
                    table_name, set_clause, where_clause
                )
            }
            StatementKind::Delete => {
                if !assignments.is_empty() {
                    return Err(StatementError::UnexpectedAssignments(kind.as_str()));
                }
                if condition.is_empty() {
                    return Err(StatementError::UnboundedWrite(kind.as_str()));
                }
                let where_clause = Self::build_where_clause(condition, &mut params)?;
                format!("DELETE FROM {}{} RETURNING *", table_name, where_clause)
            }
        };

        let (roles, params) = params.into_iter().unzip();
        Ok(Statement {
            kind,
            table: table_name.as_str().to_string(),
            sql,
            params,
            roles,
        })
    }

    fn push_param(
        params: &mut Vec<(ParamRole, FieldValue)>,
        role: ParamRole,
        value: FieldValue,
    ) -> String {
        params.push((role, value));
        format!("${}", params.len())
    }

    fn validate_field(name: &str) -> Result<ValidatedFieldName, StatementError> {
        ValidatedFieldName::new(name).map_err(|e| StatementError::identifier(name, e))
    }

    fn build_projection(fields: &[String]) -> Result<String, StatementError> {
        if fields.is_empty() {
            return Ok("*".to_string());
        }
        let names = fields
            .iter()
            .map(|f| Self::validate_field(f).map(|v| v.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names.join(", "))
    }

    fn validated_columns(assignments: &AssignmentSet) -> Result<Vec<String>, StatementError> {
        assignments
            .columns()
            .map(|c| Self::validate_field(c).map(|v| v.to_string()))
            .collect()
    }

    fn build_set_clause(
        assignments: &AssignmentSet,
        params: &mut Vec<(ParamRole, FieldValue)>,
    ) -> Result<String, StatementError> {
        let mut parts = Vec::with_capacity(assignments.len());
        for (column, value) in &assignments.entries {
            let column = Self::validate_field(column)?;
            let role = ParamRole::Assignment(column.to_string());
            let placeholder = Self::push_param(params, role, value.clone());
            parts.push(format!("{} = {}", column, placeholder));
        }
        Ok(parts.join(", "))
    }

    fn build_where_clause(
        condition: &Condition,
        params: &mut Vec<(ParamRole, FieldValue)>,
    ) -> Result<String, StatementError> {
        if condition.is_empty() {
            return Ok(String::new());
        }
        let mut parts = Vec::with_capacity(condition.fields.len());
        for (field, value) in condition.fields.iter().zip(&condition.params) {
            let field = Self::validate_field(field)?;
            let role = ParamRole::Condition(field.to_string());
            let placeholder = Self::push_param(params, role, value.clone());
            parts.push(format!("{} = {}", field, placeholder));
        }
        Ok(format!(" WHERE {}", parts.join(" AND ")))
    }

    fn build_limit_clause(
        pagination: Option<Pagination>,
        params: &mut Vec<(ParamRole, FieldValue)>,
    ) -> String {
        match pagination {
            Some(page) => {
                let limit =
                    Self::push_param(params, ParamRole::Window, FieldValue::Int(page.limit));
                let offset =
                    Self::push_param(params, ParamRole::Window, FieldValue::Int(page.offset));
                format!(" LIMIT {} OFFSET {}", limit, offset)
            }
            None => String::new(),
        }
    }
}
