//! Executable statement description

use type_mapping::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

/// Where a bound parameter ends up in the statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamRole {
    /// Written to this column by INSERT or UPDATE
    Assignment(String),
    /// Compared for equality with this column
    Condition(String),
    /// LIMIT or OFFSET
    Window,
}

impl ParamRole {
    /// Column the parameter is written to or compared with
    pub fn column(&self) -> Option<&str> {
        match self {
            ParamRole::Assignment(column) | ParamRole::Condition(column) => Some(column),
            ParamRole::Window => None,
        }
    }
}

/// SQL text with `$n` placeholders and the values bound to them.
/// `roles[i]` describes `params[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub(crate) kind: StatementKind,
    pub(crate) table: String,
    pub(crate) sql: String,
    pub(crate) params: Vec<FieldValue>,
    pub(crate) roles: Vec<ParamRole>,
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[FieldValue] {
        &self.params
    }

    pub fn roles(&self) -> &[ParamRole] {
        &self.roles
    }

    /// Parameters in placeholder order, paired with their role
    pub fn bindings(&self) -> impl Iterator<Item = (&ParamRole, &FieldValue)> {
        self.roles.iter().zip(&self.params)
    }
}
