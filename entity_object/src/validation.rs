//! Identifier validation
//!
//! Table and column names are the only parts of a statement that are spliced
//! into SQL text, so every one of them passes through here first.

use std::fmt;

/// PostgreSQL identifier length limit
pub const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Reasons an identifier is refused
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierError {
    /// Name contains invalid characters (only alphanumeric and underscore allowed)
    InvalidCharacters(String),
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },
    Empty,
    /// Name starts with invalid character (must start with letter or underscore)
    InvalidStartCharacter(String),
    ReservedKeyword(String),
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierError::InvalidCharacters(name) => write!(
                f,
                "Invalid characters in name '{}': only alphanumeric characters and underscores are allowed",
                name
            ),
            IdentifierError::TooLong {
                name,
                length,
                max_length,
            } => write!(
                f,
                "Name '{}' is too long: {} characters (max {})",
                name, length, max_length
            ),
            IdentifierError::Empty => write!(f, "Name cannot be empty"),
            IdentifierError::InvalidStartCharacter(name) => {
                write!(f, "Name '{}' must start with a letter or underscore", name)
            }
            IdentifierError::ReservedKeyword(name) => {
                write!(f, "Name '{}' is a reserved SQL keyword", name)
            }
        }
    }
}

impl std::error::Error for IdentifierError {}

// Words that would change the meaning of a statement if used bare as a name
const RESERVED_KEYWORDS: &[&str] = &[
    "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CAST", "CHECK",
    "COLUMN", "CONSTRAINT", "CREATE", "CROSS", "DEFAULT", "DELETE", "DESC", "DISTINCT",
    "DROP", "ELSE", "END", "EXCEPT", "EXISTS", "FALSE", "FETCH", "FOR", "FOREIGN", "FROM",
    "FULL", "GRANT", "GROUP", "HAVING", "IN", "INNER", "INSERT", "INTERSECT", "INTO", "IS",
    "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER",
    "OUTER", "PRIMARY", "REFERENCES", "RETURNING", "RIGHT", "SELECT", "SET", "TABLE", "THEN",
    "TO", "TRUE", "UNION", "UNIQUE", "UPDATE", "USING", "VALUES", "WHEN", "WHERE", "WITH",
];

/// Check a table or column name against the identifier rules
pub fn validate_identifier(name: &str) -> Result<(), IdentifierError> {
    let first_char = name.chars().next().ok_or(IdentifierError::Empty)?;

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(IdentifierError::TooLong {
            name: name.to_string(),
            length: name.len(),
            max_length: MAX_IDENTIFIER_LENGTH,
        });
    }

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(IdentifierError::InvalidStartCharacter(name.to_string()));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(IdentifierError::InvalidCharacters(name.to_string()));
    }

    if is_reserved_keyword(name) {
        return Err(IdentifierError::ReservedKeyword(name.to_string()));
    }

    Ok(())
}

pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}

/// A table name that is safe to splice into a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedTableName(String);

impl ValidatedTableName {
    pub fn new(name: &str) -> Result<Self, IdentifierError> {
        validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A column name that is safe to splice into a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedFieldName(String);

impl ValidatedFieldName {
    pub fn new(name: &str) -> Result<Self, IdentifierError> {
        validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
