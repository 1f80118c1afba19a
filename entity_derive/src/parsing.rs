//! Parsing utilities for `#[entity(...)]` attributes
//!
//! Names are checked here with the same rules the runtime applies before
//! splicing identifiers into SQL, so a bad name fails the build instead of
//! the first query.

use syn::{parenthesized, punctuated::Punctuated, Attribute, Error, Ident, Result, Token};

/// Validate an identifier and return syn::Error for better proc macro error handling
pub fn validate_identifier_syn(kind: &str, name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid {} '{}': {}", kind, name, e)))
}

/// Validation logic that mirrors entity_object::validation
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;

    // PostgreSQL limit
    if name.len() > 63 {
        return Err(format!(
            "Name '{}' is too long: {} characters (max 63)",
            name,
            name.len()
        ));
    }

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Name '{}' contains invalid characters: only alphanumeric characters and underscores are allowed", name));
    }

    if is_reserved_keyword(name) {
        return Err(format!("Name '{}' is a reserved SQL keyword", name));
    }

    Ok(())
}

/// Same list as entity_object::validation
fn is_reserved_keyword(name: &str) -> bool {
    const RESERVED_KEYWORDS: &[&str] = &[
        "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CAST", "CHECK",
        "COLUMN", "CONSTRAINT", "CREATE", "CROSS", "DEFAULT", "DELETE", "DESC", "DISTINCT",
        "DROP", "ELSE", "END", "EXCEPT", "EXISTS", "FALSE", "FETCH", "FOR", "FOREIGN", "FROM",
        "FULL", "GRANT", "GROUP", "HAVING", "IN", "INNER", "INSERT", "INTERSECT", "INTO", "IS",
        "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER",
        "OUTER", "PRIMARY", "REFERENCES", "RETURNING", "RIGHT", "SELECT", "SET", "TABLE", "THEN",
        "TO", "TRUE", "UNION", "UNIQUE", "UPDATE", "USING", "VALUES", "WHEN", "WHERE", "WITH",
    ];

    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}

/// `User` → `users`
pub fn derive_table_name(ident: &Ident) -> Result<String> {
    let name = format!("{}s", ident.to_string().to_lowercase());
    validate_identifier_syn("table name", &name, ident.span())?;
    Ok(name)
}

#[derive(Debug, Default)]
pub struct EntityInfo {
    pub primary_keys: Vec<String>,
    pub unique_keys: Vec<String>,
    pub graded: Vec<String>,
    pub hidden: Vec<String>,
}

pub fn parse_entity_attributes(attrs: &[Attribute]) -> Result<EntityInfo> {
    let mut info = EntityInfo::default();

    for attr in attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let target = if meta.path.is_ident("primary_keys") {
                &mut info.primary_keys
            } else if meta.path.is_ident("unique_keys") {
                &mut info.unique_keys
            } else if meta.path.is_ident("graded") {
                &mut info.graded
            } else if meta.path.is_ident("hidden") {
                &mut info.hidden
            } else {
                return Err(meta.error(
                    "unknown entity key: expected primary_keys, unique_keys, graded or hidden",
                ));
            };

            let content;
            parenthesized!(content in meta.input);
            let names = Punctuated::<Ident, Token![,]>::parse_terminated(&content)?;

            for name in names {
                let field = name.to_string();
                validate_identifier_syn("field name", &field, name.span())?;
                if !target.contains(&field) {
                    target.push(field);
                }
            }
            Ok(())
        })?;
    }

    Ok(info)
}
