//! Entity metadata
//!
//! Static description of an entity type: its table and key layout.

/// Table and key layout of an entity type.
///
/// Normally derived:
/// ```ignore
/// use entity_derive::EntityMetadata;
///
/// #[derive(EntityMetadata)]
/// #[entity(primary_keys(id), unique_keys(email), graded(name, email), hidden(password))]
/// pub struct User;
/// ```
///
/// The derive names the table after the type, lower-cased with a trailing
/// `s` (`User` → `users`).
pub trait EntityMetadata: Send + Sync + 'static {
    /// The table name in the database
    fn table_name() -> &'static str;

    /// Ordered primary key fields. The first one is the canonical identifier.
    fn primary_keys() -> &'static [&'static str];

    /// Fields that each resolve at most one record on their own
    fn unique_keys() -> &'static [&'static str];

    /// Public visibility allowlist. Empty means "use the fillable fields".
    fn graded() -> &'static [&'static str] {
        &[]
    }

    /// Never part of an externally visible projection
    fn hidden() -> &'static [&'static str] {
        &[]
    }

    /// The canonical identifier field, if any
    fn primary_key() -> Option<&'static str> {
        Self::primary_keys().first().copied()
    }
}
