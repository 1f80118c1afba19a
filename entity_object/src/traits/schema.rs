use crate::rules::ValidationRule;
use crate::traits::metadata::EntityMetadata;

/// Validation rules of an entity type.
///
/// The rule order decides the order of the fillable fields, and with it the
/// column order of insert and update payloads.
pub trait EntitySchema: EntityMetadata {
    fn rules() -> Vec<ValidationRule>;
}
