//! Declarative attribute validation
//!
//! Rules bind to a single field; the engine evaluates every rule and collects
//! all failures keyed by field.

pub mod engine;
pub mod rule;

pub use engine::{ValidationEngine, ValidationErrors, ValidationReport};
pub use rule::{RuleKind, ValidationRule};
