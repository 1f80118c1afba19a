use crate::attributes::AttributeStore;
use crate::result::ExecutionResult;
use crate::rules::{ValidationEngine, ValidationErrors, ValidationReport};
use crate::traits::EntitySchema;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use type_mapping::FieldValue;

/// One record of the table described by `S`.
///
/// Instances are request scoped: they are built, filled and written by a
/// single task and never shared.
pub struct Entity<S: EntitySchema> {
    pub(crate) attributes: AttributeStore,
    pub(crate) fillable: Vec<String>,
    _schema: PhantomData<fn() -> S>,
}

impl<S: EntitySchema> Default for Entity<S> {
    fn default() -> Self {
        Self {
            attributes: AttributeStore::new(),
            fillable: Vec::new(),
            _schema: PhantomData,
        }
    }
}

impl<S: EntitySchema> Clone for Entity<S> {
    fn clone(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            fillable: self.fillable.clone(),
            _schema: PhantomData,
        }
    }
}

impl<S: EntitySchema> fmt::Debug for Entity<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("table", &S::table_name())
            .field("attributes", &self.attributes)
            .field("fillable", &self.fillable)
            .finish()
    }
}

impl<S: EntitySchema> Entity<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name(&self) -> &'static str {
        S::table_name()
    }

    /// The canonical identifier field
    pub fn primary_key(&self) -> Option<&'static str> {
        S::primary_key()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.attributes.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.attributes.set(name, value);
    }

    pub fn has(&self, name: &str) -> bool {
        self.attributes.has(name)
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    /// Fields written by insert and update, as of the last validation pass
    pub fn fillable(&self) -> &[String] {
        &self.fillable
    }

    /// Run every rule of the schema against the current attributes.
    ///
    /// Rebuilds `fillable` from the rule fields, in rule order. Unset fields
    /// reach their rules as `None`.
    pub fn validate(&mut self) -> ValidationReport {
        let rules = S::rules();
        self.fillable.clear();

        let mut pairs = Vec::with_capacity(rules.len());
        for rule in &rules {
            self.fillable.push(rule.field().to_string());
            pairs.push((self.attributes.get(rule.field()), rule));
        }

        let report = ValidationEngine::validate(&pairs);
        if !report.is_valid() {
            crate::debug_log!(
                "[VALIDATE] {} failed on {} field(s)",
                S::table_name(),
                report.errors().len()
            );
        }
        report
    }

    pub fn is_valid(&mut self) -> bool {
        self.validate().is_valid()
    }

    pub fn errors(&mut self) -> ValidationErrors {
        self.validate().into_errors()
    }

    /// Fields safe to show outside: the graded list, else the fillable
    /// fields, minus everything hidden. Sorted and free of duplicates.
    pub fn viewable_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = if !S::graded().is_empty() {
            S::graded().iter().map(|f| f.to_string()).collect()
        } else if !self.fillable.is_empty() {
            self.fillable.clone()
        } else {
            S::rules().iter().map(|r| r.field().to_string()).collect()
        };

        let hidden = S::hidden();
        fields.retain(|f| !hidden.contains(&f.as_str()));
        fields.sort();
        fields.dedup();
        fields
    }

    /// Viewable fields that are set, for rendering
    pub fn to_map(&self) -> BTreeMap<String, FieldValue> {
        self.viewable_fields()
            .into_iter()
            .filter_map(|field| {
                let value = self.attributes.get(&field)?.clone();
                Some((field, value))
            })
            .collect()
    }

    /// Copy every column of a singleton result into the attributes.
    /// Returns `false`, leaving the attributes untouched, for any other result.
    pub fn load_data(&mut self, result: &ExecutionResult) -> bool {
        let Some(row) = result.single_row() else {
            return false;
        };
        row.for_each(|name, value| self.attributes.set(name, value.clone()));
        true
    }

    /// Current value of a key field. Unset keys compare as NULL.
    pub(crate) fn key_value(&self, field: &str) -> FieldValue {
        self.attributes.get(field).cloned().unwrap_or(FieldValue::Null)
    }

    /// Fillable fields that are set, in fillable order. Unset fields are left
    /// out so column defaults apply.
    pub(crate) fn payload(&self) -> Vec<(String, FieldValue)> {
        let mut payload: Vec<(String, FieldValue)> = Vec::with_capacity(self.fillable.len());
        for field in &self.fillable {
            if payload.iter().any(|(name, _)| name == field) {
                continue;
            }
            if let Some(value) = self.attributes.get(field) {
                payload.push((field.clone(), value.clone()));
            }
        }
        payload
    }
}
