//! Route model binding
//!
//! Resolves the entity a request addresses from the values the router
//! extracted from its path.

use entity_object::{DataStore, Entity, EntityError, EntitySchema, FieldValue};
use std::collections::HashMap;

/// Values the router captured from the request path, by placeholder name
pub type PathData = HashMap<String, String>;

/// A request handler that works on one kind of entity
pub trait Controller {
    type Model: EntitySchema;
}

/// Build the entity addressed by `path_data` for controller `C`.
///
/// Returns `Ok(None)` when the model has no primary key or the path does not
/// carry it. Otherwise looks the value up with [`Entity::find_and_load`],
/// then sets the primary key to the path value. A lookup that matches
/// nothing still yields the entity, holding only that key; store failures
/// propagate.
pub async fn bind_model<C: Controller>(
    path_data: &PathData,
    store: &DataStore,
) -> Result<Option<Entity<C::Model>>, EntityError> {
    let mut entity = Entity::<C::Model>::new();
    let Some(key) = entity.primary_key() else {
        return Ok(None);
    };
    let Some(raw) = path_data.get(key) else {
        return Ok(None);
    };

    let value = FieldValue::infer(raw);
    match entity.find_and_load(store, value.clone()).await {
        Ok(()) | Err(EntityError::NotFound { .. }) => {}
        Err(e) => return Err(e),
    }

    entity.set(key, value);
    Ok(Some(entity))
}
