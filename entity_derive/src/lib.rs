//! Procedural macros for entity metadata
//!
//! This crate provides the `EntityMetadata` derive, which generates the
//! table name and key layout of an entity type at compile time.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod generation;
mod parsing;

use generation::generate_entity_metadata_impl;
use parsing::{derive_table_name, parse_entity_attributes};

/// Derive macro for the `EntityMetadata` trait
///
/// Usage:
/// ```rust,ignore
/// use entity_derive::EntityMetadata;
///
/// #[derive(EntityMetadata)]
/// #[entity(
///     primary_keys(id),
///     unique_keys(email),
///     graded(name, email),
///     hidden(password)
/// )]
/// pub struct User;
/// ```
///
/// The table is named after the type, lower-cased with a trailing `s`
/// (`User` → `users`). Every listed field and the table name must be valid
/// SQL identifiers; anything else is a compile error.
#[proc_macro_derive(EntityMetadata, attributes(entity))]
pub fn derive_entity_metadata(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let table_name = match derive_table_name(&input.ident) {
        Ok(name) => name,
        Err(e) => return e.to_compile_error().into(),
    };

    let entity_info = match parse_entity_attributes(&input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    generate_entity_metadata_impl(&input, &table_name, &entity_info).into()
}
