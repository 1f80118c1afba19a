//! Code generation for the `EntityMetadata` implementation

use crate::parsing::EntityInfo;
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

pub fn generate_entity_metadata_impl(
    input: &DeriveInput,
    table_name: &str,
    info: &EntityInfo,
) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let primary_keys = &info.primary_keys;
    let unique_keys = &info.unique_keys;
    let graded = &info.graded;
    let hidden = &info.hidden;

    quote! {
        impl #impl_generics entity_object::EntityMetadata for #name #ty_generics #where_clause {
            fn table_name() -> &'static str {
                #table_name
            }

            fn primary_keys() -> &'static [&'static str] {
                &[#(#primary_keys),*]
            }

            fn unique_keys() -> &'static [&'static str] {
                &[#(#unique_keys),*]
            }

            fn graded() -> &'static [&'static str] {
                &[#(#graded),*]
            }

            fn hidden() -> &'static [&'static str] {
                &[#(#hidden),*]
            }
        }
    }
}
