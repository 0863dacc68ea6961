//! Code generation, one module per implemented trait.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{WhereClause, parse_quote, punctuated::Punctuated};

use crate::record_data::RecordData;

// -----------------------------------------------------------------------------
// Modules

mod trait_from_dynamic;
mod trait_get_type_metadata;
mod trait_record;
mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Entry

pub(crate) fn impl_record(data: &RecordData) -> TokenStream {
    let reflect = trait_reflect::impl_trait_reflect(data);
    let record = trait_record::impl_trait_record(data);
    let from_dynamic = trait_from_dynamic::impl_trait_from_dynamic(data);
    let typed = trait_typed::impl_trait_typed(data);
    let get_type_metadata = trait_get_type_metadata::impl_trait_get_type_metadata(data);

    quote! {
        const _: () = {
            #reflect
            #record
            #from_dynamic
            #typed
            #get_type_metadata
        };
    }
}

/// The where clause shared by every generated impl.
///
/// Each type parameter must itself be reflectable. With `need_default`,
/// the type must also implement `Default` when generic.
pub(crate) fn where_clause(data: &RecordData, need_default: bool) -> WhereClause {
    let aj_reflect_path = &data.aj_reflect_path;
    let reflect_ = crate::path::reflect_(aj_reflect_path);
    let from_dynamic_ = crate::path::from_dynamic_(aj_reflect_path);
    let typed_ = crate::path::typed_(aj_reflect_path);

    let mut where_clause = data
        .generics
        .where_clause
        .clone()
        .unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Punctuated::new(),
        });

    let mut has_params = false;
    for param in data.generics.type_params() {
        has_params = true;
        let ident = &param.ident;
        where_clause
            .predicates
            .push(parse_quote! { #ident: #reflect_ + #from_dynamic_ + #typed_ });
    }

    if need_default && has_params {
        let ident = data.ident;
        let (_, ty_generics, _) = data.generics.split_for_impl();
        where_clause
            .predicates
            .push(parse_quote! { #ident #ty_generics: ::core::default::Default });
    }

    where_clause
}
