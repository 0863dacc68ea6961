use proc_macro2::TokenStream;
use quote::quote;

use crate::record_data::RecordData;

/// Generate implementation code for `GetTypeMetadata` trait.
///
/// Output looks like:
///
/// ```ignore
/// TypeMetadata::of::<Self>()
///     .extends::<Base>()
///     .alias("alias")
///     .attribute("a", [("name", "aa")])
///     .hint("a", <i32 as Typed>::type_hint())
///     .default_constructor::<Self>()
/// ```
///
/// Only fields with options get an `attribute` call, every reflected field
/// gets a `hint`.
pub(crate) fn impl_trait_get_type_metadata(data: &RecordData) -> TokenStream {
    let aj_reflect_path = &data.aj_reflect_path;
    let get_type_metadata_ = crate::path::get_type_metadata_(aj_reflect_path);
    let type_metadata_ = crate::path::type_metadata_(aj_reflect_path);
    let typed_ = crate::path::typed_(aj_reflect_path);

    let ident = data.ident;
    let (impl_generics, ty_generics, _) = data.generics.split_for_impl();
    let where_clause = crate::impls::where_clause(data, data.options.constructor.is_none());

    let extends = data.options.extends.iter().map(|base| {
        quote! { .extends::<#base>() }
    });

    let alias = data.options.alias.as_ref().map(|alias| {
        quote! { .alias(#alias) }
    });

    let attributes = data
        .active_fields()
        .filter(|field| !field.options.raw.is_empty())
        .map(|field| {
            let name = &field.name;
            let keys = field.options.raw.iter().map(|(k, _)| *k);
            let values = field.options.raw.iter().map(|(_, v)| v.as_str());
            quote! { .attribute(#name, [#((#keys, #values)),*]) }
        });

    let hints = data.active_fields().map(|field| {
        let name = &field.name;
        let ty = field.ty;
        quote! { .hint(#name, <#ty as #typed_>::type_hint()) }
    });

    let constructor = match &data.options.constructor {
        Some(path) => quote! { .constructor(#path) },
        None => quote! { .default_constructor::<Self>() },
    };

    quote! {
        impl #impl_generics #get_type_metadata_ for #ident #ty_generics #where_clause {
            fn type_metadata() -> #type_metadata_ {
                #type_metadata_::of::<Self>()
                    #(#extends)*
                    #alias
                    #(#attributes)*
                    #(#hints)*
                    #constructor
            }
        }
    }
}
