use proc_macro2::TokenStream;
use quote::quote;

use crate::record_data::RecordData;

/// Generate implementation code for `Typed` trait.
pub(crate) fn impl_trait_typed(data: &RecordData) -> TokenStream {
    let aj_reflect_path = &data.aj_reflect_path;
    let typed_ = crate::path::typed_(aj_reflect_path);
    let type_hint_ = crate::path::type_hint_(aj_reflect_path);
    let record_hint_ = crate::path::record_hint_(aj_reflect_path);

    let ident = data.ident;
    let (impl_generics, ty_generics, _) = data.generics.split_for_impl();
    let where_clause = crate::impls::where_clause(data, data.options.constructor.is_none());

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            #[inline]
            fn type_hint() -> #type_hint_ {
                #type_hint_::Record(#record_hint_::of::<Self>())
            }
        }
    }
}
