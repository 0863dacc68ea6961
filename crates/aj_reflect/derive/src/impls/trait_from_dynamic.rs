use proc_macro2::TokenStream;
use quote::quote;

use crate::record_data::RecordData;

/// Generate implementation code for `FromDynamic` trait.
///
/// Only a `Dynamic::Record` holding this very type converts.
pub(crate) fn impl_trait_from_dynamic(data: &RecordData) -> TokenStream {
    let aj_reflect_path = &data.aj_reflect_path;
    let from_dynamic_ = crate::path::from_dynamic_(aj_reflect_path);
    let reflect_ = crate::path::reflect_(aj_reflect_path);
    let dynamic_ = crate::path::dynamic_(aj_reflect_path);
    let apply_error_ = crate::path::apply_error_(aj_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(aj_reflect_path);

    let ident = data.ident;
    let (impl_generics, ty_generics, _) = data.generics.split_for_impl();
    let where_clause = crate::impls::where_clause(data, false);

    quote! {
        impl #impl_generics #from_dynamic_ for #ident #ty_generics #where_clause {
            fn from_dynamic(value: #dynamic_) -> ::core::result::Result<Self, #apply_error_> {
                match value {
                    #dynamic_::Record(record) => {
                        <dyn #reflect_>::take::<Self>(record).map_err(|other| {
                            #apply_error_::mismatched(
                                #macro_exports_::type_name::<Self>(),
                                other.reflect_type_path(),
                            )
                        })
                    }
                    other => ::core::result::Result::Err(#apply_error_::mismatched(
                        #macro_exports_::type_name::<Self>(),
                        other.kind_name(),
                    )),
                }
            }
        }
    }
}
