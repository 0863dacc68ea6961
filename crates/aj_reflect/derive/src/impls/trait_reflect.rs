use proc_macro2::TokenStream;
use quote::quote;

use crate::record_data::RecordData;

/// Generate implementation code for `Reflect` trait.
pub(crate) fn impl_trait_reflect(data: &RecordData) -> TokenStream {
    let aj_reflect_path = &data.aj_reflect_path;
    let reflect_ = crate::path::reflect_(aj_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(aj_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(aj_reflect_path);

    let ident = data.ident;
    let (impl_generics, ty_generics, _) = data.generics.split_for_impl();
    let where_clause = crate::impls::where_clause(data, false);

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::Record(self)
            }

            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            #[inline]
            fn into_any(
                self: #macro_exports_::Box<Self>,
            ) -> #macro_exports_::Box<dyn ::core::any::Any> {
                self
            }
        }
    }
}
