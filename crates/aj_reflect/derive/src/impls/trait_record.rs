use proc_macro2::TokenStream;
use quote::quote;

use crate::record_data::RecordData;

/// Generate implementation code for `Record` trait.
///
/// Names are matched as string literals. Unknown names fall back to the
/// `dynamic` field when there is one.
pub(crate) fn impl_trait_record(data: &RecordData) -> TokenStream {
    let aj_reflect_path = &data.aj_reflect_path;
    let reflect_ = crate::path::reflect_(aj_reflect_path);
    let record_ = crate::path::record_(aj_reflect_path);
    let record_field_iter_ = crate::path::record_field_iter_(aj_reflect_path);
    let set_field_error_ = crate::path::set_field_error_(aj_reflect_path);
    let from_dynamic_ = crate::path::from_dynamic_(aj_reflect_path);
    let dynamic_ = crate::path::dynamic_(aj_reflect_path);
    let dynamic_attributes_ = crate::path::dynamic_attributes_(aj_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(aj_reflect_path);

    let ident = data.ident;
    let (impl_generics, ty_generics, _) = data.generics.split_for_impl();
    let where_clause = crate::impls::where_clause(data, false);

    let fields: Vec<_> = data.active_fields().collect();
    let field_count = fields.len();
    let members: Vec<_> = fields.iter().map(|f| f.ident).collect();
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    let types: Vec<_> = fields.iter().map(|f| f.ty).collect();

    let (field_fallback, dynamic_methods) = match data.dynamic_field() {
        Some(bag) => {
            let bag = bag.ident;
            (
                quote! {
                    match self.#bag.get(name) {
                        ::core::option::Option::Some(value) => {
                            ::core::option::Option::Some(value as &dyn #reflect_)
                        }
                        ::core::option::Option::None => ::core::option::Option::None,
                    }
                },
                quote! {
                    #[inline]
                    fn dynamic_attributes(&self) -> ::core::option::Option<&#dynamic_attributes_> {
                        ::core::option::Option::Some(&self.#bag)
                    }

                    #[inline]
                    fn dynamic_attributes_mut(
                        &mut self,
                    ) -> ::core::option::Option<&mut #dynamic_attributes_> {
                        ::core::option::Option::Some(&mut self.#bag)
                    }
                },
            )
        }
        None => (quote! { ::core::option::Option::None }, TokenStream::new()),
    };

    quote! {
        impl #impl_generics #record_ for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(&self.#members),)*
                    _ => #field_fallback,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }

            fn iter_fields(&self) -> #record_field_iter_<'_> {
                let fields: [(&str, &dyn #reflect_); #field_count] = [
                    #((#names, &self.#members),)*
                ];
                #macro_exports_::Box::new(::core::iter::IntoIterator::into_iter(fields))
            }

            fn set_field(
                &mut self,
                name: &str,
                value: #dynamic_,
            ) -> ::core::result::Result<(), #set_field_error_> {
                match name {
                    #(#names => {
                        self.#members = <#types as #from_dynamic_>::from_dynamic(value)?;
                        ::core::result::Result::Ok(())
                    })*
                    _ => ::core::result::Result::Err(#set_field_error_::NoSuchField(value)),
                }
            }

            #dynamic_methods
        }
    }
}
