//! Paths of the `aj_reflect` items used by generated code.
//!
//! The only special one is the path of `aj_reflect` itself,
//! see [`aj_reflect`].

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `aj_reflect` crate.
///
/// 1. For crates that depend on `aj_reflect`, `::aj_reflect` is returned.
/// 2. For crates that depend on `ajson`, `::ajson::reflect` is returned.
/// 3. Otherwise `::aj_reflect` is returned, which may be incorrect.
///
/// This reads the caller's manifest, so the path is computed once per
/// derive and passed around.
pub(crate) fn aj_reflect() -> syn::Path {
    aj_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("aj_reflect"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn reflect_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::Reflect }
}

#[inline(always)]
pub(crate) fn from_dynamic_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::FromDynamic }
}

#[inline(always)]
pub(crate) fn reflect_ref_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::ops::ReflectRef }
}

#[inline(always)]
pub(crate) fn record_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::ops::Record }
}

#[inline(always)]
pub(crate) fn record_field_iter_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::ops::RecordFieldIter }
}

#[inline(always)]
pub(crate) fn set_field_error_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::ops::SetFieldError }
}

#[inline(always)]
pub(crate) fn apply_error_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::ops::ApplyError }
}

#[inline(always)]
pub(crate) fn dynamic_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::dynamic::Dynamic }
}

#[inline(always)]
pub(crate) fn dynamic_attributes_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::dynamic::DynamicAttributes }
}

#[inline(always)]
pub(crate) fn typed_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::info::Typed }
}

#[inline(always)]
pub(crate) fn type_hint_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::info::TypeHint }
}

#[inline(always)]
pub(crate) fn record_hint_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::info::RecordHint }
}

#[inline(always)]
pub(crate) fn get_type_metadata_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::registry::GetTypeMetadata }
}

#[inline(always)]
pub(crate) fn type_metadata_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::registry::TypeMetadata }
}

#[inline(always)]
pub(crate) fn macro_exports_(aj_reflect_path: &syn::Path) -> TokenStream {
    quote! { #aj_reflect_path::__macro_exports }
}
