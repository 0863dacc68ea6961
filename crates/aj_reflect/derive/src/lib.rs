//! See [`Record`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static AJ_ATTRIBUTE_NAME: &str = "aj";

// -----------------------------------------------------------------------------
// Modules

mod impls;
mod path;
mod record_data;

// -----------------------------------------------------------------------------
// Macros

/// # Record Derivation
///
/// `#[derive(Record)]` implements the following traits:
///
/// - `Reflect`
/// - `Record`
/// - `FromDynamic`
/// - `Typed`
/// - `GetTypeMetadata`
///
/// Only structs with named fields (or unit structs) are supported.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Record, Default)]
/// struct User {
///     #[aj(name = "user_name", groups("public", "admin"))]
///     name: String,
///     #[aj(d_format = "%Y/%m/%d", required)]
///     birthday: Option<NaiveDateTime>,
///     #[aj(skip)]
///     cache: Vec<u8>,
///     #[aj(dynamic)]
///     extra: DynamicAttributes,
/// }
/// ```
///
/// - `name = "..."`: the key used in JSON.
/// - `groups(...)`: string or integer tags, the field is only serialized
///   when a requested group matches.
/// - `d_format = "..."`: strftime pattern of timestamps.
/// - `required` or `required = bool`: deserialization fails when the key is
///   missing or null.
/// - `skip`: the field is invisible to reflection. Its type needs no trait.
/// - `dynamic`: a `DynamicAttributes` field that receives unknown keys and
///   is serialized back inline. At most one per type.
///
/// Fields without options still get a report through their type hint.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Record)]
/// #[aj(extends(Person), alias = "employee", constructor = Employee::construct)]
/// struct Employee { /* ... */ }
/// ```
///
/// - `extends(A, B, ...)`: reports of the bases are merged underneath,
///   earlier bases first. Bases must implement `GetTypeMetadata`.
/// - `alias = "..."`: a unique name for lookups.
/// - `constructor = path`: a
///   `fn(&[Dynamic]) -> Result<Box<dyn Record>, ConstructError>`.
///   Without it the type must implement `Default`.
#[proc_macro_derive(Record, attributes(aj))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match record_data::RecordData::from_ast(&ast) {
        Ok(data) => impls::impl_record(&data).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
