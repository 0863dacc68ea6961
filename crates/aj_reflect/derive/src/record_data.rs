//! Parsing of the derive input and its `#[aj(...)]` attributes.

use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Lit, LitStr, Path, Token, Type};
use syn::{parenthesized, punctuated::Punctuated};

use crate::AJ_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Field

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldRole {
    #[default]
    Plain,
    Skip,
    Dynamic,
}

/// Options of one field, in the raw form handed to `TypeMetadata::attribute`.
#[derive(Default)]
pub(crate) struct FieldOptions {
    pub role: FieldRole,
    /// `(key, text)` pairs, in declaration order.
    pub raw: Vec<(&'static str, String)>,
}

impl FieldOptions {
    fn set(&mut self, meta: &ParseNestedMeta, key: &'static str, text: String) -> syn::Result<()> {
        if self.raw.iter().any(|(k, _)| *k == key) {
            return Err(meta.error(format!("duplicate `{key}` option")));
        }
        self.raw.push((key, text));
        Ok(())
    }

    fn set_role(&mut self, meta: &ParseNestedMeta, role: FieldRole) -> syn::Result<()> {
        if self.role != FieldRole::Plain {
            return Err(meta.error("`skip` and `dynamic` are exclusive"));
        }
        self.role = role;
        Ok(())
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            let lit: LitStr = meta.value()?.parse()?;
            if lit.value().is_empty() {
                return Err(syn::Error::new(lit.span(), "the wire name is empty"));
            }
            self.set(&meta, "name", lit.value())
        } else if meta.path.is_ident("groups") {
            let content;
            parenthesized!(content in meta.input);
            let tags = Punctuated::<Lit, Token![,]>::parse_terminated(&content)?;
            let json = groups_to_json(&tags)?;
            self.set(&meta, "groups", json)
        } else if meta.path.is_ident("d_format") {
            let lit: LitStr = meta.value()?.parse()?;
            self.set(&meta, "d_format", lit.value())
        } else if meta.path.is_ident("required") {
            let required = if meta.input.peek(Token![=]) {
                meta.value()?.parse::<syn::LitBool>()?.value
            } else {
                true
            };
            self.set(&meta, "required", required.to_string())
        } else if meta.path.is_ident("skip") {
            self.set_role(&meta, FieldRole::Skip)
        } else if meta.path.is_ident("dynamic") {
            self.set_role(&meta, FieldRole::Dynamic)
        } else {
            Err(meta.error("unsupported field option, expected one of `name`, `groups`, `d_format`, `required`, `skip`, `dynamic`"))
        }
    }
}

/// Renders group tags as the JSON list expected by the registry.
fn groups_to_json(tags: &Punctuated<Lit, Token![,]>) -> syn::Result<String> {
    let mut out = String::from("[");
    for (index, tag) in tags.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        match tag {
            Lit::Str(s) => push_json_string(&mut out, &s.value()),
            Lit::Int(i) => out.push_str(&i.base10_parse::<i64>()?.to_string()),
            other => return Err(syn::Error::new(other.span(), "group tags are strings or integers")),
        }
    }
    out.push(']');
    Ok(out)
}

fn push_json_string(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

pub(crate) struct RecordField<'a> {
    pub ident: &'a Ident,
    /// The field name with any `r#` prefix removed.
    pub name: String,
    pub ty: &'a Type,
    pub options: FieldOptions,
}

// -----------------------------------------------------------------------------
// Type

#[derive(Default)]
pub(crate) struct TypeOptions {
    pub extends: Vec<Type>,
    pub alias: Option<LitStr>,
    pub constructor: Option<Path>,
}

impl TypeOptions {
    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("extends") {
            let content;
            parenthesized!(content in meta.input);
            let bases = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
            self.extends.extend(bases);
            Ok(())
        } else if meta.path.is_ident("alias") {
            if self.alias.is_some() {
                return Err(meta.error("duplicate `alias` option"));
            }
            self.alias = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("constructor") {
            if self.constructor.is_some() {
                return Err(meta.error("duplicate `constructor` option"));
            }
            self.constructor = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported type option, expected one of `extends`, `alias`, `constructor`"))
        }
    }
}

// -----------------------------------------------------------------------------
// RecordData

pub(crate) struct RecordData<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub fields: Vec<RecordField<'a>>,
    pub options: TypeOptions,
    pub aj_reflect_path: syn::Path,
}

impl<'a> RecordData<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let mut options = TypeOptions::default();
        for attr in &ast.attrs {
            if attr.path().is_ident(AJ_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| options.parse_meta(meta))?;
            }
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Some(&fields.named),
                Fields::Unit => None,
                Fields::Unnamed(fields) => {
                    return Err(syn::Error::new(
                        fields.span(),
                        "`Record` needs named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`Record` can only be derived for structs",
                ));
            }
        };

        let mut fields = Vec::new();
        let mut dynamic_seen = false;
        for field in named.into_iter().flatten() {
            let mut field_options = FieldOptions::default();
            for attr in &field.attrs {
                if attr.path().is_ident(AJ_ATTRIBUTE_NAME) {
                    attr.parse_nested_meta(|meta| field_options.parse_meta(meta))?;
                }
            }
            if field_options.role != FieldRole::Plain && !field_options.raw.is_empty() {
                return Err(syn::Error::new(
                    field.span(),
                    "`skip` and `dynamic` fields take no other option",
                ));
            }
            if field_options.role == FieldRole::Dynamic {
                if dynamic_seen {
                    return Err(syn::Error::new(
                        field.span(),
                        "only one `dynamic` field is allowed",
                    ));
                }
                dynamic_seen = true;
            }

            // Named fields always have an ident.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            fields.push(RecordField {
                ident,
                name: ident.unraw().to_string(),
                ty: &field.ty,
                options: field_options,
            });
        }

        Ok(Self {
            ident: &ast.ident,
            generics: &ast.generics,
            fields,
            options,
            aj_reflect_path: crate::path::aj_reflect(),
        })
    }

    /// Fields visible to reflection.
    pub fn active_fields(&self) -> impl Iterator<Item = &RecordField<'a>> {
        self.fields
            .iter()
            .filter(|field| field.options.role == FieldRole::Plain)
    }

    pub fn dynamic_field(&self) -> Option<&RecordField<'a>> {
        self.fields
            .iter()
            .find(|field| field.options.role == FieldRole::Dynamic)
    }
}

// -----------------------------------------------------------------------------
// Tests
