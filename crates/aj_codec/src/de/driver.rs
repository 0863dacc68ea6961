use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::TypeId;

use aj_reflect::dynamic::Dynamic;
use aj_reflect::info::{RecordHint, TypeHint};
use aj_reflect::ops::{Record, SetFieldError};
use aj_reflect::registry::{ConstructError, DEFAULT_DATETIME_FORMAT, TypeReport};
use aj_reflect::registry::{TypeReportRegistry, WireName};
use aj_utils::hash::HashSet;
use serde_json::{Map, Number, Value};

use crate::config::{CodecConfig, DateTimeEncoding};
use crate::datetime::{from_legacy, parse_datetime};
use crate::error::{AmbiguousAttributeNameError, DeserializeError};
use crate::error::{EmptyRequiredAttributeError, TypeMismatchError};

// -----------------------------------------------------------------------------
// DeserializeDriver

/// Converts a JSON tree into a [`Dynamic`], guided by a [`TypeHint`].
///
/// Records are built through the constructor of their report, then every
/// key is resolved by wire name and assigned, then the instance is
/// validated. A required attribute must be present with a non-null value,
/// whatever the field type. Nested records get no constructor arguments.
pub(crate) struct DeserializeDriver<'a> {
    registry: &'a TypeReportRegistry,
    config: &'a CodecConfig,
}

impl<'a> DeserializeDriver<'a> {
    #[inline]
    pub fn new(registry: &'a TypeReportRegistry, config: &'a CodecConfig) -> Self {
        Self { registry, config }
    }

    /// Decodes the root value, `args` go to the top-level record(s).
    pub fn decode_root(
        &self,
        value: Value,
        hint: &TypeHint,
        args: &[Dynamic],
    ) -> Result<Dynamic, DeserializeError> {
        self.decode(value, hint, DEFAULT_DATETIME_FORMAT, args)
    }

    fn decode(
        &self,
        value: Value,
        hint: &TypeHint,
        format: &str,
        args: &[Dynamic],
    ) -> Result<Dynamic, DeserializeError> {
        Ok(match (hint, value) {
            (_, Value::Null) => Dynamic::Null,
            (TypeHint::Optional(inner), value) => return self.decode(value, inner, format, args),
            (TypeHint::Record(record), Value::Object(object)) => {
                return self.decode_record(record, object, args);
            }
            (TypeHint::Record(record), Value::Array(items)) => Dynamic::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(object) => self.decode_record(record, object, args),
                        other => Ok(self.decode_any(other)),
                    })
                    .collect::<Result<_, _>>()?,
            ),
            (TypeHint::Str, Value::String(text)) => Dynamic::Str(text),
            (TypeHint::DateTime, Value::String(text)) => match parse_datetime(&text, format) {
                Some(parsed) => Dynamic::DateTime(parsed),
                None => {
                    log::trace!("`{text}` does not match `{format}`, kept as text");
                    Dynamic::Str(text)
                }
            },
            (TypeHint::List(item), Value::Array(items)) => {
                Dynamic::List(self.decode_items(items, item, format)?)
            }
            (TypeHint::Set(item), Value::Array(items)) => {
                Dynamic::set_from(self.decode_items(items, item, format)?)
            }
            (TypeHint::Tuple(hints), Value::Array(items)) if hints.len() == items.len() => {
                Dynamic::Tuple(
                    items
                        .into_iter()
                        .zip(hints)
                        .map(|(item, hint)| self.decode(item, hint, format, &[]))
                        .collect::<Result<_, _>>()?,
                )
            }
            (TypeHint::Map(item), Value::Object(object)) => Dynamic::Map(
                object
                    .into_iter()
                    .map(|(k, v)| Ok::<_, DeserializeError>((k, self.decode(v, item, format, &[])?)))
                    .collect::<Result<_, _>>()?,
            ),
            (_, value) => self.decode_any(value),
        })
    }

    fn decode_items(
        &self,
        items: Vec<Value>,
        hint: &TypeHint,
        format: &str,
    ) -> Result<Vec<Dynamic>, DeserializeError> {
        items
            .into_iter()
            .map(|item| self.decode(item, hint, format, &[]))
            .collect()
    }

    /// Decodes without a declared type.
    ///
    /// Strings that parse with the default format become timestamps, and
    /// legacy timestamp objects are read in legacy mode.
    pub fn decode_any(&self, value: Value) -> Dynamic {
        match value {
            Value::Null => Dynamic::Null,
            Value::Bool(v) => Dynamic::Bool(v),
            Value::Number(v) => number(&v),
            Value::String(text) => match parse_datetime(&text, DEFAULT_DATETIME_FORMAT) {
                Some(parsed) => Dynamic::DateTime(parsed),
                None => Dynamic::Str(text),
            },
            Value::Array(items) => {
                Dynamic::List(items.into_iter().map(|v| self.decode_any(v)).collect())
            }
            Value::Object(object) => {
                if self.config.datetime_encoding == DateTimeEncoding::EpochMillis
                    && let Some(parsed) = from_legacy(&object)
                {
                    return Dynamic::DateTime(parsed);
                }
                Dynamic::Map(
                    object
                        .into_iter()
                        .map(|(k, v)| (k, self.decode_any(v)))
                        .collect::<BTreeMap<_, _>>(),
                )
            }
        }
    }

    /// Decodes a record known to the registry by alias.
    pub fn decode_alias(
        &self,
        value: Value,
        alias: &str,
        args: &[Dynamic],
    ) -> Result<Dynamic, DeserializeError> {
        let report = self
            .registry
            .get_with_alias(alias)
            .ok_or_else(|| DeserializeError::UnknownAlias(alias.into()))?;
        let hint = TypeHint::Record(RecordHint::new(report.type_id(), report.type_path()));
        self.decode_root(value, &hint, args)
    }

    fn decode_record(
        &self,
        hint: &RecordHint,
        object: Map<String, Value>,
        args: &[Dynamic],
    ) -> Result<Dynamic, DeserializeError> {
        let report = self.report(hint.type_id(), hint.type_path())?;
        let type_path = report.type_path();

        let constructor = report
            .constructor()
            .ok_or(ConstructError::Missing { type_path })?;
        let mut instance = constructor(args)?;
        // Attributes that received a non-null value.
        let mut filled: HashSet<&str> = HashSet::default();

        for (key, value) in object {
            match report.resolve_wire_name(&key) {
                WireName::Attribute(attribute) => {
                    let name = attribute.attribute_name();
                    let hint = attribute.declared_type().unwrap_or(&TypeHint::Any);
                    let decoded = self.decode(value, hint, attribute.datetime_format(), &[])?;
                    if decoded.is_null() {
                        if attribute.required() {
                            return Err(EmptyRequiredAttributeError {
                                type_path,
                                attribute: name.into(),
                            }
                            .into());
                        }
                    } else {
                        filled.insert(name);
                    }
                    assign(&mut *instance, type_path, name, decoded)?;
                }
                WireName::Ambiguous(attribute) => {
                    return Err(AmbiguousAttributeNameError {
                        type_path,
                        key,
                        attribute: attribute.attribute_name().into(),
                    }
                    .into());
                }
                WireName::Unknown => {
                    let decoded = self.decode_any(value);
                    assign(&mut *instance, type_path, &key, decoded)?;
                }
            }
        }

        super::validate::validate(&*instance, report, &filled)?;
        Ok(Dynamic::Record(instance))
    }

    fn report(
        &self,
        type_id: TypeId,
        type_path: &'static str,
    ) -> Result<&'a TypeReport, DeserializeError> {
        self.registry
            .get(type_id)
            .ok_or(DeserializeError::UnregisteredType { type_path })
    }
}

/// Assigns a decoded value to a field.
///
/// Values without a matching field go to the dynamic attributes, or are
/// dropped when the record keeps none.
fn assign(
    instance: &mut dyn Record,
    type_path: &'static str,
    name: &str,
    value: Dynamic,
) -> Result<(), DeserializeError> {
    match instance.set_field(name, value) {
        Ok(()) => Ok(()),
        Err(SetFieldError::NoSuchField(value)) => {
            match instance.dynamic_attributes_mut() {
                Some(extra) => {
                    extra.insert(name, value);
                }
                None => log::debug!("`{type_path}` has no field `{name}`, value dropped"),
            }
            Ok(())
        }
        Err(SetFieldError::Apply(err)) => Err(TypeMismatchError {
            type_path,
            attribute: Some(name.into()),
            reason: err.to_string(),
        }
        .into()),
    }
}

fn number(value: &Number) -> Dynamic {
    if let Some(v) = value.as_i64() {
        Dynamic::Int(v)
    } else if let Some(v) = value.as_u64() {
        Dynamic::UInt(v)
    } else {
        value.as_f64().map_or(Dynamic::Null, Dynamic::Float)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use aj_reflect::dynamic::Dynamic;
    use aj_reflect::info::TypeHint;
    use aj_reflect::registry::TypeReportRegistry;
    use chrono::NaiveDate;
    use serde_json::json;

    use super::DeserializeDriver;
    use crate::config::{CodecConfig, DateTimeEncoding};

    fn decode(value: serde_json::Value, hint: &TypeHint, config: CodecConfig) -> Dynamic {
        let registry = TypeReportRegistry::new();
        DeserializeDriver::new(&registry, &config)
            .decode_root(value, hint, &[])
            .unwrap()
    }

    #[test]
    fn generic_tree() {
        let value = decode(
            json!({"a": [1, -2, 1.5], "b": "2000-01-02T03:04:05", "c": "text"}),
            &TypeHint::Any,
            CodecConfig::new(),
        );
        let date = NaiveDate::from_ymd_opt(2000, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
        assert_eq!(
            value.get("a"),
            Some(&Dynamic::List(vec![Dynamic::Int(1), Dynamic::Int(-2), Dynamic::Float(1.5)]))
        );
        assert_eq!(value.get("b"), Some(&Dynamic::DateTime(date)));
        assert_eq!(value.get("c"), Some(&Dynamic::from("text")));
    }

    #[test]
    fn legacy_objects_need_legacy_mode() {
        let tree = json!({"__date_time__": 0});
        let legacy = CodecConfig::new().with_datetime_encoding(DateTimeEncoding::EpochMillis);
        assert!(matches!(decode(tree.clone(), &TypeHint::Any, legacy), Dynamic::DateTime(_)));
        assert!(matches!(decode(tree, &TypeHint::Any, CodecConfig::new()), Dynamic::Map(_)));
    }

    #[test]
    fn hints_shape_collections() {
        let set = decode(json!([1, 1, 2]), &TypeHint::Set(TypeHint::Int.into()), CodecConfig::new());
        assert_eq!(set, Dynamic::Set(vec![Dynamic::Int(1), Dynamic::Int(2)]));

        let hint = TypeHint::Tuple(vec![TypeHint::Str, TypeHint::DateTime]);
        let tuple = decode(json!(["1999", "1999"]), &hint, CodecConfig::new());
        let Dynamic::Tuple(items) = tuple else {
            panic!("expected a tuple");
        };
        // `1999` does not match the default format
        assert_eq!(items[0], Dynamic::from("1999"));
        assert_eq!(items[1], Dynamic::from("1999"));

        let hint = TypeHint::List(TypeHint::DateTime.into());
        let dates = decode(json!(["2000-01-01T00:00:00", "nope"]), &hint, CodecConfig::new());
        assert!(matches!(dates.as_slice().unwrap()[0], Dynamic::DateTime(_)));
        assert_eq!(dates.as_slice().unwrap()[1], Dynamic::from("nope"));
    }
}
