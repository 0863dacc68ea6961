use alloc::string::{String, ToString};

use aj_reflect::Reflect;
use aj_reflect::ops::{Record, ReflectRef};
use aj_reflect::registry::{AttributeReport, DEFAULT_DATETIME_FORMAT, Groups, TypeReportRegistryArc};
use chrono::NaiveDateTime;
use serde_json::{Map, Number, Value};

use super::DEPTH_SENTINEL;
use crate::config::{CodecConfig, DateTimeEncoding};
use crate::datetime::{format_datetime, to_legacy};
use crate::handler::HandlerTable;

// -----------------------------------------------------------------------------
// SerializeDriver

/// Walks a reflected value and builds its JSON tree.
///
/// # Serialization Rules
///
/// For each value, in order:
///
/// 1. a handler registered for its type, whose result is walked instead;
/// 2. null, bool, numbers, text (a `char` is a one-char string);
/// 3. timestamps, in the active attribute's format or the legacy object;
/// 4. sequences in order, maps with keys turned into text;
/// 5. records, through their report when registered.
///
/// Pointers are transparent and do not count as a level. The root is at
/// depth 1 and every record, collection or handler result adds one. A value
/// deeper than `max_depth` becomes [`DEPTH_SENTINEL`].
///
/// The registry is only locked while a report is looked up, so handlers
/// may register types.
pub(crate) struct SerializeDriver<'a> {
    registry: &'a TypeReportRegistryArc,
    handlers: &'a HandlerTable,
    groups: Option<&'a Groups>,
    config: &'a CodecConfig,
}

impl<'a> SerializeDriver<'a> {
    #[inline]
    pub fn new(
        registry: &'a TypeReportRegistryArc,
        handlers: &'a HandlerTable,
        groups: Option<&'a Groups>,
        config: &'a CodecConfig,
    ) -> Self {
        Self {
            registry,
            handlers,
            groups,
            config,
        }
    }

    pub fn to_tree(&self, value: &dyn Reflect) -> Value {
        self.walk(value, None, 1)
    }

    fn walk(&self, value: &dyn Reflect, report: Option<&AttributeReport>, depth: usize) -> Value {
        if depth > self.config.max_depth {
            log::trace!(
                "depth limit {} reached at `{}`",
                self.config.max_depth,
                value.reflect_type_path()
            );
            return Value::String(DEPTH_SENTINEL.into());
        }

        if !self.handlers.is_empty()
            && let Some(handler) = self.handlers.get(value.ty_id())
        {
            let replaced = handler(value, self.groups, report);
            return self.walk(&replaced, report, depth + 1);
        }

        match value.reflect_ref() {
            ReflectRef::Null => Value::Null,
            ReflectRef::Bool(v) => Value::Bool(v),
            ReflectRef::Int(v) => Value::from(v),
            ReflectRef::UInt(v) => Value::from(v),
            // NaN and infinities have no JSON form.
            ReflectRef::Float(v) => Number::from_f64(v).map_or(Value::Null, Value::Number),
            ReflectRef::Char(v) => Value::String(v.to_string()),
            ReflectRef::Str(v) => Value::String(v.into()),
            ReflectRef::DateTime(v) => self.datetime(&v, report),
            ReflectRef::Sequence(seq) => Value::Array(
                seq.items()
                    .map(|item| self.walk(item, report, depth + 1))
                    .collect(),
            ),
            ReflectRef::Map(map) => Value::Object(
                map.entries()
                    .map(|(k, v)| (self.key_text(k), self.walk(v, report, depth + 1)))
                    .collect(),
            ),
            ReflectRef::Record(record) => Value::Object(self.record(record, depth)),
            ReflectRef::Pointer(inner) => self.walk(inner, report, depth),
            ReflectRef::Shared(inner) => self.walk(&*inner, report, depth),
        }
    }

    fn datetime(&self, value: &NaiveDateTime, report: Option<&AttributeReport>) -> Value {
        match self.config.datetime_encoding {
            DateTimeEncoding::EpochMillis => to_legacy(value),
            DateTimeEncoding::Formatted => {
                let format = report.map_or(DEFAULT_DATETIME_FORMAT, AttributeReport::datetime_format);
                Value::String(format_datetime(value, format))
            }
        }
    }

    fn record(&self, record: &dyn Record, depth: usize) -> Map<String, Value> {
        let mut object = Map::new();

        match self.registry.report(record.ty_id()) {
            Some(type_report) => {
                for attribute in type_report.visible(self.groups) {
                    // Inherited attributes may be absent from the instance.
                    if let Some(value) = record.field(attribute.attribute_name()) {
                        let value = self.walk(value, Some(attribute), depth + 1);
                        object.insert(attribute.wire_name().into(), value);
                    }
                }
            }
            None => {
                for (name, value) in record.iter_fields() {
                    if !name.starts_with('_') {
                        object.insert(name.into(), self.walk(value, None, depth + 1));
                    }
                }
            }
        }

        if let Some(extra) = record.dynamic_attributes() {
            for (name, value) in extra.iter() {
                if !name.starts_with('_') && !object.contains_key(name) {
                    object.insert(name.into(), self.walk(value, None, depth + 1));
                }
            }
        }

        object
    }

    /// Map keys are always text: scalars are printed, anything else is
    /// rendered as compact JSON.
    fn key_text(&self, key: &dyn Reflect) -> String {
        match key.reflect_ref() {
            ReflectRef::Str(v) => v.into(),
            ReflectRef::Char(v) => v.to_string(),
            ReflectRef::Bool(v) => v.to_string(),
            ReflectRef::Int(v) => v.to_string(),
            ReflectRef::UInt(v) => v.to_string(),
            ReflectRef::Float(v) => v.to_string(),
            ReflectRef::Null => String::from("null"),
            ReflectRef::DateTime(v) => format_datetime(&v, DEFAULT_DATETIME_FORMAT),
            ReflectRef::Pointer(inner) => self.key_text(inner),
            ReflectRef::Shared(inner) => self.key_text(&*inner),
            _ => self.walk(key, None, 1).to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
