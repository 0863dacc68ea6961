use aj_reflect::ops::Record;
use aj_reflect::registry::TypeReport;
use aj_utils::hash::HashSet;

use crate::error::{EmptyRequiredAttributeError, TypeMismatchError, ValidationError};

/// Checks a freshly built record against its report.
///
/// A required attribute must be in `filled` (set from the input) and hold
/// a non-null value, so a field default never satisfies it. A non-null
/// value must be accepted by the declared type.
pub(crate) fn validate(
    record: &dyn Record,
    report: &TypeReport,
    filled: &HashSet<&str>,
) -> Result<(), ValidationError> {
    for attribute in report.iter() {
        let name = attribute.attribute_name();
        let value = record
            .field(name)
            .filter(|value| !value.reflect_ref().is_null());

        if attribute.required() && (value.is_none() || !filled.contains(name)) {
            return Err(EmptyRequiredAttributeError {
                type_path: report.type_path(),
                attribute: name.into(),
            }
            .into());
        }

        if let (Some(value), Some(hint)) = (value, attribute.declared_type())
            && !hint.accepts(value)
        {
            return Err(TypeMismatchError {
                type_path: report.type_path(),
                attribute: Some(name.into()),
                reason: alloc::format!("expected {hint}, found {}", value.reflect_ref().kind_name()),
            }
            .into());
        }
    }
    Ok(())
}
