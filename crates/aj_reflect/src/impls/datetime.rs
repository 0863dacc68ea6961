use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::dynamic::Dynamic;
use crate::impls::impl_any_methods;
use crate::info::{TypeHint, Typed};
use crate::ops::{ApplyError, ReflectRef};
use crate::registry::DEFAULT_DATETIME_FORMAT;
use crate::{FromDynamic, Reflect};

fn naive_from_dynamic(value: Dynamic) -> Result<NaiveDateTime, ApplyError> {
    match value {
        Dynamic::DateTime(v) => Ok(v),
        Dynamic::Str(text) => NaiveDateTime::parse_from_str(&text, DEFAULT_DATETIME_FORMAT)
            .map_err(|_| ApplyError::mismatched("datetime", "string")),
        other => Err(ApplyError::mismatched("datetime", other.kind_name())),
    }
}

impl Reflect for NaiveDateTime {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::DateTime(*self)
    }

    impl_any_methods!();
}

impl FromDynamic for NaiveDateTime {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
        naive_from_dynamic(value)
    }
}

/// Dates are reported at midnight.
impl Reflect for NaiveDate {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::DateTime(self.and_time(NaiveTime::MIN))
    }

    impl_any_methods!();
}

impl FromDynamic for NaiveDate {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
        naive_from_dynamic(value).map(|v| v.date())
    }
}

impl Reflect for DateTime<Utc> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::DateTime(self.naive_utc())
    }

    impl_any_methods!();
}

impl FromDynamic for DateTime<Utc> {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
        naive_from_dynamic(value).map(|v| v.and_utc())
    }
}

macro_rules! impl_typed_datetime {
    ($($ty:ty),*) => {
        $(
            impl Typed for $ty {
                #[inline]
                fn type_hint() -> TypeHint {
                    TypeHint::DateTime
                }
            }
        )*
    };
}

impl_typed_datetime!(NaiveDateTime, NaiveDate, DateTime<Utc>);

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, Timelike};

    use crate::dynamic::Dynamic;
    use crate::{FromDynamic, Reflect};
    use crate::ops::ReflectRef;

    #[test]
    fn dates_report_midnight() {
        let date = NaiveDate::from_ymd_opt(2000, 2, 1).unwrap();
        let ReflectRef::DateTime(dt) = date.reflect_ref() else {
            panic!("expected a datetime");
        };
        assert_eq!(dt.date(), date);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn strings_use_the_default_format() {
        let dt = NaiveDateTime::from_dynamic(Dynamic::from("2000-02-01T05:30:00")).unwrap();
        assert_eq!(dt.minute(), 30);
        assert!(NaiveDateTime::from_dynamic(Dynamic::from("yesterday")).is_err());
    }
}
