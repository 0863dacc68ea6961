//! Reflection for std, alloc and chrono types.

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod datetime;
mod pointer;
mod scalar;
mod tuple;

pub(crate) use collections::key_from_text;

// -----------------------------------------------------------------------------
// Helpers

/// Expands to the `Any` accessors of [`Reflect`](crate::Reflect).
macro_rules! impl_any_methods {
    () => {
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
            self: ::alloc::boxed::Box<Self>,
        ) -> ::alloc::boxed::Box<dyn ::core::any::Any> {
            self
        }
    };
}

pub(crate) use impl_any_methods;
