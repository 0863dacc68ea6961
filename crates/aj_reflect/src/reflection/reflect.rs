use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::ops::ReflectRef;

// -----------------------------------------------------------------------------
// Reflect

/// A value the codec can inspect at runtime.
///
/// The serializer never sees concrete types, it walks the [`ReflectRef`]
/// returned by [`reflect_ref`](Reflect::reflect_ref) instead. Scalars,
/// collections and pointers are implemented in this crate; records usually
/// get theirs from [`#[derive(Record)]`](crate::derive::Record).
///
/// # Type Identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the id of the box.
/// Use [`Reflect::ty_id`] instead:
///
/// ```rust
/// # use aj_reflect::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = Box::new(32_i32);
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
pub trait Reflect: Any + Send + Sync {
    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the full path of the underlying type.
    ///
    /// ```rust
    /// # use aj_reflect::Reflect;
    /// assert_eq!(1_u8.reflect_type_path(), "u8");
    /// ```
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns an immutable view of the value's shape.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Casts this type to a reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as a reflected value.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Reflect>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// ```rust
    /// # use aj_reflect::Reflect;
    /// let x: Box<dyn Reflect> = Box::new(10_i32);
    /// assert_eq!(x.downcast_ref::<i32>(), Some(&10));
    /// assert_eq!(x.downcast_ref::<u32>(), None);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Downcasts the value to type `T`, returning the original box on failure.
    pub fn downcast<T: Reflect>(self: Box<Self>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.into_any().downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// Downcasts the value to type `T` and unboxes it.
    #[inline]
    pub fn take<T: Reflect>(self: Box<Self>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_path())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::Reflect;

    #[test]
    fn take_and_downcast() {
        let x: Box<dyn Reflect> = Box::new(String::from("text"));
        let x = x.take::<u8>().unwrap_err();
        assert_eq!(x.take::<String>().unwrap(), "text");
    }

    #[test]
    fn debug_shows_type_path() {
        let x: Box<dyn Reflect> = Box::new(5_u16);
        assert_eq!(alloc::format!("{x:?}"), "Reflect(u16)");
    }
}
