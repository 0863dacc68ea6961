use alloc::sync::Arc;
use core::any::TypeId;

use aj_reflect::Reflect;
use aj_reflect::dynamic::Dynamic;
use aj_reflect::registry::{AttributeReport, Groups};
use aj_utils::TypeIdMap;

/// A custom serializer for one type.
///
/// It receives the value, the requested groups and the report of the
/// attribute holding the value, if any. The returned [`Dynamic`] is
/// serialized in place of the value.
pub type SerializeHandler =
    dyn Fn(&dyn Reflect, Option<&Groups>, Option<&AttributeReport>) -> Dynamic + Send + Sync;

/// Handlers keyed by the type they intercept.
#[derive(Default, Clone)]
pub(crate) struct HandlerTable {
    handlers: TypeIdMap<Arc<SerializeHandler>>,
}

impl HandlerTable {
    /// Installs a handler for `T`, replacing the previous one.
    pub fn insert<T, F>(&mut self, handler: F)
    where
        T: Reflect,
        F: Fn(&T, Option<&Groups>, Option<&AttributeReport>) -> Dynamic + Send + Sync + 'static,
    {
        let erased = move |value: &dyn Reflect, groups: Option<&Groups>, report: Option<&AttributeReport>| {
            match value.downcast_ref::<T>() {
                Some(value) => handler(value, groups, report),
                // Lookups are keyed by `ty_id`, so the cast cannot fail.
                None => Dynamic::Null,
            }
        };
        if self.handlers.insert_type::<T>(Arc::new(erased)).is_some() {
            log::debug!("replaced the serialize handler of `{}`", core::any::type_name::<T>());
        }
    }

    pub fn remove<T: Reflect>(&mut self) -> bool {
        self.handlers.remove_type::<T>().is_some()
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&SerializeHandler> {
        self.handlers.get(&type_id).map(|handler| &**handler)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
