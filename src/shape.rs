//! Destination shape handling for resolution.
//!
//! Rust has no runtime reflection, so "does this provider satisfy that
//! destination type" is decided by an explicit caster table built at bind
//! time. Each binding registers, keyed by destination `TypeId`, a closure
//! converting the provider's type-erased handle into a concrete destination
//! value. Classifying a requested shape is then a single table lookup:
//!
//! - `Arc<T>` / `Option<Arc<T>>` casters come with the lifecycle option
//!   (`singleton` / `constructor`) and cover concrete-handle destinations,
//! - `Arc<dyn Trait>` / `Option<Arc<dyn Trait>>` casters come from the
//!   opt-in `implements` option and cover trait-object destinations.

use std::any::{Any, TypeId};
use std::sync::Arc;

/// Type-erased shared handle produced by every provider.
pub(crate) type AnyHandle = Arc<dyn Any + Send + Sync>;

type CastFn = Box<dyn Fn(AnyHandle) -> Option<Box<dyn Any>> + Send + Sync>;

/// TypeId paired with its `type_name` for diagnostics.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TypeInfo {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
}

impl TypeInfo {
    pub(crate) fn of<X: Any>() -> Self {
        Self {
            id: TypeId::of::<X>(),
            name: std::any::type_name::<X>(),
        }
    }
}

/// One supported destination shape of a binding.
///
/// `source` is the concrete type the provider produces; `target` is the
/// destination type the caster can fill. The conversion returns `None` when
/// the handle is not of the source type, which bind-time validation rules out
/// for any caster that survives `check_options`.
pub(crate) struct Caster {
    pub(crate) source: TypeInfo,
    pub(crate) target: TypeInfo,
    pub(crate) cast: CastFn,
}

/// Identity casters for a concrete type: `Arc<T>` and `Option<Arc<T>>`.
pub(crate) fn handle_casters<T: Any + Send + Sync>() -> [Caster; 2] {
    [
        Caster {
            source: TypeInfo::of::<T>(),
            target: TypeInfo::of::<Arc<T>>(),
            cast: Box::new(|handle| {
                handle
                    .downcast::<T>()
                    .ok()
                    .map(|arc| Box::new(arc) as Box<dyn Any>)
            }),
        },
        Caster {
            source: TypeInfo::of::<T>(),
            target: TypeInfo::of::<Option<Arc<T>>>(),
            cast: Box::new(|handle| {
                handle
                    .downcast::<T>()
                    .ok()
                    .map(|arc| Box::new(Some(arc)) as Box<dyn Any>)
            }),
        },
    ]
}

/// Trait-object casters declared by `implements`: `Arc<U>` and
/// `Option<Arc<U>>`, where `U` is the trait object type.
///
/// The coercion function is supplied by the caller (`|t| t` at the call
/// site), which is how the compiler proves `T` actually implements the trait.
pub(crate) fn trait_casters<T, U>(cast: fn(Arc<T>) -> Arc<U>) -> [Caster; 2]
where
    T: Any + Send + Sync,
    U: ?Sized + 'static,
{
    [
        Caster {
            source: TypeInfo::of::<T>(),
            target: TypeInfo::of::<Arc<U>>(),
            cast: Box::new(move |handle| {
                handle
                    .downcast::<T>()
                    .ok()
                    .map(|arc| Box::new(cast(arc)) as Box<dyn Any>)
            }),
        },
        Caster {
            source: TypeInfo::of::<T>(),
            target: TypeInfo::of::<Option<Arc<U>>>(),
            cast: Box::new(move |handle| {
                handle
                    .downcast::<T>()
                    .ok()
                    .map(|arc| Box::new(Some(cast(arc))) as Box<dyn Any>)
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget {
        size: u32,
    }

    trait Measured {
        fn size(&self) -> u32;
    }

    impl Measured for Widget {
        fn size(&self) -> u32 {
            self.size
        }
    }

    #[test]
    fn handle_caster_roundtrip() {
        let [bare, optional] = handle_casters::<Widget>();
        let handle: AnyHandle = Arc::new(Widget { size: 9 });

        let boxed = (bare.cast)(handle.clone()).unwrap();
        let arc = boxed.downcast::<Arc<Widget>>().unwrap();
        assert_eq!(arc.size, 9);

        let boxed = (optional.cast)(handle).unwrap();
        let arc = boxed.downcast::<Option<Arc<Widget>>>().unwrap();
        assert_eq!(arc.unwrap().size, 9);
    }

    #[test]
    fn trait_caster_coerces() {
        let [bare, _] = trait_casters::<Widget, dyn Measured>(|w| w);
        let handle: AnyHandle = Arc::new(Widget { size: 3 });

        let boxed = (bare.cast)(handle).unwrap();
        let arc = boxed.downcast::<Arc<dyn Measured>>().unwrap();
        assert_eq!(arc.size(), 3);
    }

    #[test]
    fn caster_rejects_foreign_handle() {
        let [bare, _] = handle_casters::<Widget>();
        let handle: AnyHandle = Arc::new(42u32);
        assert!((bare.cast)(handle).is_none());
    }
}
