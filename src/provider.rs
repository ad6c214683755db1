//! Provider specifications: bind options, validation, and creation.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptors::BindingDescriptor;
use crate::error::{BoxError, DiError, DiResult};
use crate::lifecycle::Lifecycle;
use crate::shape::{handle_casters, trait_casters, AnyHandle, Caster, TypeInfo};

type FactoryFn = Box<dyn Fn() -> Result<AnyHandle, BoxError> + Send + Sync>;

/// Composable configuration for one binding.
///
/// Options are produced by [`singleton`] (or [`singleton_arc`]),
/// [`constructor`] and [`implements`]
/// and consumed by [`Injector::bind`](crate::Injector::bind). Each option
/// mutates the provider under construction; validation runs once after all
/// options have been applied, and a failed validation inserts nothing.
pub struct BindOption {
    pub(crate) apply: Box<dyn FnOnce(&mut ProviderSpec)>,
}

/// Binds a fixed singleton instance.
///
/// Every resolution of the binding returns a handle to this exact instance,
/// never a copy. To bind an `Arc` the caller already holds, use
/// [`singleton_arc`].
///
/// # Examples
///
/// ```rust
/// use nominal_di::{singleton, Injector};
/// use std::sync::Arc;
///
/// struct Config { port: u16 }
///
/// # fn main() -> nominal_di::DiResult<()> {
/// let mut di = Injector::new();
/// di.bind("config", [singleton(Config { port: 8080 })])?;
///
/// let a: Arc<Config> = di.resolve("config")?;
/// let b: Arc<Config> = di.resolve("config")?;
/// assert!(Arc::ptr_eq(&a, &b));
/// # Ok(()) }
/// ```
pub fn singleton<T: Any + Send + Sync>(instance: T) -> BindOption {
    singleton_arc(Arc::new(instance))
}

/// Binds an already-shared `Arc` as a fixed singleton instance.
///
/// Resolutions return handles to the very allocation passed in, so the
/// container and outside holders of the `Arc` observe the same object.
///
/// # Examples
///
/// ```rust
/// use nominal_di::{singleton_arc, Injector};
/// use std::sync::Arc;
///
/// struct Config { port: u16 }
///
/// # fn main() -> nominal_di::DiResult<()> {
/// let shared = Arc::new(Config { port: 8080 });
///
/// let mut di = Injector::new();
/// di.bind("config", [singleton_arc(shared.clone())])?;
///
/// let resolved: Arc<Config> = di.resolve("config")?;
/// assert!(Arc::ptr_eq(&resolved, &shared));
/// # Ok(()) }
/// ```
pub fn singleton_arc<T: Any + Send + Sync>(instance: Arc<T>) -> BindOption {
    let handle: AnyHandle = instance;
    BindOption {
        apply: Box::new(move |spec| {
            spec.singleton = Some(handle);
            spec.singleton_type = Some(TypeInfo::of::<T>());
            for caster in handle_casters::<T>() {
                spec.add_caster(caster);
            }
        }),
    }
}

/// Binds a zero-argument fallible factory.
///
/// The factory runs on every resolution of the binding; its output is never
/// cached by the container. A returned error aborts the resolution as
/// [`DiError::FactoryFailure`].
///
/// # Examples
///
/// ```rust
/// use nominal_di::{constructor, Injector};
/// use std::sync::Arc;
///
/// struct Session { id: u64 }
///
/// # fn main() -> nominal_di::DiResult<()> {
/// let mut di = Injector::new();
/// di.bind("session", [constructor::<Session, _>(|| Ok(Arc::new(Session { id: 1 })))])?;
///
/// let a: Arc<Session> = di.resolve("session")?;
/// let b: Arc<Session> = di.resolve("session")?;
/// assert!(!Arc::ptr_eq(&a, &b)); // Fresh instance per call
/// # Ok(()) }
/// ```
pub fn constructor<T, F>(factory: F) -> BindOption
where
    T: Any + Send + Sync,
    F: Fn() -> Result<Arc<T>, BoxError> + Send + Sync + 'static,
{
    BindOption {
        apply: Box::new(move |spec| {
            spec.factory = Some(Box::new(move || {
                factory().map(|arc| {
                    let handle: AnyHandle = arc;
                    handle
                })
            }));
            spec.factory_type = Some(TypeInfo::of::<T>());
            for caster in handle_casters::<T>() {
                spec.add_caster(caster);
            }
        }),
    }
}

/// Declares that the binding satisfies a trait object type.
///
/// The coercion function is written `|t| t` at the call site; the compiler
/// proving that coercion is what stands in for a runtime implements-check.
/// Without this declaration, resolving the binding into
/// `Arc<dyn Trait>` fails with [`DiError::TypeMismatch`] even if the impl
/// exists.
///
/// # Examples
///
/// ```rust
/// use nominal_di::{singleton, implements, Injector};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".to_string()
///     }
/// }
///
/// # fn main() -> nominal_di::DiResult<()> {
/// let mut di = Injector::new();
/// di.bind("english", [singleton(English), implements::<English, dyn Greeter>(|g| g)])?;
///
/// let greeter: Arc<dyn Greeter> = di.resolve("english")?;
/// assert_eq!(greeter.greet(), "hello");
/// # Ok(()) }
/// ```
pub fn implements<T, U>(cast: fn(Arc<T>) -> Arc<U>) -> BindOption
where
    T: Any + Send + Sync,
    U: ?Sized + 'static,
{
    BindOption {
        apply: Box::new(move |spec| {
            for caster in trait_casters::<T, U>(cast) {
                spec.add_caster(caster);
            }
            spec.trait_names.push(std::any::type_name::<U>());
        }),
    }
}

/// One named binding: lifecycle, derived concrete type, and the caster table
/// describing every destination shape the binding can fill.
pub(crate) struct ProviderSpec {
    name: String,
    singleton: Option<AnyHandle>,
    singleton_type: Option<TypeInfo>,
    factory: Option<FactoryFn>,
    factory_type: Option<TypeInfo>,
    concrete: Option<TypeInfo>,
    casters: HashMap<TypeId, Caster>,
    trait_names: Vec<&'static str>,
}

impl ProviderSpec {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            singleton: None,
            singleton_type: None,
            factory: None,
            factory_type: None,
            concrete: None,
            casters: HashMap::new(),
            trait_names: Vec::new(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    fn add_caster(&mut self, caster: Caster) {
        self.casters.insert(caster.target.id, caster);
    }

    pub(crate) fn caster(&self, target: &TypeId) -> Option<&Caster> {
        self.casters.get(target)
    }

    pub(crate) fn lifecycle(&self) -> Lifecycle {
        if self.singleton.is_some() {
            Lifecycle::Singleton
        } else {
            Lifecycle::Factory
        }
    }

    fn concrete_name(&self) -> &'static str {
        self.concrete.map(|info| info.name).unwrap_or("<unbound>")
    }

    pub(crate) fn mismatch(&self, requested: &'static str) -> DiError {
        DiError::TypeMismatch {
            name: self.name.clone(),
            bound: self.concrete_name(),
            requested,
        }
    }

    /// Bind-time validation.
    ///
    /// Derives the concrete type (factory first, then singleton), fails with
    /// `MissingLifecycle` when neither is configured, and rejects any caster
    /// whose source type disagrees with the derived concrete type. The latter
    /// catches an `implements` for a foreign type, and a singleton and
    /// constructor of different types in the same bind.
    pub(crate) fn check_options(&mut self) -> DiResult<()> {
        let concrete = match (self.factory_type, self.singleton_type) {
            (Some(info), _) => info,
            (None, Some(info)) => info,
            (None, None) => return Err(DiError::MissingLifecycle(self.name.clone())),
        };
        for caster in self.casters.values() {
            if caster.source.id != concrete.id {
                return Err(DiError::TypeMismatch {
                    name: self.name.clone(),
                    bound: concrete.name,
                    requested: caster.target.name,
                });
            }
        }
        self.concrete = Some(concrete);
        Ok(())
    }

    /// Unified creation step behind both lifecycles.
    ///
    /// A stored singleton is returned as-is (idempotent); otherwise the
    /// factory is invoked, with its error mapped to `FactoryFailure`. The
    /// `MissingLifecycle` arm is unreachable after a validated bind.
    pub(crate) fn create(&self) -> DiResult<AnyHandle> {
        if let Some(instance) = &self.singleton {
            return Ok(Arc::clone(instance));
        }
        match &self.factory {
            Some(factory) => factory().map_err(|err| DiError::FactoryFailure {
                name: self.name.clone(),
                message: err.to_string(),
            }),
            None => Err(DiError::MissingLifecycle(self.name.clone())),
        }
    }

    pub(crate) fn describe(&self) -> BindingDescriptor {
        BindingDescriptor {
            name: self.name.clone(),
            lifecycle: self.lifecycle(),
            concrete_type: self.concrete_name(),
            traits: self.trait_names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Engine {
        rpm: u32,
    }

    struct Wheel;

    trait Spins: Send + Sync {}
    impl Spins for Engine {}

    fn build(name: &str, options: Vec<BindOption>) -> ProviderSpec {
        let mut spec = ProviderSpec::new(name.to_string());
        for option in options {
            (option.apply)(&mut spec);
        }
        spec
    }

    #[test]
    fn no_lifecycle_fails_validation() {
        let mut spec = build("empty", vec![]);
        match spec.check_options() {
            Err(DiError::MissingLifecycle(name)) => assert_eq!(name, "empty"),
            other => panic!("expected MissingLifecycle, got {:?}", other.err()),
        }
    }

    #[test]
    fn implements_only_fails_validation() {
        let mut spec = build(
            "dangling",
            vec![implements::<Engine, dyn Spins>(|e| e)],
        );
        assert!(matches!(
            spec.check_options(),
            Err(DiError::MissingLifecycle(_))
        ));
    }

    #[test]
    fn singleton_creation_is_idempotent() {
        let mut spec = build("engine", vec![singleton(Engine { rpm: 900 })]);
        spec.check_options().unwrap();

        let first = spec.create().unwrap();
        let second = spec.create().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn foreign_implements_fails_validation() {
        let mut spec = build(
            "wheel",
            vec![singleton(Wheel), implements::<Engine, dyn Spins>(|e| e)],
        );
        assert!(matches!(
            spec.check_options(),
            Err(DiError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn factory_decides_concrete_type_when_both_configured() {
        let mut spec = build(
            "both",
            vec![
                singleton(Engine { rpm: 100 }),
                constructor::<Engine, _>(|| Ok(Arc::new(Engine { rpm: 200 }))),
            ],
        );
        spec.check_options().unwrap();

        // Creation still prefers the stored singleton.
        assert_eq!(spec.lifecycle(), Lifecycle::Singleton);
        let handle = spec.create().unwrap();
        let engine = handle.downcast::<Engine>().unwrap();
        assert_eq!(engine.rpm, 100);
    }

    #[test]
    fn factory_error_is_wrapped() {
        let mut spec = build(
            "broken",
            vec![constructor::<Engine, _>(|| Err("ignition failure".into()))],
        );
        spec.check_options().unwrap();

        match spec.create() {
            Err(DiError::FactoryFailure { name, message }) => {
                assert_eq!(name, "broken");
                assert_eq!(message, "ignition failure");
            }
            other => panic!("expected FactoryFailure, got {:?}", other.err()),
        }
    }
}
