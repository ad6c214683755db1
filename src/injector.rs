//! The container: binding registration and the four retrieval modes.

use std::any::{Any, TypeId};
use std::sync::Arc;
use std::time::Instant;

use crate::descriptors::BindingDescriptor;
use crate::error::{DiError, DiResult};
use crate::inject::Injectable;
use crate::observer::{DiObserver, Observers};
use crate::provider::{BindOption, ProviderSpec};
use crate::registry::Registry;

/// Name-keyed dependency injection container.
///
/// Providers are bound under unique string names during a single-threaded
/// startup phase (`bind` takes `&mut self`), then resolved read-only: by name
/// into a typed destination, by declared compatibility into a collection, or
/// field-by-field into an [`Injectable`] struct. After binding completes the
/// container is `Send + Sync` and resolution may run concurrently from many
/// threads.
///
/// # Examples
///
/// ```rust
/// use nominal_di::{singleton, constructor, Injector};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct Audit { entries: u32 }
///
/// # fn main() -> nominal_di::DiResult<()> {
/// let mut di = Injector::new();
/// di.bind("database", [singleton(Database { url: "postgres://localhost".to_string() })])?;
/// di.bind("audit", [constructor::<Audit, _>(|| Ok(Arc::new(Audit { entries: 0 })))])?;
///
/// let db: Arc<Database> = di.resolve("database")?;
/// assert_eq!(db.url, "postgres://localhost");
/// # Ok(()) }
/// ```
pub struct Injector {
    registry: Registry,
    observers: Observers,
}

impl Injector {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            observers: Observers::new(),
        }
    }

    /// Creates an empty container with one observer already attached.
    pub fn with_observer(observer: Arc<dyn DiObserver>) -> Self {
        let mut injector = Self::new();
        injector.add_observer(observer);
        injector
    }

    /// Attaches a diagnostic observer; see [`DiObserver`].
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.add(observer);
    }

    /// Binds a named provider from a list of composable options.
    ///
    /// Exactly one lifecycle must be configured via [`singleton`](crate::singleton)
    /// or [`constructor`](crate::constructor); any number of
    /// [`implements`](crate::implements) declarations may follow. The bind is
    /// atomic: validation failure (or a duplicate name) inserts nothing and
    /// preserves any existing binding.
    ///
    /// # Errors
    ///
    /// - [`DiError::NameConflict`] if the name is already bound.
    /// - [`DiError::MissingLifecycle`] if no lifecycle option was supplied.
    /// - [`DiError::TypeMismatch`] if an `implements` declaration does not
    ///   match the lifecycle's concrete type.
    pub fn bind(
        &mut self,
        name: impl Into<String>,
        options: impl IntoIterator<Item = BindOption>,
    ) -> DiResult<()> {
        let name = name.into();
        if self.registry.contains(&name) {
            return Err(DiError::NameConflict(name));
        }
        let mut spec = ProviderSpec::new(name);
        for option in options {
            (option.apply)(&mut spec);
        }
        spec.check_options()?;
        let descriptor = self.observers.has_observers().then(|| spec.describe());
        self.registry.insert(spec)?;
        if let Some(descriptor) = descriptor {
            self.observers.bound(&descriptor);
        }
        Ok(())
    }

    /// Resolves a binding by name into a caller-supplied destination.
    ///
    /// The destination type selects the retrieval rule: `Arc<T>` requires the
    /// binding's concrete type to be exactly `T`; `Arc<dyn Trait>` requires an
    /// [`implements`](crate::implements) declaration for that trait; `Option`
    /// of either receives `Some(handle)`. The assignment copies the shared
    /// handle, not the underlying object.
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
    /// let mut by_trait: Option<Arc<dyn Greeter>> = None;
    /// di.create("english", &mut by_trait)?;
    /// assert_eq!(by_trait.unwrap().greet(), "hello");
    /// # Ok(()) }
    /// ```
    pub fn create<D: Any>(&self, name: &str, dest: &mut D) -> DiResult<()> {
        *dest = self.resolve::<D>(name)?;
        Ok(())
    }

    /// Returning form of [`create`](Self::create).
    pub fn resolve<D: Any>(&self, name: &str) -> DiResult<D> {
        let spec = self.lookup(name)?;
        self.resolve_spec::<D>(spec)
    }

    /// Resolves a binding by name into a plain value destination by cloning
    /// the provider's object.
    ///
    /// Unlike [`create`](Self::create), the destination holds the concrete
    /// type by value, so the binding's object is field-copied into it rather
    /// than shared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nominal_di::{singleton, Injector};
    ///
    /// #[derive(Clone, Default)]
    /// struct Property {
    ///     name: String,
    ///     value: String,
    /// }
    ///
    /// # fn main() -> nominal_di::DiResult<()> {
    /// let mut di = Injector::new();
    /// di.bind("p", [singleton(Property { name: "test".into(), value: "name".into() })])?;
    ///
    /// let mut dest = Property::default();
    /// di.create_cloned("p", &mut dest)?;
    /// assert_eq!(dest.name, "test");
    /// assert_eq!(dest.value, "name");
    /// # Ok(()) }
    /// ```
    pub fn create_cloned<T: Any + Send + Sync + Clone>(&self, name: &str, dest: &mut T) -> DiResult<()> {
        let spec = self.lookup(name)?;
        let value = self.observed(spec.name(), || {
            let handle = spec.create()?;
            match handle.downcast::<T>() {
                Ok(arc) => Ok((*arc).clone()),
                Err(_) => Err(spec.mismatch(std::any::type_name::<T>())),
            }
        })?;
        *dest = value;
        Ok(())
    }

    /// Resolves every compatible binding into a collection destination.
    ///
    /// Iterates all bindings in ascending name order and includes each one
    /// whose declared shapes cover the element type `D` (the same rules as
    /// [`create`](Self::create)). Any creation failure aborts the whole
    /// operation and discards partial results. One or more matches replace
    /// `dest` with a fresh vector; zero matches leave `dest` untouched, not
    /// emptied.
    ///
    /// Iteration order is deterministic by binding name; callers may rely
    /// on it.
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
    ///     fn greet(&self) -> String { "hello".to_string() }
    /// }
    ///
    /// struct French;
    /// impl Greeter for French {
    ///     fn greet(&self) -> String { "bonjour".to_string() }
    /// }
    ///
    /// # fn main() -> nominal_di::DiResult<()> {
    /// let mut di = Injector::new();
    /// di.bind("french", [singleton(French), implements::<French, dyn Greeter>(|g| g)])?;
    /// di.bind("english", [singleton(English), implements::<English, dyn Greeter>(|g| g)])?;
    ///
    /// let mut greeters: Vec<Arc<dyn Greeter>> = Vec::new();
    /// di.create_all(&mut greeters)?;
    /// let greetings: Vec<String> = greeters.iter().map(|g| g.greet()).collect();
    /// assert_eq!(greetings, ["hello", "bonjour"]); // Name order, not bind order
    /// # Ok(()) }
    /// ```
    pub fn create_all<D: Any>(&self, dest: &mut Vec<D>) -> DiResult<()> {
        let matched = self.resolve_all::<D>()?;
        if !matched.is_empty() {
            *dest = matched;
        }
        Ok(())
    }

    /// Returning form of [`create_all`](Self::create_all); an empty vector
    /// means no binding matched.
    pub fn resolve_all<D: Any>(&self) -> DiResult<Vec<D>> {
        let target = TypeId::of::<D>();
        let mut matched = Vec::new();
        for spec in self.registry.iter() {
            if spec.caster(&target).is_none() {
                continue;
            }
            matched.push(self.resolve_spec::<D>(spec)?);
        }
        Ok(matched)
    }

    /// Populates the declared fields of an [`Injectable`] struct.
    ///
    /// Fields resolve in declaration order, each delegating to
    /// [`create`](Self::create) under its declared binding name. The first
    /// failure aborts with that error; fields assigned before the failure
    /// remain assigned (documented, intentional - no rollback).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nominal_di::{singleton, implements, injectable, Injector};
    /// use std::sync::Arc;
    ///
    /// trait Greeter: Send + Sync {
    ///     fn greet(&self) -> String;
    /// }
    ///
    /// struct English;
    /// impl Greeter for English {
    ///     fn greet(&self) -> String { "hello".to_string() }
    /// }
    ///
    /// struct Config { port: u16 }
    ///
    /// #[derive(Default)]
    /// struct App {
    ///     greeter: Option<Arc<dyn Greeter>>,
    ///     config: Option<Arc<Config>>,
    /// }
    ///
    /// injectable! {
    ///     App {
    ///         greeter: inject:"english",
    ///         config: inject:"config",
    ///     }
    /// }
    ///
    /// # fn main() -> nominal_di::DiResult<()> {
    /// let mut di = Injector::new();
    /// di.bind("english", [singleton(English), implements::<English, dyn Greeter>(|g| g)])?;
    /// di.bind("config", [singleton(Config { port: 8080 })])?;
    ///
    /// let mut app = App::default();
    /// di.inject(&mut app)?;
    /// assert_eq!(app.greeter.unwrap().greet(), "hello");
    /// assert_eq!(app.config.unwrap().port, 8080);
    /// # Ok(()) }
    /// ```
    pub fn inject<T: Injectable + ?Sized>(&self, target: &mut T) -> DiResult<()> {
        target.resolve_fields(self)
    }

    /// Descriptors of all bindings, in ascending name order.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        self.registry.iter().map(|spec| spec.describe()).collect()
    }

    /// Whether a binding exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// True when no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    fn lookup(&self, name: &str) -> DiResult<&ProviderSpec> {
        match self.registry.get(name) {
            Some(spec) => Ok(spec),
            None => {
                let err = DiError::NotFound(name.to_string());
                self.observers.resolution_failed(name, &err);
                Err(err)
            }
        }
    }

    fn resolve_spec<D: Any>(&self, spec: &ProviderSpec) -> DiResult<D> {
        self.observed(spec.name(), || self.materialize::<D>(spec))
    }

    /// Creation plus destination conversion for one spec.
    fn materialize<D: Any>(&self, spec: &ProviderSpec) -> DiResult<D> {
        let requested = std::any::type_name::<D>();
        let caster = spec
            .caster(&TypeId::of::<D>())
            .ok_or_else(|| spec.mismatch(requested))?;
        let handle = spec.create()?;
        let boxed = (caster.cast)(handle).ok_or_else(|| spec.mismatch(requested))?;
        match boxed.downcast::<D>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(spec.mismatch(requested)),
        }
    }

    /// Wraps a resolution step with observer events; timing is only measured
    /// when at least one observer is registered.
    fn observed<R>(&self, name: &str, op: impl FnOnce() -> DiResult<R>) -> DiResult<R> {
        if !self.observers.has_observers() {
            return op();
        }
        self.observers.resolving(name);
        let started = Instant::now();
        match op() {
            Ok(value) => {
                self.observers.resolved(name, started.elapsed());
                Ok(value)
            }
            Err(err) => {
                self.observers.resolution_failed(name, &err);
                Err(err)
            }
        }
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}
