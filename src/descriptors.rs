//! Binding descriptors for introspection and diagnostics.

use crate::lifecycle::Lifecycle;

/// Binding descriptor for introspection and diagnostics
///
/// Snapshot of one registered binding: its name, lifecycle, the concrete type
/// the provider produces, and the trait object types it was declared to
/// satisfy via [`implements`](crate::implements). Useful for startup health
/// checks, debug dumps, and observer output.
///
/// # Examples
///
/// ```rust
/// use nominal_di::{singleton, implements, Injector, Lifecycle};
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
/// let descriptors = di.descriptors();
/// assert_eq!(descriptors.len(), 1);
/// assert_eq!(descriptors[0].name, "english");
/// assert_eq!(descriptors[0].lifecycle, Lifecycle::Singleton);
/// assert!(descriptors[0].declares_trait("Greeter"));
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct BindingDescriptor {
    /// Binding name (registry key)
    pub name: String,
    /// Lifecycle backing the binding
    pub lifecycle: Lifecycle,
    /// Concrete type the provider produces
    pub concrete_type: &'static str,
    /// Trait object types declared via `implements`, in declaration order
    pub traits: Vec<&'static str>,
}

impl BindingDescriptor {
    /// True for singleton-backed bindings.
    pub fn is_singleton(&self) -> bool {
        self.lifecycle == Lifecycle::Singleton
    }

    /// Checks whether the binding declared a trait whose `type_name` matches
    /// or ends with `trait_name`, so short names like `"Greeter"` work
    /// alongside fully qualified ones.
    pub fn declares_trait(&self, trait_name: &str) -> bool {
        self.traits
            .iter()
            .any(|t| *t == trait_name || t.ends_with(trait_name))
    }
}
