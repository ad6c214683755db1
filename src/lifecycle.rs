//! Provider lifecycle definitions.

/// Provider lifecycles controlling instance caching behavior
///
/// A binding is backed by exactly one of the two lifecycles, decided at bind
/// time and immutable afterwards.
///
/// # Caching semantics
///
/// - **Singleton**: every resolution returns the same stored instance
///   (reference-identical handle, never a copy).
/// - **Factory**: the constructor runs on every resolution. The container
///   never caches factory output; if "effectively singleton" behavior is
///   wanted, the factory itself must cache.
///
/// # Examples
///
/// ```rust
/// use nominal_di::{singleton, constructor, Injector, Lifecycle};
/// use std::sync::Arc;
///
/// struct Config { port: u16 }
/// struct Session { id: u64 }
///
/// # fn main() -> nominal_di::DiResult<()> {
/// let mut di = Injector::new();
/// di.bind("config", [singleton(Config { port: 8080 })])?;
/// di.bind("session", [constructor::<Session, _>(|| Ok(Arc::new(Session { id: 7 })))])?;
///
/// let kinds: Vec<Lifecycle> = di.descriptors().iter().map(|d| d.lifecycle).collect();
/// assert_eq!(kinds, vec![Lifecycle::Singleton, Lifecycle::Factory]);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Fixed instance stored at bind time, returned as-is on every resolution
    Singleton,
    /// Zero-argument fallible constructor, re-invoked on every resolution
    Factory,
}
