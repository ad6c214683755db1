//! Declarative field injection.
//!
//! Rust has no struct-tag reflection, so annotation-driven injection becomes
//! a compile-time plan: a struct opts in by
//! implementing [`Injectable`], and the [`injectable!`] macro generates that
//! impl from per-field `inject:"<name>"` tags. Field visibility and shape
//! rules are enforced by the compiler at the expansion site.

use crate::error::DiResult;
use crate::injector::Injector;

/// A struct whose fields can be populated from the container.
///
/// Usually generated by [`injectable!`]; implement by hand when a field needs
/// something other than a straight by-name resolution.
///
/// # Examples
///
/// ```rust
/// use nominal_di::{singleton, DiResult, Injectable, Injector};
/// use std::sync::Arc;
///
/// struct Config { port: u16 }
///
/// #[derive(Default)]
/// struct App {
///     config: Option<Arc<Config>>,
/// }
///
/// impl Injectable for App {
///     fn resolve_fields(&mut self, injector: &Injector) -> DiResult<()> {
///         injector.create("config", &mut self.config)?;
///         Ok(())
///     }
/// }
///
/// # fn main() -> nominal_di::DiResult<()> {
/// let mut di = Injector::new();
/// di.bind("config", [singleton(Config { port: 8080 })])?;
///
/// let mut app = App::default();
/// di.inject(&mut app)?;
/// assert_eq!(app.config.unwrap().port, 8080);
/// # Ok(()) }
/// ```
pub trait Injectable {
    /// Resolves and assigns every declared field, in declaration order.
    ///
    /// A failure aborts immediately; fields assigned before the failure stay
    /// assigned.
    fn resolve_fields(&mut self, injector: &Injector) -> DiResult<()>;
}

/// Generates an [`Injectable`] impl from per-field `inject:"<name>"` tags.
///
/// Each listed field is resolved under its tagged binding name, in the order
/// written. Fields may be `Arc<T>`, `Arc<dyn Trait>`, or `Option` of either;
/// trait-typed fields require the binding to declare
/// [`implements`](crate::implements) for that trait.
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
/// # Ok(()) }
/// ```
#[macro_export]
macro_rules! injectable {
    ($target:ty { $($field:ident : inject : $binding:literal),* $(,)? }) => {
        impl $crate::Injectable for $target {
            fn resolve_fields(&mut self, injector: &$crate::Injector) -> $crate::DiResult<()> {
                $(injector.create($binding, &mut self.$field)?;)*
                Ok(())
            }
        }
    };
}
