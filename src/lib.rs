//! # nominal-di
//!
//! Name-keyed dependency injection for Rust: providers are bound under unique
//! string names, then resolved by name, by declared trait compatibility, or
//! by per-field bindings on a struct.
//!
//! ## Features
//!
//! - **Two lifecycles**: fixed singleton instances and per-call fallible
//!   factories behind one creation contract
//! - **Opt-in trait compatibility**: `implements` declarations replace
//!   runtime reflection with compiler-checked coercions
//! - **Collection resolution**: gather every compatible binding into a
//!   `Vec`, deterministically ordered by binding name
//! - **Field injection**: the `injectable!` macro maps struct fields to
//!   binding names with `inject:"<name>"` tags
//! - **Injected diagnostics**: observer objects instead of a global debug
//!   flag
//!
//! ## Quick Start
//!
//! ```rust
//! use nominal_di::{singleton, constructor, Injector};
//! use std::sync::Arc;
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct AuditLog {
//!     capacity: usize,
//! }
//!
//! # fn main() -> nominal_di::DiResult<()> {
//! let mut di = Injector::new();
//! di.bind("database", [singleton(Database {
//!     connection_string: "postgres://localhost".to_string(),
//! })])?;
//! di.bind("audit", [constructor::<AuditLog, _>(|| Ok(Arc::new(AuditLog { capacity: 64 })))])?;
//!
//! let db: Arc<Database> = di.resolve("database")?;
//! assert_eq!(db.connection_string, "postgres://localhost");
//!
//! // Singleton resolutions share one instance; factory resolutions do not.
//! let again: Arc<Database> = di.resolve("database")?;
//! assert!(Arc::ptr_eq(&db, &again));
//! # Ok(()) }
//! ```
//!
//! ## Trait Resolution
//!
//! A binding satisfies a trait only if it says so at bind time; the `|t| t`
//! coercion is what makes the compiler prove the impl:
//!
//! ```rust
//! use nominal_di::{singleton, implements, Injector};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str);
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn log(&self, message: &str) {
//!         println!("[LOG] {}", message);
//!     }
//! }
//!
//! # fn main() -> nominal_di::DiResult<()> {
//! let mut di = Injector::new();
//! di.bind("console", [
//!     singleton(ConsoleLogger),
//!     implements::<ConsoleLogger, dyn Logger>(|l| l),
//! ])?;
//!
//! let logger: Arc<dyn Logger> = di.resolve("console")?;
//! logger.log("Hello, World!");
//! # Ok(()) }
//! ```
//!
//! ## Field Injection
//!
//! ```rust
//! use nominal_di::{singleton, implements, injectable, Injector};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str);
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn log(&self, message: &str) {
//!         println!("[LOG] {}", message);
//!     }
//! }
//!
//! struct Settings {
//!     verbose: bool,
//! }
//!
//! #[derive(Default)]
//! struct App {
//!     logger: Option<Arc<dyn Logger>>,
//!     settings: Option<Arc<Settings>>,
//! }
//!
//! injectable! {
//!     App {
//!         logger: inject:"console",
//!         settings: inject:"settings",
//!     }
//! }
//!
//! # fn main() -> nominal_di::DiResult<()> {
//! let mut di = Injector::new();
//! di.bind("console", [singleton(ConsoleLogger), implements::<ConsoleLogger, dyn Logger>(|l| l)])?;
//! di.bind("settings", [singleton(Settings { verbose: true })])?;
//!
//! let mut app = App::default();
//! di.inject(&mut app)?;
//! assert!(app.settings.unwrap().verbose);
//! # Ok(()) }
//! ```
//!
//! ## Concurrency
//!
//! Binding happens through `&mut self` during startup; afterwards the
//! container is `Send + Sync` and resolution may run from many threads.
//! Singleton creation is idempotent; factories run on every call and are
//! never cached by the container.

// Module declarations
pub mod descriptors;
pub mod error;
pub mod inject;
pub mod injector;
pub mod lifecycle;
pub mod observer;
pub mod provider;

// Internal modules
mod registry;
mod shape;

// Re-export core types
pub use descriptors::BindingDescriptor;
pub use error::{BoxError, DiError, DiResult};
pub use inject::Injectable;
pub use injector::Injector;
pub use lifecycle::Lifecycle;
pub use observer::{DiObserver, LoggingObserver};
pub use provider::{constructor, implements, singleton, singleton_arc, BindOption};
