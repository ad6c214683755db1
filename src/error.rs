//! Error types for the dependency injection container.

use std::fmt;

/// Boxed error returned by provider constructors.
///
/// Factories registered with [`constructor`](crate::constructor) report their
/// own failures through this type; the container wraps them in
/// [`DiError::FactoryFailure`] together with the binding name.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Dependency injection errors
///
/// Represents the error conditions that can occur while binding providers or
/// resolving objects from the container. Every error is terminal for the
/// operation that raised it: nothing is swallowed or retried, and a failed
/// `bind` leaves the registry unchanged.
///
/// Shape errors of the destination (non-pointer destinations, bad collection
/// element types, malformed injection targets) cannot occur at runtime in this
/// design: destinations are `&mut D`, factories are statically typed, and
/// injection plans are generated by the [`injectable!`](crate::injectable)
/// macro, so those conditions are compile errors instead.
///
/// # Examples
///
/// ```rust
/// use nominal_di::{DiError, Injector};
/// use std::sync::Arc;
///
/// let di = Injector::new();
/// match di.resolve::<Arc<String>>("missing") {
///     Err(DiError::NotFound(name)) => assert_eq!(name, "missing"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// A binding with this name already exists; the original is preserved
    NameConflict(String),
    /// No binding registered under this name
    NotFound(String),
    /// Neither a singleton nor a constructor was configured for the binding
    MissingLifecycle(String),
    /// The provider's bound type cannot satisfy the requested destination type
    TypeMismatch {
        /// Binding name
        name: String,
        /// Concrete type the provider produces
        bound: &'static str,
        /// Destination type the caller asked for
        requested: &'static str,
    },
    /// The provider's constructor returned an error
    FactoryFailure {
        /// Binding name
        name: String,
        /// Display rendering of the constructor's error
        message: String,
    },
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NameConflict(name) => write!(f, "binding name already in use: {}", name),
            DiError::NotFound(name) => write!(f, "no binding named: {}", name),
            DiError::MissingLifecycle(name) => {
                write!(f, "binding {} has neither a singleton nor a constructor", name)
            }
            DiError::TypeMismatch { name, bound, requested } => {
                write!(f, "binding {} produces {}, which cannot satisfy {}", name, bound, requested)
            }
            DiError::FactoryFailure { name, message } => {
                write!(f, "constructor for {} failed: {}", name, message)
            }
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for DI operations
///
/// A convenience alias for `Result<T, DiError>` used throughout nominal-di.
pub type DiResult<T> = Result<T, DiError>;
