//! Diagnostic observers for bind and resolution events.
//!
//! Diagnostics are dependency-injected rather than ambient: observers are
//! handed to the container at construction (or via
//! [`Injector::add_observer`](crate::Injector::add_observer)) instead of a
//! global debug flag. With no observers registered the hooks cost nothing
//! beyond an empty-vec check.

use std::sync::Arc;
use std::time::Duration;

use crate::descriptors::BindingDescriptor;
use crate::error::DiError;

/// Observer trait for container events.
///
/// Implementations receive bind and resolution events synchronously; keep
/// them lightweight. The built-in [`LoggingObserver`] prints human-readable
/// trace lines and is the development default.
///
/// # Examples
///
/// ```rust
/// use nominal_di::{singleton, BindingDescriptor, DiObserver, Injector};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     events: Mutex<Vec<String>>,
/// }
///
/// impl DiObserver for Recorder {
///     fn resolving(&self, name: &str) {
///         self.events.lock().unwrap().push(format!("resolving {}", name));
///     }
///
///     fn resolved(&self, name: &str, _duration: Duration) {
///         self.events.lock().unwrap().push(format!("resolved {}", name));
///     }
/// }
///
/// # fn main() -> nominal_di::DiResult<()> {
/// struct Config { port: u16 }
///
/// let recorder = Arc::new(Recorder::default());
/// let mut di = Injector::with_observer(recorder.clone());
/// di.bind("config", [singleton(Config { port: 8080 })])?;
/// let _config: Arc<Config> = di.resolve("config")?;
///
/// let events = recorder.events.lock().unwrap();
/// assert_eq!(*events, vec!["resolving config", "resolved config"]);
/// # Ok(()) }
/// ```
pub trait DiObserver: Send + Sync {
    /// Called after a binding is validated and inserted.
    fn bound(&self, descriptor: &BindingDescriptor) {
        let _ = descriptor;
    }

    /// Called when resolution of a binding starts.
    fn resolving(&self, name: &str);

    /// Called when a binding resolves successfully.
    ///
    /// `duration` covers provider creation plus destination conversion.
    fn resolved(&self, name: &str, duration: Duration);

    /// Called when resolution fails; the error still propagates afterwards.
    fn resolution_failed(&self, name: &str, error: &DiError) {
        let _ = (name, error);
    }
}

/// Container for registered observers.
#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn bound(&self, descriptor: &BindingDescriptor) {
        for observer in &self.observers {
            observer.bound(descriptor);
        }
    }

    #[inline]
    pub(crate) fn resolving(&self, name: &str) {
        for observer in &self.observers {
            observer.resolving(name);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, name: &str, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(name, duration);
        }
    }

    #[inline]
    pub(crate) fn resolution_failed(&self, name: &str, error: &DiError) {
        for observer in &self.observers {
            observer.resolution_failed(name, error);
        }
    }
}

/// Built-in observer that logs events to stdout/stderr.
///
/// A simple implementation useful for development and debugging. For
/// production use, implement a custom [`DiObserver`] that integrates with
/// your logging infrastructure.
///
/// # Examples
///
/// ```rust
/// use nominal_di::{Injector, LoggingObserver};
/// use std::sync::Arc;
///
/// let mut di = Injector::with_observer(Arc::new(LoggingObserver::new()));
/// di.add_observer(Arc::new(LoggingObserver::with_prefix("[app]")));
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with the default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[nominal-di]".to_string(),
        }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn bound(&self, descriptor: &BindingDescriptor) {
        println!(
            "{} Bound: {} -> {} ({:?})",
            self.prefix, descriptor.name, descriptor.concrete_type, descriptor.lifecycle
        );
    }

    fn resolving(&self, name: &str) {
        println!("{} Resolving: {}", self.prefix, name);
    }

    fn resolved(&self, name: &str, duration: Duration) {
        println!("{} Resolved: {} in {:?}", self.prefix, name, duration);
    }

    fn resolution_failed(&self, name: &str, error: &DiError) {
        eprintln!("{} Resolution failed: {}: {}", self.prefix, name, error);
    }
}
