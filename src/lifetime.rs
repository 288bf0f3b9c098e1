//! Service lifetime definitions.

use std::fmt;

/// Service lifetimes controlling instance caching behavior
///
/// Every identifier is registered under exactly one lifetime. The lifetime
/// decides which store holds the spec and whether resolved objects are
/// memoized.
///
/// # Examples
///
/// ```rust
/// use autowire::{Container, Lifetime, ServiceSpec, TransientSpec, TypeCatalog, Value};
/// use std::sync::Arc;
///
/// struct Clock;
///
/// let mut container = Container::new(TypeCatalog::new());
/// container.register_shared("clock", ServiceSpec::instance(Clock)).unwrap();
/// container
///     .register_transient("tick", TransientSpec::factory(|| Value::object(Clock)))
///     .unwrap();
///
/// assert_eq!(container.lifetime_of("clock"), Some(Lifetime::Shared));
/// assert_eq!(container.lifetime_of("tick"), Some(Lifetime::Transient));
///
/// let a = container.resolve("clock").unwrap();
/// let b = container.resolve("clock").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// New instance per resolution, never cached
    Transient,
    /// Single instance for the container's lifetime
    ///
    /// Created on first resolution and kept until the identifier is
    /// deregistered.
    Shared,
    /// Single instance until the scope is flushed
    ///
    /// Behaves like `Shared`, but the cached object can be dropped with
    /// `flush_scoped_instance` without touching the registration, which
    /// models per-request state in a long-running process.
    Scoped,
}

impl Lifetime {
    /// Lower-case name used in logs and descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Transient => "transient",
            Lifetime::Shared => "shared",
            Lifetime::Scoped => "scoped",
        }
    }

    /// Whether resolved objects are memoized for this lifetime.
    pub fn is_cached(&self) -> bool {
        !matches!(self, Lifetime::Transient)
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
