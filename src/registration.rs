//! Service specifications and the five-store registry.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::lifetime::Lifetime;
use crate::value::{Object, Value};

#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = HashMap<K, V>;

/// Zero-argument callable producing a value at resolution time.
pub type Factory = Arc<dyn Fn() -> Value + Send + Sync>;

/// How to produce a shared or scoped service.
///
/// # Examples
///
/// ```rust
/// use autowire::{ServiceSpec, Value};
///
/// let by_class = ServiceSpec::class("Mailer");
/// let by_factory = ServiceSpec::factory(|| Value::object(String::from("smtp")));
/// let prebuilt = ServiceSpec::instance(42u32);
///
/// assert_eq!(by_class.class_name(), Some("Mailer"));
/// assert!(by_factory.class_name().is_none());
/// assert!(matches!(prebuilt, ServiceSpec::Instance(_)));
/// ```
#[derive(Clone)]
pub enum ServiceSpec {
    /// Named constructible type, built through auto-wiring
    ClassReference(String),
    /// Zero-argument factory, invoked on each (uncached) resolution
    Factory(Factory),
    /// Pre-built object, handed out as-is
    Instance(Object),
}

impl ServiceSpec {
    pub fn class(name: impl Into<String>) -> Self {
        ServiceSpec::ClassReference(name.into())
    }

    pub fn factory<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        ServiceSpec::Factory(Arc::new(f))
    }

    /// Wraps a concrete value as a pre-built instance.
    pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
        ServiceSpec::Instance(Arc::new(value))
    }

    /// Uses an existing object as the instance, keeping its identity.
    pub fn object(object: Object) -> Self {
        ServiceSpec::Instance(object)
    }

    pub fn kind(&self) -> SpecKind {
        match self {
            ServiceSpec::ClassReference(_) => SpecKind::ClassReference,
            ServiceSpec::Factory(_) => SpecKind::Factory,
            ServiceSpec::Instance(_) => SpecKind::Instance,
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            ServiceSpec::ClassReference(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Debug for ServiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceSpec::ClassReference(name) => f.debug_tuple("ClassReference").field(name).finish(),
            ServiceSpec::Factory(_) => f.write_str("Factory(..)"),
            ServiceSpec::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

/// How to produce a transient service.
///
/// Pre-built instances cannot be transient, so this enum has no
/// `Instance` variant.
#[derive(Clone)]
pub enum TransientSpec {
    ClassReference(String),
    Factory(Factory),
}

impl TransientSpec {
    pub fn class(name: impl Into<String>) -> Self {
        TransientSpec::ClassReference(name.into())
    }

    pub fn factory<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        TransientSpec::Factory(Arc::new(f))
    }
}

impl fmt::Debug for TransientSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&ServiceSpec::from(self.clone()), f)
    }
}

impl From<TransientSpec> for ServiceSpec {
    fn from(spec: TransientSpec) -> Self {
        match spec {
            TransientSpec::ClassReference(name) => ServiceSpec::ClassReference(name),
            TransientSpec::Factory(f) => ServiceSpec::Factory(f),
        }
    }
}

/// Which variant a spec is, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    ClassReference,
    Factory,
    Instance,
}

/// Registration state: three spec stores and two lazy caches.
///
/// An identifier lives in at most one spec store. Cache entries are only
/// present for identifiers in the matching spec store.
#[derive(Default)]
pub(crate) struct Registry {
    pub(crate) transient_specs: Map<String, TransientSpec>,
    pub(crate) shared_specs: Map<String, ServiceSpec>,
    pub(crate) shared_cache: Map<String, Object>,
    pub(crate) scoped_specs: Map<String, ServiceSpec>,
    pub(crate) scoped_cache: Map<String, Object>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lifetime_of(&self, id: &str) -> Option<Lifetime> {
        if self.transient_specs.contains_key(id) {
            Some(Lifetime::Transient)
        } else if self.shared_specs.contains_key(id) {
            Some(Lifetime::Shared)
        } else if self.scoped_specs.contains_key(id) {
            Some(Lifetime::Scoped)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.lifetime_of(id).is_some()
    }

    /// Spec stored for `id` as a `ServiceSpec`, cloned out of the store.
    pub(crate) fn spec(&self, id: &str) -> Option<ServiceSpec> {
        if let Some(spec) = self.transient_specs.get(id) {
            return Some(spec.clone().into());
        }
        self.shared_specs
            .get(id)
            .or_else(|| self.scoped_specs.get(id))
            .cloned()
    }

    pub(crate) fn cache(&self, lifetime: Lifetime) -> Option<&Map<String, Object>> {
        match lifetime {
            Lifetime::Transient => None,
            Lifetime::Shared => Some(&self.shared_cache),
            Lifetime::Scoped => Some(&self.scoped_cache),
        }
    }

    pub(crate) fn cache_mut(&mut self, lifetime: Lifetime) -> Option<&mut Map<String, Object>> {
        match lifetime {
            Lifetime::Transient => None,
            Lifetime::Shared => Some(&mut self.shared_cache),
            Lifetime::Scoped => Some(&mut self.scoped_cache),
        }
    }

    pub(crate) fn cached(&self, id: &str, lifetime: Lifetime) -> Option<Object> {
        self.cache(lifetime).and_then(|cache| cache.get(id)).cloned()
    }

    /// Removes `id` and any cached object, returning the lifetime it had.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Lifetime> {
        let lifetime = self.lifetime_of(id)?;
        match lifetime {
            Lifetime::Transient => {
                self.transient_specs.remove(id);
            }
            Lifetime::Shared => {
                self.shared_specs.remove(id);
                self.shared_cache.remove(id);
            }
            Lifetime::Scoped => {
                self.scoped_specs.remove(id);
                self.scoped_cache.remove(id);
            }
        }
        Some(lifetime)
    }

    pub(crate) fn len(&self) -> usize {
        self.transient_specs.len() + self.shared_specs.len() + self.scoped_specs.len()
    }

    /// All registered identifiers, sorted.
    pub(crate) fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .transient_specs
            .keys()
            .chain(self.shared_specs.keys())
            .chain(self.scoped_specs.keys())
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_purges_cache() {
        let mut registry = Registry::new();
        registry
            .shared_specs
            .insert("db".into(), ServiceSpec::instance(1u8));
        registry
            .shared_cache
            .insert("db".into(), Arc::new(1u8) as Object);

        assert_eq!(registry.remove("db"), Some(Lifetime::Shared));
        assert!(registry.shared_cache.is_empty());
        assert_eq!(registry.remove("db"), None);
    }

    #[test]
    fn lifetime_lookup_covers_all_stores() {
        let mut registry = Registry::new();
        registry
            .transient_specs
            .insert("a".into(), TransientSpec::class("A"));
        registry.scoped_specs.insert("b".into(), ServiceSpec::class("B"));

        assert_eq!(registry.lifetime_of("a"), Some(Lifetime::Transient));
        assert_eq!(registry.lifetime_of("b"), Some(Lifetime::Scoped));
        assert_eq!(registry.lifetime_of("c"), None);
        assert_eq!(registry.ids(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(registry.len(), 2);
    }
}
