//! The registry and resolver.
//!
//! [`Container`] owns the five registration stores and the resolution
//! engine. It takes `&mut self` for every operation that may populate a
//! cache, so a single owner drives each call chain; [`SharedContainer`]
//! puts one coarse lock around it for multi-threaded hosts.

use std::fmt;
use std::sync::Arc;

use crate::config::ContainerOptions;
use crate::descriptors::ServiceDescriptor;
use crate::error::{DiError, DiResult};
use crate::internal::ResolutionStack;
use crate::introspection::TypeIntrospector;
use crate::lifetime::Lifetime;
use crate::observer::{DiObserver, Observers};
use crate::registration::{Registry, ServiceSpec, TransientSpec};

mod resolve;
mod shared;

pub use shared::SharedContainer;

/// Object-composition registry with constructor auto-wiring.
///
/// Identifiers are registered under exactly one of three lifetimes:
///
/// - **Transient**: a fresh object on every [`resolve`](Container::resolve)
/// - **Shared**: built once, then the same object until deregistered
/// - **Scoped**: like shared, but [`flush_scoped_instance`](Container::flush_scoped_instance)
///   drops the cached object while keeping the registration
///
/// # Examples
///
/// ```
/// use autowire::{Container, DeclaredType, ServiceSpec, TypeCatalog};
/// use std::sync::Arc;
///
/// struct Connection;
/// struct Repository {
///     connection: Arc<Connection>,
/// }
///
/// let mut types = TypeCatalog::new();
/// types.class("Connection").build(|_| Ok(Connection));
/// types
///     .class("Repository")
///     .param("connection", DeclaredType::named("Connection"))
///     .build(|args| Ok(Repository { connection: args.get(0)? }));
///
/// let mut container = Container::new(types);
/// container.register_shared("Connection", ServiceSpec::class("Connection")).unwrap();
///
/// let a = container.resolve_as::<Repository>("Repository");
/// assert!(a.is_err()); // not registered
///
/// let first = container.make("Repository").unwrap().downcast::<Repository>().unwrap();
/// let second = container.make("Repository").unwrap().downcast::<Repository>().unwrap();
/// assert!(!Arc::ptr_eq(&first, &second));
/// assert!(Arc::ptr_eq(&first.connection, &second.connection));
/// ```
pub struct Container {
    introspector: Arc<dyn TypeIntrospector>,
    registry: Registry,
    stack: ResolutionStack,
    observers: Observers,
    options: ContainerOptions,
}

impl Container {
    /// Creates an empty container backed by `introspector`.
    pub fn new(introspector: impl TypeIntrospector + 'static) -> Self {
        Self::with_options(introspector, ContainerOptions::default())
    }

    pub fn with_options(introspector: impl TypeIntrospector + 'static, options: ContainerOptions) -> Self {
        Self::from_introspector(Arc::new(introspector), options)
    }

    /// Creates a container around an introspector shared with other containers.
    pub fn from_introspector(introspector: Arc<dyn TypeIntrospector>, options: ContainerOptions) -> Self {
        Self {
            introspector,
            registry: Registry::new(),
            stack: ResolutionStack::default(),
            observers: Observers::new(),
            options,
        }
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    pub fn introspector(&self) -> &Arc<dyn TypeIntrospector> {
        &self.introspector
    }

    /// Attaches an observer; it sees every event from now on.
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.add(observer);
    }

    fn ensure_vacant(&self, id: &str) -> DiResult<()> {
        if self.registry.contains(id) {
            return Err(DiError::AlreadyRegistered(id.to_string()));
        }
        Ok(())
    }

    /// Registers `id` to produce a fresh object on every resolution.
    ///
    /// Class references are checked eagerly: the named type must exist and
    /// be constructible, otherwise `InvalidReference` is returned.
    pub fn register_transient(&mut self, id: impl Into<String>, spec: TransientSpec) -> DiResult<()> {
        let id = id.into();
        self.ensure_vacant(&id)?;

        if let TransientSpec::ClassReference(class) = &spec {
            if !self.introspector.type_exists(class) || self.introspector.is_abstract_or_interface(class) {
                return Err(DiError::InvalidReference {
                    id,
                    class: class.clone(),
                });
            }
        }

        self.registry.transient_specs.insert(id.clone(), spec);
        self.observers.registered(&id, Lifetime::Transient);
        Ok(())
    }

    /// Registers `id` to produce one object for the container's lifetime.
    ///
    /// Class references are not checked until the first resolution.
    pub fn register_shared(&mut self, id: impl Into<String>, spec: ServiceSpec) -> DiResult<()> {
        let id = id.into();
        self.ensure_vacant(&id)?;
        self.registry.shared_specs.insert(id.clone(), spec);
        self.observers.registered(&id, Lifetime::Shared);
        Ok(())
    }

    /// Registers `id` to produce one object per scope.
    ///
    /// Same contract as [`register_shared`](Self::register_shared).
    pub fn register_scoped(&mut self, id: impl Into<String>, spec: ServiceSpec) -> DiResult<()> {
        let id = id.into();
        self.ensure_vacant(&id)?;
        self.registry.scoped_specs.insert(id.clone(), spec);
        self.observers.registered(&id, Lifetime::Scoped);
        Ok(())
    }

    /// Removes `id` from whichever store holds it, with its cached object.
    ///
    /// Unknown identifiers are ignored. Returns whether anything was removed.
    pub fn deregister(&mut self, id: &str) -> bool {
        match self.registry.remove(id) {
            Some(lifetime) => {
                self.observers.deregistered(id, lifetime);
                true
            }
            None => false,
        }
    }

    /// Drops the cached object of a scoped registration.
    ///
    /// The registration stays; the next resolution rebuilds the object (or
    /// re-invokes the factory, or hands out the same pre-built instance).
    /// Returns whether a cached object was dropped.
    pub fn flush_scoped_instance(&mut self, id: &str) -> bool {
        let flushed = self.registry.scoped_cache.remove(id).is_some();
        if flushed {
            self.observers.scope_flushed(id);
        }
        flushed
    }

    /// Drops every cached scoped object, as at the end of a request.
    ///
    /// Returns how many objects were dropped.
    pub fn flush_scoped_instances(&mut self) -> usize {
        let flushed: Vec<String> = self.registry.scoped_cache.drain().map(|(id, _)| id).collect();
        for id in &flushed {
            self.observers.scope_flushed(id);
        }
        flushed.len()
    }

    /// Whether `id` is registered under any lifetime.
    pub fn has(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    pub fn lifetime_of(&self, id: &str) -> Option<Lifetime> {
        self.registry.lifetime_of(id)
    }

    /// All registered identifiers, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.registry.ids()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Describes every registration, sorted by identifier.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        self.registry
            .ids()
            .into_iter()
            .filter_map(|id| {
                let lifetime = self.registry.lifetime_of(&id)?;
                let spec = self.registry.spec(&id)?;
                let cached = self
                    .registry
                    .cache(lifetime)
                    .is_some_and(|cache| cache.contains_key(&id));
                Some(ServiceDescriptor {
                    lifetime,
                    kind: spec.kind(),
                    class_name: spec.class_name().map(str::to_string),
                    cached,
                    id,
                })
            })
            .collect()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("transient", &self.registry.transient_specs.len())
            .field("shared", &self.registry.shared_specs.len())
            .field("scoped", &self.registry.scoped_specs.len())
            .field("observers", &self.observers.len())
            .field("options", &self.options)
            .finish()
    }
}
