//! Resolution engine: lifetime dispatch and constructor auto-wiring.

use std::any::{type_name, Any};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Instant;

use super::Container;
use crate::error::{DiError, DiResult, UnsupportedReason};
use crate::internal::Frame;
use crate::introspection::{Argument, DeclaredType, ParameterInfo, TypeIntrospector};
use crate::lifetime::Lifetime;
use crate::registration::ServiceSpec;
use crate::value::Object;

impl Container {
    /// Resolves a registered identifier to an object.
    ///
    /// Shared and scoped registrations are built on first use and cached;
    /// transient registrations are built on every call. Any failure aborts
    /// the whole dependency chain and leaves the caches untouched.
    pub fn resolve(&mut self, id: &str) -> DiResult<Object> {
        let Some(lifetime) = self.registry.lifetime_of(id) else {
            let error = DiError::NotFound(id.to_string());
            self.observers.failed(id, &error);
            return Err(error);
        };

        if !self.observers.has_observers() {
            return self.resolve_registered(id, lifetime).map(|(object, _)| object);
        }

        let start = Instant::now();
        self.observers.resolving(id, lifetime);
        match self.resolve_registered(id, lifetime) {
            Ok((object, cached)) => {
                self.observers.resolved(id, lifetime, start.elapsed(), cached);
                Ok(object)
            }
            Err(error) => {
                self.observers.failed(id, &error);
                Err(error)
            }
        }
    }

    /// Resolves `id` and downcasts the object to `T`.
    pub fn resolve_as<T: Any + Send + Sync>(&mut self, id: &str) -> DiResult<Arc<T>> {
        self.resolve(id)?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Builds `type_name` by auto-wiring its constructor parameters.
    ///
    /// The type itself does not need to be registered. Its dependencies are
    /// taken from the registry when registered (honoring their lifetimes),
    /// and otherwise built recursively as fresh objects.
    pub fn make(&mut self, type_name: &str) -> DiResult<Object> {
        let mut entered = self.enter(Frame::Type(type_name.to_string()))?;
        entered.build(type_name)
    }

    /// Pushes `frame` for as long as the returned guard lives.
    fn enter(&mut self, frame: Frame) -> DiResult<Entered<'_>> {
        self.stack
            .enter(frame, self.options.max_depth, self.options.detect_cycles)?;
        Ok(Entered { container: self })
    }

    /// Returns the object and whether it came from a cache.
    fn resolve_registered(&mut self, id: &str, lifetime: Lifetime) -> DiResult<(Object, bool)> {
        if let Some(cached) = self.registry.cached(id, lifetime) {
            return Ok((cached, true));
        }

        let spec = self
            .registry
            .spec(id)
            .ok_or_else(|| DiError::NotFound(id.to_string()))?;

        let object = {
            let mut entered = self.enter(Frame::Service(id.to_string()))?;
            entered.resolve_spec(&spec).map_err(|error| error.within(id))?
        };

        if let Some(cache) = self.registry.cache_mut(lifetime) {
            cache.insert(id.to_string(), object.clone());
        }
        Ok((object, false))
    }

    fn resolve_spec(&mut self, spec: &ServiceSpec) -> DiResult<Object> {
        match spec {
            ServiceSpec::ClassReference(class) => self.make(class),
            ServiceSpec::Instance(object) => Ok(object.clone()),
            ServiceSpec::Factory(factory) => {
                factory()
                    .into_object()
                    .map_err(|value| DiError::InvalidClosureReturn {
                        returned: value.kind(),
                        path: Vec::new(),
                    })
            }
        }
    }

    fn build(&mut self, type_name: &str) -> DiResult<Object> {
        let introspector = Arc::clone(&self.introspector);

        if introspector.is_abstract_or_interface(type_name) {
            return Err(DiError::NotInstantiable(type_name.to_string()));
        }

        let params = introspector
            .constructor_parameters(type_name)
            .ok_or_else(|| DiError::NotFound(type_name.to_string()))?;

        if params.is_empty() {
            return introspector.construct(type_name, Vec::new());
        }

        let mut args = Vec::with_capacity(params.len());
        for param in &params {
            args.push(self.argument_for(type_name, param, introspector.as_ref())?);
        }
        introspector.construct(type_name, args)
    }

    fn argument_for(
        &mut self,
        type_name: &str,
        param: &ParameterInfo,
        introspector: &dyn TypeIntrospector,
    ) -> DiResult<Argument> {
        let reason = match &param.declared_type {
            DeclaredType::Named(dependency) => {
                return self.named_argument(type_name, param, dependency, introspector)
            }
            DeclaredType::Builtin(builtin) => UnsupportedReason::Builtin(builtin.clone()),
            DeclaredType::Union(_) => UnsupportedReason::Union,
            DeclaredType::Intersection(_) => UnsupportedReason::Intersection,
            DeclaredType::Untyped => UnsupportedReason::Untyped,
        };

        if param.has_default {
            tracing::trace!(target: "autowire", type_name, parameter = %param.name, "leaving parameter to its default");
            return Ok(Argument::Default);
        }

        Err(DiError::UnsupportedParameters {
            type_name: type_name.to_string(),
            parameter: param.name.clone(),
            reason,
        })
    }

    fn named_argument(
        &mut self,
        type_name: &str,
        param: &ParameterInfo,
        dependency: &str,
        introspector: &dyn TypeIntrospector,
    ) -> DiResult<Argument> {
        if self.registry.contains(dependency) {
            return self.resolve(dependency).map(Argument::Resolved);
        }

        if introspector.is_abstract_or_interface(dependency) {
            return Err(DiError::UnsupportedParameters {
                type_name: type_name.to_string(),
                parameter: param.name.clone(),
                reason: UnsupportedReason::Abstract(dependency.to_string()),
            });
        }

        if !introspector.type_exists(dependency) {
            return Err(DiError::NotFound(dependency.to_string()));
        }

        tracing::trace!(target: "autowire", type_name, dependency, "auto-wiring unregistered dependency");
        self.make(dependency).map(Argument::Resolved)
    }
}

/// A resolution frame held on the container's stack.
///
/// The frame is popped on drop, so a factory or constructor that panics
/// leaves no stale frame behind.
struct Entered<'a> {
    container: &'a mut Container,
}

impl Deref for Entered<'_> {
    type Target = Container;

    fn deref(&self) -> &Container {
        self.container
    }
}

impl DerefMut for Entered<'_> {
    fn deref_mut(&mut self) -> &mut Container {
        self.container
    }
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        self.container.stack.exit();
    }
}
