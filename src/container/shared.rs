//! Coarse-grained locking wrapper for multi-threaded hosts.

use std::any::Any;
use std::sync::Arc;

use super::Container;
use crate::error::DiResult;
use crate::registration::{ServiceSpec, TransientSpec};
use crate::value::Object;

#[cfg(feature = "parking-lot")]
type Lock<T> = parking_lot::Mutex<T>;
#[cfg(feature = "parking-lot")]
type Guard<'a, T> = parking_lot::MutexGuard<'a, T>;

#[cfg(not(feature = "parking-lot"))]
type Lock<T> = std::sync::Mutex<T>;
#[cfg(not(feature = "parking-lot"))]
type Guard<'a, T> = std::sync::MutexGuard<'a, T>;

/// A [`Container`] behind one mutex, cloneable across threads.
///
/// Every call takes the lock once and holds it for the whole resolution
/// chain, so nested resolutions never contend with themselves. Clones share
/// the same container.
///
/// # Examples
///
/// ```
/// use autowire::{Container, ServiceSpec, SharedContainer, TypeCatalog};
/// use std::sync::Arc;
///
/// let shared = SharedContainer::new(Container::new(TypeCatalog::new()));
/// shared.register_shared("greeting", ServiceSpec::instance("hi")).unwrap();
///
/// let worker = shared.clone();
/// let from_thread = std::thread::spawn(move || worker.resolve("greeting").unwrap())
///     .join()
///     .unwrap();
/// assert!(Arc::ptr_eq(&from_thread, &shared.resolve("greeting").unwrap()));
/// ```
#[derive(Clone)]
pub struct SharedContainer {
    inner: Arc<Lock<Container>>,
}

impl SharedContainer {
    pub fn new(container: Container) -> Self {
        Self {
            inner: Arc::new(Lock::new(container)),
        }
    }

    #[cfg(feature = "parking-lot")]
    fn lock(&self) -> Guard<'_, Container> {
        self.inner.lock()
    }

    #[cfg(not(feature = "parking-lot"))]
    fn lock(&self) -> Guard<'_, Container> {
        // A panicking factory poisons the lock without corrupting the
        // registry: caches are only written after a successful build and
        // resolution frames are popped while unwinding.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access, for multi-step operations.
    pub fn with<R>(&self, f: impl FnOnce(&mut Container) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn register_transient(&self, id: impl Into<String>, spec: TransientSpec) -> DiResult<()> {
        self.lock().register_transient(id, spec)
    }

    pub fn register_shared(&self, id: impl Into<String>, spec: ServiceSpec) -> DiResult<()> {
        self.lock().register_shared(id, spec)
    }

    pub fn register_scoped(&self, id: impl Into<String>, spec: ServiceSpec) -> DiResult<()> {
        self.lock().register_scoped(id, spec)
    }

    pub fn deregister(&self, id: &str) -> bool {
        self.lock().deregister(id)
    }

    pub fn flush_scoped_instance(&self, id: &str) -> bool {
        self.lock().flush_scoped_instance(id)
    }

    pub fn flush_scoped_instances(&self) -> usize {
        self.lock().flush_scoped_instances()
    }

    pub fn has(&self, id: &str) -> bool {
        self.lock().has(id)
    }

    pub fn resolve(&self, id: &str) -> DiResult<Object> {
        self.lock().resolve(id)
    }

    pub fn resolve_as<T: Any + Send + Sync>(&self, id: &str) -> DiResult<Arc<T>> {
        self.lock().resolve_as::<T>(id)
    }

    pub fn make(&self, type_name: &str) -> DiResult<Object> {
        self.lock().make(type_name)
    }

    /// Unwraps the container if this is the last handle.
    pub fn try_into_inner(self) -> Result<Container, Self> {
        match Arc::try_unwrap(self.inner) {
            #[cfg(feature = "parking-lot")]
            Ok(lock) => Ok(lock.into_inner()),
            #[cfg(not(feature = "parking-lot"))]
            Ok(lock) => Ok(lock.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner)),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl From<Container> for SharedContainer {
    fn from(container: Container) -> Self {
        Self::new(container)
    }
}
