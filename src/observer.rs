//! Diagnostic observers for registry traceability.
//!
//! Observers receive a callback for every registration change and every
//! top-level or nested `resolve` call, which makes it possible to log
//! resolution chains, count cache hits, or time slow factories without
//! touching the resolution engine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::lifetime::Lifetime;

/// Observer trait for registry and resolution events.
///
/// Observer calls are made synchronously on the resolving thread. Keep
/// implementations lightweight.
///
/// # Examples
///
/// ```
/// use autowire::{Container, DiObserver, Lifetime, ServiceSpec, TypeCatalog};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder(Mutex<Vec<String>>);
///
/// impl DiObserver for Recorder {
///     fn resolving(&self, id: &str, _lifetime: Lifetime) {
///         self.0.lock().unwrap().push(format!("start {}", id));
///     }
///
///     fn resolved(&self, id: &str, _lifetime: Lifetime, _duration: Duration, cached: bool) {
///         self.0.lock().unwrap().push(format!("done {} cached={}", id, cached));
///     }
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let mut container = Container::new(TypeCatalog::new());
/// container.add_observer(recorder.clone());
/// container.register_shared("answer", ServiceSpec::instance(42u32)).unwrap();
/// container.resolve("answer").unwrap();
/// container.resolve("answer").unwrap();
///
/// assert_eq!(
///     *recorder.0.lock().unwrap(),
///     vec!["start answer", "done answer cached=false", "start answer", "done answer cached=true"]
/// );
/// ```
pub trait DiObserver: Send + Sync {
    /// Called when `resolve(id)` starts, after the identifier was found.
    fn resolving(&self, id: &str, lifetime: Lifetime);

    /// Called when `resolve(id)` succeeds.
    ///
    /// `cached` is true when the object came from the shared or scoped cache.
    fn resolved(&self, id: &str, lifetime: Lifetime, duration: Duration, cached: bool);

    /// Called when `resolve(id)` fails, including unknown identifiers.
    fn failed(&self, _id: &str, _error: &DiError) {}

    fn registered(&self, _id: &str, _lifetime: Lifetime) {}

    fn deregistered(&self, _id: &str, _lifetime: Lifetime) {}

    /// Called when a scoped instance is dropped from the cache.
    fn scope_flushed(&self, _id: &str) {}
}

/// Collection of observers attached to a container.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    /// Returns true if any observers are registered.
    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub(crate) fn resolving(&self, id: &str, lifetime: Lifetime) {
        for observer in &self.observers {
            observer.resolving(id, lifetime);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, id: &str, lifetime: Lifetime, duration: Duration, cached: bool) {
        for observer in &self.observers {
            observer.resolved(id, lifetime, duration, cached);
        }
    }

    #[inline]
    pub(crate) fn failed(&self, id: &str, error: &DiError) {
        for observer in &self.observers {
            observer.failed(id, error);
        }
    }

    pub(crate) fn registered(&self, id: &str, lifetime: Lifetime) {
        for observer in &self.observers {
            observer.registered(id, lifetime);
        }
    }

    pub(crate) fn deregistered(&self, id: &str, lifetime: Lifetime) {
        for observer in &self.observers {
            observer.deregistered(id, lifetime);
        }
    }

    pub(crate) fn scope_flushed(&self, id: &str) {
        for observer in &self.observers {
            observer.scope_flushed(id);
        }
    }
}

/// Built-in observer that forwards events to `tracing`.
///
/// Resolution events are emitted at `trace`/`debug` level, failures at
/// `warn`, all under the `autowire` target.
///
/// # Examples
///
/// ```
/// use autowire::{Container, LoggingObserver, TypeCatalog};
/// use std::sync::Arc;
///
/// let mut container = Container::new(TypeCatalog::new());
/// container.add_observer(Arc::new(LoggingObserver::new()));
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self {
            prefix: "autowire".to_string(),
        }
    }

    /// Creates a logging observer whose events carry a custom `container` field.
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
    fn resolving(&self, id: &str, lifetime: Lifetime) {
        tracing::trace!(target: "autowire", container = %self.prefix, id, %lifetime, "resolving");
    }

    fn resolved(&self, id: &str, lifetime: Lifetime, duration: Duration, cached: bool) {
        tracing::debug!(
            target: "autowire",
            container = %self.prefix,
            id,
            %lifetime,
            cached,
            elapsed_us = duration.as_micros() as u64,
            "resolved"
        );
    }

    fn failed(&self, id: &str, error: &DiError) {
        tracing::warn!(target: "autowire", container = %self.prefix, id, %error, "resolution failed");
    }

    fn registered(&self, id: &str, lifetime: Lifetime) {
        tracing::debug!(target: "autowire", container = %self.prefix, id, %lifetime, "registered");
    }

    fn deregistered(&self, id: &str, lifetime: Lifetime) {
        tracing::debug!(target: "autowire", container = %self.prefix, id, %lifetime, "deregistered");
    }

    fn scope_flushed(&self, id: &str) {
        tracing::trace!(target: "autowire", container = %self.prefix, id, "scoped instance flushed");
    }
}

/// Observer that keeps resolution counters.
///
/// # Examples
///
/// ```
/// use autowire::{Container, MetricsObserver, ServiceSpec, TypeCatalog};
/// use std::sync::Arc;
///
/// let metrics = Arc::new(MetricsObserver::new());
/// let mut container = Container::new(TypeCatalog::new());
/// container.add_observer(metrics.clone());
/// container.register_scoped("n", ServiceSpec::instance(1u8)).unwrap();
///
/// container.resolve("n").unwrap();
/// container.resolve("n").unwrap();
/// let _ = container.resolve("missing");
///
/// assert_eq!(metrics.resolution_count(), 2);
/// assert_eq!(metrics.cache_hits(), 1);
/// assert_eq!(metrics.failure_count(), 1);
/// ```
#[derive(Default)]
pub struct MetricsObserver {
    resolution_count: AtomicU64,
    cache_hits: AtomicU64,
    failure_count: AtomicU64,
    total_resolution_time: AtomicU64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful resolutions observed.
    pub fn resolution_count(&self) -> u64 {
        self.resolution_count.load(Ordering::Relaxed)
    }

    /// Successful resolutions answered from a cache.
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn total_resolution_time(&self) -> Duration {
        Duration::from_nanos(self.total_resolution_time.load(Ordering::Relaxed))
    }

    /// Gets the average resolution time.
    pub fn average_resolution_time(&self) -> Option<Duration> {
        let count = self.resolution_count();
        if count == 0 {
            return None;
        }
        let total_nanos = self.total_resolution_time.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total_nanos / count))
    }

    /// Resets all metrics.
    pub fn reset(&self) {
        self.resolution_count.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.failure_count.store(0, Ordering::Relaxed);
        self.total_resolution_time.store(0, Ordering::Relaxed);
    }
}

impl DiObserver for MetricsObserver {
    fn resolving(&self, _id: &str, _lifetime: Lifetime) {}

    fn resolved(&self, _id: &str, _lifetime: Lifetime, duration: Duration, cached: bool) {
        self.resolution_count.fetch_add(1, Ordering::Relaxed);
        if cached {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        }
        self.total_resolution_time
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    fn failed(&self, _id: &str, _error: &DiError) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }
}
