//! # autowire
//!
//! An object-composition registry: register how to produce an object for a
//! string identifier, then ask for fully-constructed object graphs without
//! wiring constructor arguments by hand.
//!
//! ## Features
//!
//! - **Three lifetimes**: transient, shared and scoped registrations
//! - **Auto-wiring**: constructor parameters are resolved from their declared
//!   types, recursively, through a [`TypeIntrospector`]
//! - **Tagged specs**: class references, zero-argument factories and pre-built
//!   instances are explicit enum variants
//! - **Scope flushing**: drop scoped objects at request boundaries without
//!   re-registering anything
//! - **Circular dependency detection**: cycles fail with the full path
//! - **Observers**: hook resolution events, with a `tracing` logger built in
//!
//! ## Quick Start
//!
//! ```rust
//! use autowire::{Container, DeclaredType, ServiceSpec, TypeCatalog};
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! // Describe the constructible types
//! let mut types = TypeCatalog::new();
//! types
//!     .class("UserService")
//!     .param("db", DeclaredType::named("Database"))
//!     .build(|args| Ok(UserService { db: args.get(0)? }));
//!
//! // Register services
//! let mut container = Container::new(types);
//! container
//!     .register_shared(
//!         "Database",
//!         ServiceSpec::instance(Database { url: "postgres://localhost".to_string() }),
//!     )
//!     .unwrap();
//!
//! // UserService is not registered: it is auto-wired
//! let users = container.make("UserService").unwrap().downcast::<UserService>().unwrap();
//! assert_eq!(users.db.url, "postgres://localhost");
//! ```
//!
//! ## Scoped Services
//!
//! ```rust
//! use autowire::{Container, ServiceSpec, TypeCatalog, Value};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! struct RequestId(u32);
//!
//! let counter = Arc::new(AtomicU32::new(0));
//! let next = counter.clone();
//!
//! let mut container = Container::new(TypeCatalog::new());
//! container
//!     .register_scoped(
//!         "request_id",
//!         ServiceSpec::factory(move || Value::object(RequestId(next.fetch_add(1, Ordering::SeqCst)))),
//!     )
//!     .unwrap();
//!
//! let a = container.resolve_as::<RequestId>("request_id").unwrap();
//! let b = container.resolve_as::<RequestId>("request_id").unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! // End of request
//! container.flush_scoped_instance("request_id");
//! let c = container.resolve_as::<RequestId>("request_id").unwrap();
//! assert_eq!(c.0, 1);
//! ```

// Module declarations
pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod introspection;
pub mod lifetime;
pub mod observer;
pub mod registration;
pub mod value;

// Internal modules
mod internal;

// Re-export core types
pub use config::ContainerOptions;
pub use container::{Container, SharedContainer};
pub use descriptors::ServiceDescriptor;
pub use error::{DiError, DiResult, UnsupportedReason};
pub use introspection::{
    Argument, Arguments, ClassBuilder, DeclaredType, ParameterInfo, TypeCatalog, TypeIntrospector,
};
pub use lifetime::Lifetime;
pub use observer::{DiObserver, LoggingObserver, MetricsObserver};
pub use registration::{Factory, ServiceSpec, SpecKind, TransientSpec};
pub use value::{Object, Value};
