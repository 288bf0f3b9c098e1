//! Service descriptors for introspection and diagnostics.

use crate::lifetime::Lifetime;
use crate::registration::SpecKind;

/// Snapshot of one registration
///
/// Descriptors are produced by [`Container::descriptors`](crate::Container::descriptors)
/// and carry no handle back into the container.
///
/// # Examples
///
/// ```rust
/// use autowire::{Container, Lifetime, ServiceSpec, SpecKind, TransientSpec, TypeCatalog};
///
/// let mut types = TypeCatalog::new();
/// types.class("Clock").build(|_| Ok(()));
///
/// let mut container = Container::new(types);
/// container.register_transient("clock", TransientSpec::class("Clock")).unwrap();
/// container.register_scoped("user", ServiceSpec::instance("alice")).unwrap();
/// container.resolve("user").unwrap();
///
/// let descriptors = container.descriptors();
/// assert_eq!(descriptors[0].id, "clock");
/// assert_eq!(descriptors[0].class_name.as_deref(), Some("Clock"));
/// assert_eq!(descriptors[1].lifetime, Lifetime::Scoped);
/// assert_eq!(descriptors[1].kind, SpecKind::Instance);
/// assert!(descriptors[1].cached);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub id: String,
    pub lifetime: Lifetime,
    pub kind: SpecKind,
    /// Type name for class-reference registrations
    pub class_name: Option<String>,
    /// Whether a resolved object is currently cached
    pub cached: bool,
}

impl ServiceDescriptor {
    pub fn is_class_reference(&self) -> bool {
        self.kind == SpecKind::ClassReference
    }
}
