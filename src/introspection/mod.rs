//! Type introspection: the container's only window onto constructible types.
//!
//! The resolution engine never constructs anything itself. It asks a
//! [`TypeIntrospector`] whether a named type exists, what its constructor
//! expects, and to build it from the arguments the engine assembled.
//! [`TypeCatalog`] is the bundled implementation, filled in at build time.

use crate::error::DiResult;
use crate::value::Object;

mod catalog;

pub use catalog::{Arguments, ClassBuilder, TypeCatalog};

/// Declared type of a constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// A single class, interface or abstract type
    Named(String),
    /// A built-in/primitive type such as `int` or `string`
    Builtin(String),
    Union(Vec<String>),
    Intersection(Vec<String>),
    /// No declared type
    Untyped,
}

impl DeclaredType {
    pub fn named(name: impl Into<String>) -> Self {
        DeclaredType::Named(name.into())
    }

    pub fn builtin(name: impl Into<String>) -> Self {
        DeclaredType::Builtin(name.into())
    }
}

/// One constructor parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub declared_type: DeclaredType,
    pub has_default: bool,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            has_default: false,
        }
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// Positional constructor argument assembled by the container.
#[derive(Clone)]
pub enum Argument {
    /// Dependency resolved by the container
    Resolved(Object),
    /// Parameter left to its own default value
    Default,
}

impl std::fmt::Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::Resolved(_) => f.write_str("Resolved(..)"),
            Argument::Default => f.write_str("Default"),
        }
    }
}

/// Host capability for inspecting and constructing named types.
///
/// Implementations back the container with whatever metadata is at hand: a
/// hand-built catalog, generated code, or a plugin system's type table.
pub trait TypeIntrospector: Send + Sync {
    /// Whether `name` denotes a known type (constructible or not).
    fn type_exists(&self, name: &str) -> bool;

    /// Whether `name` is an interface or abstract type.
    fn is_abstract_or_interface(&self, name: &str) -> bool;

    /// Ordered constructor parameters of `name`, or `None` if the type is unknown.
    fn constructor_parameters(&self, name: &str) -> Option<Vec<ParameterInfo>>;

    /// Builds `name` from one argument per declared parameter.
    fn construct(&self, name: &str, args: Vec<Argument>) -> DiResult<Object>;
}
