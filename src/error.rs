//! Error types for the object-composition registry.

use thiserror::Error;

/// Why a constructor parameter cannot be auto-wired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsupportedReason {
    /// Built-in/primitive type with no default value
    #[error("built-in type `{0}` has no default value")]
    Builtin(String),
    /// Union-typed parameter with no default value
    #[error("union types cannot be injected")]
    Union,
    /// Intersection-typed parameter with no default value
    #[error("intersection types cannot be injected")]
    Intersection,
    /// Parameter without a declared type and no default value
    #[error("parameter has no declared type")]
    Untyped,
    /// Interface or abstract type that is not registered
    #[error("`{0}` is an interface or abstract type with no registration")]
    Abstract(String),
}

/// Registry and resolution errors.
///
/// All variants are terminal: the container never retries internally. A
/// caller recovers by changing registration state (for example registering
/// a missing dependency) and resolving again.
///
/// # Examples
///
/// ```rust
/// use autowire::{Container, DiError, TypeCatalog};
///
/// let mut container = Container::new(TypeCatalog::new());
/// match container.resolve("mailer") {
///     Err(DiError::NotFound(id)) => assert_eq!(id, "mailer"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiError {
    /// Identifier already claimed by one of the three lifetime categories
    #[error("Service already registered: {0}")]
    AlreadyRegistered(String),
    /// Transient class reference does not name a constructible type
    #[error("Invalid class reference for `{id}`: `{class}` is not a constructible type")]
    InvalidReference { id: String, class: String },
    /// Unknown identifier, or a concrete dependency type that cannot be located
    #[error("Service not found: {0}")]
    NotFound(String),
    /// A factory produced something other than an object.
    ///
    /// `path` holds the requesting identifiers, innermost first.
    #[error("Factory returned a non-object value ({returned}) while resolving {}", .path.join(" <- "))]
    InvalidClosureReturn { returned: &'static str, path: Vec<String> },
    /// Interface or abstract type requested for construction
    #[error("Cannot instantiate interface or abstract type: {0}")]
    NotInstantiable(String),
    /// A constructor parameter cannot be auto-wired
    #[error("Unsupported parameter `{parameter}` of {type_name}: {reason}")]
    UnsupportedParameters {
        type_name: String,
        parameter: String,
        reason: UnsupportedReason,
    },
    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),
    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// Resolved object is not of the requested Rust type
    #[error("Type mismatch for `{id}`: expected {expected}")]
    TypeMismatch { id: String, expected: &'static str },
    /// A constructor received an argument it could not use
    #[error("Argument {index} of {type_name}: expected {expected}")]
    ArgumentMismatch {
        type_name: String,
        index: usize,
        expected: &'static str,
    },
}

impl DiError {
    /// Appends the requesting identifier to an `InvalidClosureReturn` path.
    ///
    /// Other variants pass through unchanged.
    pub(crate) fn within(self, id: &str) -> Self {
        match self {
            DiError::InvalidClosureReturn { returned, mut path } => {
                path.push(id.to_string());
                DiError::InvalidClosureReturn { returned, path }
            }
            other => other,
        }
    }
}

/// Result type for registry operations
pub type DiResult<T> = Result<T, DiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_only_touches_closure_errors() {
        let err = DiError::InvalidClosureReturn { returned: "int", path: vec![] }
            .within("inner")
            .within("outer");
        assert_eq!(
            err,
            DiError::InvalidClosureReturn {
                returned: "int",
                path: vec!["inner".to_string(), "outer".to_string()],
            }
        );

        let not_found = DiError::NotFound("x".into()).within("outer");
        assert_eq!(not_found, DiError::NotFound("x".into()));
    }
}
