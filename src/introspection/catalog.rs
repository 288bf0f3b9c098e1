//! Build-time type catalog implementing [`TypeIntrospector`].

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use super::{Argument, DeclaredType, ParameterInfo, TypeIntrospector};
use crate::error::{DiError, DiResult};
use crate::registration::Map;
use crate::value::{Object, Value};

type Ctor = Arc<dyn Fn(&Arguments) -> DiResult<Object> + Send + Sync>;

struct CatalogParam {
    info: ParameterInfo,
    default: Option<Value>,
}

enum TypeEntry {
    Class { params: Vec<CatalogParam>, ctor: Ctor },
    Interface,
    Abstract,
}

/// A table of named types, their constructor signatures and constructors.
///
/// Rust has no runtime reflection, so constructor metadata is declared once
/// when the catalog is built. Interfaces and abstract types are recorded by
/// name only; the container refuses to auto-wire them.
///
/// # Examples
///
/// ```rust
/// use autowire::{Container, DeclaredType, TypeCatalog};
/// use std::sync::Arc;
///
/// struct Transport;
/// struct Mailer {
///     transport: Arc<Transport>,
///     retries: i64,
/// }
///
/// let mut types = TypeCatalog::new();
/// types.class("Transport").build(|_| Ok(Transport));
/// types
///     .class("Mailer")
///     .param("transport", DeclaredType::named("Transport"))
///     .param_with_default("retries", DeclaredType::builtin("int"), 3i64)
///     .build(|args| {
///         Ok(Mailer {
///             transport: args.get::<Transport>(0)?,
///             retries: args.int(1)?,
///         })
///     });
///
/// let mut container = Container::new(types);
/// let mailer = container.make("Mailer").unwrap().downcast::<Mailer>().unwrap();
/// assert_eq!(mailer.retries, 3);
/// ```
#[derive(Default)]
pub struct TypeCatalog {
    types: Map<String, TypeEntry>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts declaring a constructible type.
    ///
    /// The declaration is stored once [`ClassBuilder::build`] is called;
    /// declaring the same name again replaces it.
    pub fn class(&mut self, name: impl Into<String>) -> ClassBuilder<'_> {
        ClassBuilder {
            catalog: self,
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Records an interface name.
    pub fn interface(&mut self, name: impl Into<String>) -> &mut Self {
        self.types.insert(name.into(), TypeEntry::Interface);
        self
    }

    /// Records an abstract type name.
    pub fn abstract_class(&mut self, name: impl Into<String>) -> &mut Self {
        self.types.insert(name.into(), TypeEntry::Abstract);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.types.keys().collect();
        names.sort();
        f.debug_struct("TypeCatalog").field("types", &names).finish()
    }
}

impl TypeIntrospector for TypeCatalog {
    fn type_exists(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    fn is_abstract_or_interface(&self, name: &str) -> bool {
        matches!(
            self.types.get(name),
            Some(TypeEntry::Interface) | Some(TypeEntry::Abstract)
        )
    }

    fn constructor_parameters(&self, name: &str) -> Option<Vec<ParameterInfo>> {
        match self.types.get(name)? {
            TypeEntry::Class { params, .. } => Some(params.iter().map(|p| p.info.clone()).collect()),
            TypeEntry::Interface | TypeEntry::Abstract => Some(Vec::new()),
        }
    }

    fn construct(&self, name: &str, args: Vec<Argument>) -> DiResult<Object> {
        let (params, ctor) = match self.types.get(name) {
            Some(TypeEntry::Class { params, ctor }) => (params, ctor),
            Some(_) => return Err(DiError::NotInstantiable(name.to_string())),
            None => return Err(DiError::NotFound(name.to_string())),
        };

        if args.len() != params.len() {
            return Err(DiError::ArgumentMismatch {
                type_name: name.to_string(),
                index: args.len().min(params.len()),
                expected: "one argument per constructor parameter",
            });
        }

        let mut slots = Vec::with_capacity(args.len());
        for (index, (arg, param)) in args.into_iter().zip(params).enumerate() {
            let slot = match arg {
                Argument::Resolved(object) => Value::Object(object),
                Argument::Default => param.default.clone().ok_or_else(|| DiError::ArgumentMismatch {
                    type_name: name.to_string(),
                    index,
                    expected: "a declared default value",
                })?,
            };
            slots.push(slot);
        }

        ctor(&Arguments {
            type_name: name.to_string(),
            slots,
        })
    }
}

/// Builder for one constructible type in a [`TypeCatalog`].
pub struct ClassBuilder<'a> {
    catalog: &'a mut TypeCatalog,
    name: String,
    params: Vec<CatalogParam>,
}

impl<'a> ClassBuilder<'a> {
    /// Appends a parameter without a default value.
    pub fn param(mut self, name: impl Into<String>, declared_type: DeclaredType) -> Self {
        self.params.push(CatalogParam {
            info: ParameterInfo::new(name, declared_type),
            default: None,
        });
        self
    }

    /// Appends a parameter whose default applies when it is not injected.
    pub fn param_with_default(
        mut self,
        name: impl Into<String>,
        declared_type: DeclaredType,
        default: impl Into<Value>,
    ) -> Self {
        self.params.push(CatalogParam {
            info: ParameterInfo::new(name, declared_type).with_default(),
            default: Some(default.into()),
        });
        self
    }

    /// Stores the type with its constructor.
    pub fn build<T, F>(self, ctor: F) -> &'a mut TypeCatalog
    where
        T: Any + Send + Sync,
        F: Fn(&Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        let ctor: Ctor = Arc::new(move |args: &Arguments| ctor(args).map(|value| Arc::new(value) as Object));
        self.catalog.types.insert(
            self.name,
            TypeEntry::Class {
                params: self.params,
                ctor,
            },
        );
        self.catalog
    }
}

/// Positional arguments handed to a catalog constructor.
///
/// Slot `i` matches the `i`-th declared parameter. Injected dependencies are
/// objects; defaulted parameters carry their declared default value.
pub struct Arguments {
    type_name: String,
    slots: Vec<Value>,
}

impl Arguments {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Name of the type being constructed.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    fn mismatch(&self, index: usize, expected: &'static str) -> DiError {
        DiError::ArgumentMismatch {
            type_name: self.type_name.clone(),
            index,
            expected,
        }
    }

    fn slot(&self, index: usize) -> DiResult<&Value> {
        self.slots
            .get(index)
            .ok_or_else(|| self.mismatch(index, "an argument at this position"))
    }

    /// Raw value at `index`.
    pub fn value(&self, index: usize) -> DiResult<Value> {
        self.slot(index).cloned()
    }

    /// Type-erased object at `index`.
    pub fn object(&self, index: usize) -> DiResult<Object> {
        match self.slot(index)? {
            Value::Object(object) => Ok(object.clone()),
            _ => Err(self.mismatch(index, "object")),
        }
    }

    /// Object at `index`, downcast to `T`.
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> DiResult<Arc<T>> {
        self.object(index)?
            .downcast::<T>()
            .map_err(|_| self.mismatch(index, type_name::<T>()))
    }

    pub fn int(&self, index: usize) -> DiResult<i64> {
        self.slot(index)?
            .as_i64()
            .ok_or_else(|| self.mismatch(index, "int"))
    }

    pub fn bool(&self, index: usize) -> DiResult<bool> {
        self.slot(index)?
            .as_bool()
            .ok_or_else(|| self.mismatch(index, "bool"))
    }

    pub fn str(&self, index: usize) -> DiResult<String> {
        self.slot(index)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(index, "string"))
    }
}
