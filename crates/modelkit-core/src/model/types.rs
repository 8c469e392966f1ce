use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::meta::ElementMeta;
use crate::errors::{ModelError, Result};

/// The eight built-in scalar types, the leaves of every type reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Int,
    Float,
    Str,
    Bool,
    Time,
    Date,
    DateTime,
    TimeDelta,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Int,
        PrimitiveKind::Float,
        PrimitiveKind::Str,
        PrimitiveKind::Bool,
        PrimitiveKind::Time,
        PrimitiveKind::Date,
        PrimitiveKind::DateTime,
        PrimitiveKind::TimeDelta,
    ];

    /// Canonical name of the primitive
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Str => "str",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Time => "time",
            PrimitiveKind::Date => "date",
            PrimitiveKind::DateTime => "datetime",
            PrimitiveKind::TimeDelta => "timedelta",
        }
    }

    /// Parse a primitive name from the fixed set
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrimitiveType` for any name outside the set.
    /// Note that the `"string"` alias is a `TypeRef::resolve` convenience,
    /// not a valid primitive name here.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "int" => Ok(PrimitiveKind::Int),
            "float" => Ok(PrimitiveKind::Float),
            "str" => Ok(PrimitiveKind::Str),
            "bool" => Ok(PrimitiveKind::Bool),
            "time" => Ok(PrimitiveKind::Time),
            "date" => Ok(PrimitiveKind::Date),
            "datetime" => Ok(PrimitiveKind::DateTime),
            "timedelta" => Ok(PrimitiveKind::TimeDelta),
            other => Err(ModelError::InvalidPrimitiveType {
                name: other.to_string(),
            }),
        }
    }
}

/// A primitive data type entry: one of the eight shared scalar types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveType {
    pub meta: ElementMeta,
    pub kind: PrimitiveKind,
}

impl PrimitiveType {
    /// Construct a primitive type by name
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrimitiveType` if the name is outside the fixed set.
    pub fn new(name: &str) -> Result<Self> {
        let kind = PrimitiveKind::parse(name)?;
        Ok(Self {
            meta: ElementMeta::new(kind.as_str()),
            kind,
        })
    }
}

/// A non-primitive data type (a named scalar without literals)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataType {
    pub meta: ElementMeta,
}

impl DataType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: ElementMeta::new(name),
        }
    }
}

/// Process-wide registry of the eight primitive types
///
/// Initialized lazily, once per process, and handed out by shared
/// reference so every model injects the same instances (identical ids).
pub fn primitive_registry() -> &'static [PrimitiveType] {
    static REGISTRY: OnceLock<Vec<PrimitiveType>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        PrimitiveKind::ALL
            .iter()
            .map(|kind| PrimitiveType {
                meta: ElementMeta::new(kind.as_str()),
                kind: *kind,
            })
            .collect()
    })
}

/// A reference to a type, resolved or ad hoc
///
/// Typed elements carry one of:
/// - `Primitive`: one of the eight built-in scalars, compared by value so
///   "is this the same primitive" is a plain equality check
/// - `Model`: the id of a type registered in a `DomainModel` (class,
///   enumeration, or data type)
/// - `Named`: an ad hoc named type that did not resolve against the
///   primitive registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    Model(String),
    Named(String),
}

impl TypeRef {
    /// Resolve a plain type name against the primitive registry
    ///
    /// Total and side-effect-free: primitive names (and the `"string"`
    /// alias) resolve to `Primitive`, anything else becomes an ad hoc
    /// `Named` type.
    pub fn resolve(name: &str) -> TypeRef {
        match name {
            "string" => TypeRef::Primitive(PrimitiveKind::Str),
            other => match PrimitiveKind::parse(other) {
                Ok(kind) => TypeRef::Primitive(kind),
                Err(_) => TypeRef::Named(other.to_string()),
            },
        }
    }

    /// Reference a type registered in a model by id
    pub fn model(id: impl Into<String>) -> TypeRef {
        TypeRef::Model(id.into())
    }

    /// The model type id, if this reference points into a model
    pub fn model_id(&self) -> Option<&str> {
        match self {
            TypeRef::Model(id) => Some(id),
            _ => None,
        }
    }
}

impl From<PrimitiveKind> for TypeRef {
    fn from(kind: PrimitiveKind) -> Self {
        TypeRef::Primitive(kind)
    }
}

// Plain strings resolve through the registry, so constructors can take a
// type name directly
impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::resolve(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_parse_accepts_the_fixed_set() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::parse(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_primitive_parse_rejects_unknown_name() {
        let result = PrimitiveKind::parse("decimal");
        assert!(matches!(
            result,
            Err(ModelError::InvalidPrimitiveType { name }) if name == "decimal"
        ));
    }

    #[test]
    fn test_primitive_type_constructor_validates_name() {
        assert!(PrimitiveType::new("int").is_ok());
        assert!(matches!(
            PrimitiveType::new("integer"),
            Err(ModelError::InvalidPrimitiveType { .. })
        ));
    }

    #[test]
    fn test_registry_is_shared_and_complete() {
        let first = primitive_registry();
        let second = primitive_registry();

        assert_eq!(first.len(), 8);
        // Same instances on every call: ids are stable for the process
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.meta.id, b.meta.id);
        }
    }

    #[test]
    fn test_resolve_maps_primitives_and_alias() {
        assert_eq!(
            TypeRef::resolve("str"),
            TypeRef::Primitive(PrimitiveKind::Str)
        );
        assert_eq!(
            TypeRef::resolve("string"),
            TypeRef::Primitive(PrimitiveKind::Str)
        );
        assert_eq!(
            TypeRef::resolve("datetime"),
            TypeRef::Primitive(PrimitiveKind::DateTime)
        );
    }

    #[test]
    fn test_resolve_falls_back_to_named_type() {
        assert_eq!(TypeRef::resolve("Book"), TypeRef::Named("Book".to_string()));
    }
}
