pub mod aggregate;
pub mod class;
pub mod enumeration;
pub mod member;
pub mod meta;
pub mod relationship;
pub mod types;

pub use aggregate::{Constraint, GeneralizationSet, Package};
pub use class::Class;
pub use enumeration::{Enumeration, EnumerationLiteral};
pub use member::{
    Method, Multiplicity, MultiplicityBound, Parameter, Property, UNLIMITED_MAX_MULTIPLICITY,
};
pub use meta::{ElementMeta, Visibility};
pub use relationship::{Association, Generalization};
pub use types::{primitive_registry, DataType, PrimitiveKind, PrimitiveType, TypeRef};
