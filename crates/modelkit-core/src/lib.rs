//! ModelKit Core - In-memory structural metamodel
//!
//! This crate provides the entity graph and operations for building
//! object-oriented domain models programmatically, including:
//! - Classes with attributes, methods, and identity constraints
//! - Binary and n-ary associations with multiplicity-carrying ends
//! - Generalization edges with cycle-safe transitive traversal
//! - Enumerations, data types, packages, and constraints
//! - A fixed primitive type registry shared across models
//! - Inheritance-aware class ordering for code generators
//!
//! Cross-references between elements are ids into the owning
//! [`DomainModel`], and every relationship mutation keeps the class
//! back-reference sets consistent with the edges that mention them.

pub mod errors;
pub mod logging;
pub mod model;
pub mod ops;
pub mod queries;
pub mod traversal;

// Re-export commonly used types
pub use errors::{ModelError, Result};
pub use model::{
    Association, Class, Constraint, DataType, ElementMeta, Enumeration, EnumerationLiteral,
    Generalization, GeneralizationSet, Method, Multiplicity, MultiplicityBound, Package, Parameter,
    PrimitiveKind, PrimitiveType, Property, TypeRef, Visibility,
};
pub use ops::{DomainModel, TypeEntry};
