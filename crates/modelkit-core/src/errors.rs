use thiserror::Error;

/// Result type alias using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;

/// Comprehensive error taxonomy for metamodel operations
///
/// Every variant is a synchronous validation failure: a failing mutation
/// leaves the previous state of the touched entities unchanged, and the
/// caller is expected to fix the input and retry. None are transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    // ===== Value Errors =====
    /// A scalar value is outside its allowed domain (visibility name,
    /// multiplicity bound, and similar)
    #[error("Invalid value: {reason}")]
    InvalidValue { reason: String },

    /// A primitive data type name outside the fixed registry
    #[error("Invalid primitive data type: {name}")]
    InvalidPrimitiveType { name: String },

    // ===== Naming Errors =====
    /// Two same-kind named elements share a name within one collection
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: String, name: String },

    /// More than one attribute of a class is marked as id
    #[error("Class {class} cannot have more than one attribute marked as id")]
    MultipleIdentifiers { class: String },

    // ===== Ownership Errors =====
    /// A data type was assigned as the owner of a member, or a primitive
    /// as the owner of an enumeration literal
    #[error("Invalid owner {owner} for member {member}")]
    InvalidOwner { owner: String, member: String },

    // ===== Relationship Errors =====
    /// A class generalizing itself
    #[error("Class {class} cannot be a generalization of itself")]
    SelfGeneralization { class: String },

    /// Association end-count or composite constraints violated
    #[error("Association {association} violates end constraints: {reason}")]
    ArityViolation {
        association: String,
        reason: String,
    },

    /// A generalization cycle was detected during transitive traversal
    #[error("Generalization cycle detected involving class {class}")]
    CyclicGeneralization { class: String },

    // ===== Lookup Errors =====
    /// Type not found in the model
    #[error("Type not found: {name}")]
    TypeNotFound { name: String },

    /// Class not found in the model
    #[error("Class not found: {id}")]
    ClassNotFound { id: String },

    /// Association not found in the model
    #[error("Association not found: {id}")]
    AssociationNotFound { id: String },

    /// Generalization not found in the model
    #[error("Generalization not found: {id}")]
    GeneralizationNotFound { id: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization {
            message: err.to_string(),
        }
    }
}
