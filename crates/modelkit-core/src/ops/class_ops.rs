//! Ownership-checked member adoption
//!
//! Members can be attached to a class directly through the `Class` API
//! when the caller already holds the class. These operations add the
//! model-level ownership check on top: the target is looked up in the
//! model and rejected when it is not a legal owner for the member kind.

use tracing::debug;

use crate::errors::{ModelError, Result};
use crate::model::{EnumerationLiteral, Method, Property};
use crate::ops::store::{DomainModel, TypeEntry};

/// Attach an attribute to the class with the given id
///
/// # Errors
///
/// Returns `TypeNotFound` if the owner id is unknown, `InvalidOwner` if
/// it names a data type rather than a class, or `DuplicateName` from the
/// class itself.
pub fn adopt_attribute(
    model: &mut DomainModel,
    owner_id: &str,
    attribute: Property,
) -> Result<()> {
    ensure_class_owner(model, owner_id, &attribute.meta.name)?;
    let class = model.get_class_mut(owner_id)?;
    debug!(class = %class.meta.name, attribute = %attribute.meta.name, "attribute adopted");
    class.add_attribute(attribute)
}

/// Attach a method to the class with the given id
///
/// # Errors
///
/// Returns `TypeNotFound`, `InvalidOwner`, or `DuplicateName` as for
/// [`adopt_attribute`].
pub fn adopt_method(model: &mut DomainModel, owner_id: &str, method: Method) -> Result<()> {
    ensure_class_owner(model, owner_id, &method.meta.name)?;
    let class = model.get_class_mut(owner_id)?;
    debug!(class = %class.meta.name, method = %method.meta.name, "method adopted");
    class.add_method(method)
}

/// Attach a literal to the enumeration with the given id
///
/// # Errors
///
/// Returns `TypeNotFound` if the owner id is unknown, `InvalidOwner` if
/// it is not an enumeration (a primitive in particular can never own a
/// literal), or `DuplicateName` from the enumeration itself.
pub fn adopt_literal(
    model: &mut DomainModel,
    owner_id: &str,
    literal: EnumerationLiteral,
) -> Result<()> {
    let entry = model.get_type_mut(owner_id)?;
    match entry {
        TypeEntry::Enumeration(enumeration) => enumeration.add_literal(literal),
        other => Err(ModelError::InvalidOwner {
            owner: other.name().to_string(),
            member: literal.meta.name.clone(),
        }),
    }
}

fn ensure_class_owner(model: &DomainModel, owner_id: &str, member: &str) -> Result<()> {
    let entry = model.get_type(owner_id)?;
    if entry.is_data_type() {
        return Err(ModelError::InvalidOwner {
            owner: entry.name().to_string(),
            member: member.to_string(),
        });
    }
    Ok(())
}
