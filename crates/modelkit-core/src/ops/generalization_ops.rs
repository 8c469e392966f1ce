//! Generalization lifecycle and side reassignment
//!
//! A generalization is an edge between two classes; both classes carry the
//! edge id in their back-reference set. Reassigning one side unlinks the
//! class leaving the edge and links the incoming one, leaving the other
//! side alone.

use tracing::debug;

use crate::errors::{ModelError, Result};
use crate::model::Generalization;
use crate::ops::store::DomainModel;

/// Create a generalization edge between two classes
///
/// # Errors
///
/// Returns `ClassNotFound` if either side is missing from the model, or
/// `SelfGeneralization` if both sides name the same class.
pub fn create_generalization(
    model: &mut DomainModel,
    general_id: &str,
    specific_id: &str,
) -> Result<String> {
    let general = model.get_class(general_id)?;
    if general_id == specific_id {
        return Err(ModelError::SelfGeneralization {
            class: general.meta.name.clone(),
        });
    }
    model.get_class(specific_id)?;

    let generalization = Generalization::new(general_id, specific_id);
    let id = generalization.id.clone();
    debug!(general = %general_id, specific = %specific_id, id = %id, "generalization created");
    model.insert_generalization(generalization);
    model.get_class_mut(general_id)?.link_generalization(&id);
    model.get_class_mut(specific_id)?.link_generalization(&id);
    Ok(id)
}

/// Reassign the general (parent) side of an edge
///
/// # Errors
///
/// Returns `GeneralizationNotFound`, `ClassNotFound`, or
/// `SelfGeneralization` if the new general equals the current specific.
pub fn set_general(model: &mut DomainModel, generalization_id: &str, general_id: &str) -> Result<()> {
    let edge = model.get_generalization(generalization_id)?;
    let old_general = edge.general().to_string();
    let specific = edge.specific().to_string();

    let incoming = model.get_class(general_id)?;
    if general_id == specific {
        return Err(ModelError::SelfGeneralization {
            class: incoming.meta.name.clone(),
        });
    }

    if let Ok(class) = model.get_class_mut(&old_general) {
        class.unlink_generalization(generalization_id);
    }
    model.get_class_mut(general_id)?.link_generalization(generalization_id);
    model.get_generalization_mut(generalization_id)?.general = general_id.to_string();
    Ok(())
}

/// Reassign the specific (child) side of an edge
///
/// # Errors
///
/// Returns `GeneralizationNotFound`, `ClassNotFound`, or
/// `SelfGeneralization` if the new specific equals the current general.
pub fn set_specific(
    model: &mut DomainModel,
    generalization_id: &str,
    specific_id: &str,
) -> Result<()> {
    let edge = model.get_generalization(generalization_id)?;
    let old_specific = edge.specific().to_string();
    let general = edge.general().to_string();

    let incoming = model.get_class(specific_id)?;
    if specific_id == general {
        return Err(ModelError::SelfGeneralization {
            class: incoming.meta.name.clone(),
        });
    }

    if let Ok(class) = model.get_class_mut(&old_specific) {
        class.unlink_generalization(generalization_id);
    }
    model.get_class_mut(specific_id)?.link_generalization(generalization_id);
    model.get_generalization_mut(generalization_id)?.specific = specific_id.to_string();
    Ok(())
}

/// Remove a generalization edge and both back-references
///
/// # Errors
///
/// Returns `GeneralizationNotFound` if no edge with this id exists.
pub fn remove_generalization(model: &mut DomainModel, generalization_id: &str) -> Result<()> {
    let edge = model.get_generalization(generalization_id)?;
    let general = edge.general().to_string();
    let specific = edge.specific().to_string();

    if let Ok(class) = model.get_class_mut(&general) {
        class.unlink_generalization(generalization_id);
    }
    if let Ok(class) = model.get_class_mut(&specific) {
        class.unlink_generalization(generalization_id);
    }
    model.remove_generalization_entry(generalization_id);
    debug!(general = %general, specific = %specific, id = %generalization_id, "generalization removed");
    Ok(())
}
