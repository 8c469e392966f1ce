//! Derived views over the generalization and association graphs
//!
//! All queries are read-only and recompute from the current edges on
//! every call; nothing here is cached. Transitive traversals fail with
//! `CyclicGeneralization` instead of looping when the edge set carries a
//! cycle.

use std::collections::{BTreeSet, HashSet};

use crate::errors::{ModelError, Result};
use crate::model::{Class, Property};
use crate::ops::store::DomainModel;

/// Direct parents of a class
///
/// # Errors
///
/// Returns `ClassNotFound` if the id is absent or not a class.
pub fn parents<'a>(model: &'a DomainModel, class_id: &str) -> Result<Vec<&'a Class>> {
    direct_parent_ids(model, class_id)?
        .iter()
        .map(|id| model.get_class(id))
        .collect()
}

/// Direct children of a class
///
/// # Errors
///
/// Returns `ClassNotFound` if the id is absent or not a class.
pub fn specializations<'a>(model: &'a DomainModel, class_id: &str) -> Result<Vec<&'a Class>> {
    direct_child_ids(model, class_id)?
        .iter()
        .map(|id| model.get_class(id))
        .collect()
}

/// All ancestors of a class, transitively
///
/// # Errors
///
/// Returns `ClassNotFound` for an unknown id, or `CyclicGeneralization`
/// if the traversal re-enters a class already on the current path.
pub fn all_parents<'a>(model: &'a DomainModel, class_id: &str) -> Result<Vec<&'a Class>> {
    let mut seen = BTreeSet::new();
    let mut path = HashSet::new();
    collect_transitive(model, class_id, direct_parent_ids, &mut seen, &mut path)?;
    seen.iter().map(|id| model.get_class(id)).collect()
}

/// All descendants of a class, transitively
///
/// # Errors
///
/// As [`all_parents`].
pub fn all_specializations<'a>(model: &'a DomainModel, class_id: &str) -> Result<Vec<&'a Class>> {
    let mut seen = BTreeSet::new();
    let mut path = HashSet::new();
    collect_transitive(model, class_id, direct_child_ids, &mut seen, &mut path)?;
    seen.iter().map(|id| model.get_class(id)).collect()
}

/// Attributes inherited from every ancestor
///
/// # Errors
///
/// As [`all_parents`].
pub fn inherited_attributes<'a>(model: &'a DomainModel, class_id: &str) -> Result<Vec<&'a Property>> {
    let mut attributes = Vec::new();
    for parent in all_parents(model, class_id)? {
        attributes.extend(parent.attributes());
    }
    Ok(attributes)
}

/// Own and inherited attributes together
///
/// # Errors
///
/// As [`all_parents`].
pub fn all_attributes<'a>(model: &'a DomainModel, class_id: &str) -> Result<Vec<&'a Property>> {
    let mut attributes: Vec<&Property> = model.get_class(class_id)?.attributes().iter().collect();
    attributes.extend(inherited_attributes(model, class_id)?);
    Ok(attributes)
}

/// Association ends reachable from a class
///
/// For an ordinary association only the opposite ends are reported. A
/// binary self-association (both ends typed to this class) reports both
/// ends, since each one is an opposite of the other.
///
/// # Errors
///
/// Returns `ClassNotFound` or `AssociationNotFound`.
pub fn association_ends<'a>(model: &'a DomainModel, class_id: &str) -> Result<Vec<&'a Property>> {
    let class = model.get_class(class_id)?;
    let mut ends = Vec::new();
    for association_id in class.associations() {
        let association = model.get_association(association_id)?;
        let all = association.ends();
        let self_association = all.len() == 2 && all[0].ty == all[1].ty;
        if self_association {
            ends.extend(all.iter());
        } else {
            ends.extend(all.iter().filter(|end| end.ty.model_id() != Some(class_id)));
        }
    }
    Ok(ends)
}

/// Association ends reachable from a class or any of its ancestors
///
/// # Errors
///
/// As [`association_ends`], plus `CyclicGeneralization` from the
/// ancestor traversal.
pub fn all_association_ends<'a>(
    model: &'a DomainModel,
    class_id: &str,
) -> Result<Vec<&'a Property>> {
    let mut ends = association_ends(model, class_id)?;
    for parent in all_parents(model, class_id)? {
        ends.extend(association_ends(model, &parent.meta.id)?);
    }
    Ok(ends)
}

fn direct_parent_ids(model: &DomainModel, class_id: &str) -> Result<BTreeSet<String>> {
    let class = model.get_class(class_id)?;
    let mut ids = BTreeSet::new();
    for generalization_id in class.generalizations() {
        let edge = model.get_generalization(generalization_id)?;
        if edge.specific() == class_id {
            ids.insert(edge.general().to_string());
        }
    }
    Ok(ids)
}

fn direct_child_ids(model: &DomainModel, class_id: &str) -> Result<BTreeSet<String>> {
    let class = model.get_class(class_id)?;
    let mut ids = BTreeSet::new();
    for generalization_id in class.generalizations() {
        let edge = model.get_generalization(generalization_id)?;
        if edge.general() == class_id {
            ids.insert(edge.specific().to_string());
        }
    }
    Ok(ids)
}

fn collect_transitive(
    model: &DomainModel,
    class_id: &str,
    step: fn(&DomainModel, &str) -> Result<BTreeSet<String>>,
    seen: &mut BTreeSet<String>,
    path: &mut HashSet<String>,
) -> Result<()> {
    path.insert(class_id.to_string());
    for next in step(model, class_id)? {
        if path.contains(&next) {
            return Err(ModelError::CyclicGeneralization {
                class: model.get_class(&next)?.meta.name.clone(),
            });
        }
        if seen.insert(next.clone()) {
            collect_transitive(model, &next, step, seen, path)?;
        }
    }
    path.remove(class_id);
    Ok(())
}
