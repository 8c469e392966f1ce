//! Association lifecycle and end rewiring
//!
//! Ends are `Property` values typed to classes in the model. Every wiring
//! operation keeps the class back-reference sets consistent with the
//! remove-then-add protocol: back-references of the previous end classes
//! are dropped first, then the new end classes gain theirs. Validation
//! runs in full before any mutation, so a failed call leaves both the
//! association and every touched class exactly as they were.

use tracing::debug;

use crate::errors::{ModelError, Result};
use crate::model::{Association, Property};
use crate::ops::store::DomainModel;

/// Create an n-ary association and wire its ends
///
/// # Errors
///
/// Returns `DuplicateName` if an association with this name exists,
/// `ArityViolation` if fewer than two ends are given, or `ClassNotFound`
/// if an end is not typed to a class in the model.
pub fn create_association(
    model: &mut DomainModel,
    name: impl Into<String>,
    ends: Vec<Property>,
) -> Result<String> {
    create(model, name.into(), false, ends)
}

/// Create a binary association and wire its ends
///
/// # Errors
///
/// As [`create_association`], plus `ArityViolation` when the end count is
/// not exactly two or both ends are composite.
pub fn create_binary_association(
    model: &mut DomainModel,
    name: impl Into<String>,
    ends: Vec<Property>,
) -> Result<String> {
    create(model, name.into(), true, ends)
}

fn create(
    model: &mut DomainModel,
    name: String,
    binary: bool,
    ends: Vec<Property>,
) -> Result<String> {
    model.ensure_association_name_free(&name)?;
    check_ends(&name, binary, &ends)?;
    resolve_end_classes(model, &ends)?;

    let association = Association::new(name, binary);
    let id = association.meta.id.clone();
    debug!(association = %association.meta.name, id = %id, ends = ends.len(), "association created");
    model.insert_association(association);
    wire_ends(model, &id, ends)?;
    Ok(id)
}

/// Replace the ends of an existing association
///
/// Old end classes lose their back-reference, new end classes gain one,
/// and every new end's owner is pointed at the association. The candidate
/// is validated in full first; on failure the previous wiring is
/// untouched.
///
/// # Errors
///
/// Returns `AssociationNotFound`, `ArityViolation`, or `ClassNotFound`.
pub fn set_ends(model: &mut DomainModel, association_id: &str, ends: Vec<Property>) -> Result<()> {
    let association = model.get_association(association_id)?;
    check_ends(&association.meta.name, association.binary, &ends)?;
    resolve_end_classes(model, &ends)?;

    unwire_ends(model, association_id)?;
    wire_ends(model, association_id, ends)
}

/// Remove an association, dropping the back-references its ends created
///
/// # Errors
///
/// Returns `AssociationNotFound` if no association with this id exists.
pub fn remove_association(model: &mut DomainModel, association_id: &str) -> Result<()> {
    model.get_association(association_id)?;
    unwire_ends(model, association_id)?;
    let removed = model.remove_association_entry(association_id);
    if let Some(association) = removed {
        debug!(association = %association.meta.name, id = %association_id, "association removed");
    }
    Ok(())
}

/// Reify an association with a class (an association class)
///
/// # Errors
///
/// Returns `AssociationNotFound` or `ClassNotFound` if either side is
/// missing from the model.
pub fn attach_association_class(
    model: &mut DomainModel,
    association_id: &str,
    class_id: &str,
) -> Result<()> {
    model.get_association(association_id)?;
    let class = model.get_class_mut(class_id)?;
    class.association = Some(association_id.to_string());
    Ok(())
}

fn check_ends(name: &str, binary: bool, ends: &[Property]) -> Result<()> {
    if ends.len() <= 1 {
        return Err(ModelError::ArityViolation {
            association: name.to_string(),
            reason: "an association must have more than one end".to_string(),
        });
    }
    if binary {
        if ends.len() != 2 {
            return Err(ModelError::ArityViolation {
                association: name.to_string(),
                reason: "a binary association must have exactly two ends".to_string(),
            });
        }
        if ends.iter().all(|end| end.is_composite) {
            return Err(ModelError::ArityViolation {
                association: name.to_string(),
                reason: "both ends of a binary association cannot be composite".to_string(),
            });
        }
    }
    Ok(())
}

/// Check that every end resolves to a class before anything is mutated
fn resolve_end_classes(model: &DomainModel, ends: &[Property]) -> Result<()> {
    for end in ends {
        let class_id = end.ty.model_id().ok_or_else(|| ModelError::ClassNotFound {
            id: format!("{:?}", end.ty),
        })?;
        model.get_class(class_id)?;
    }
    Ok(())
}

fn unwire_ends(model: &mut DomainModel, association_id: &str) -> Result<()> {
    let old_class_ids: Vec<String> = model
        .get_association(association_id)?
        .ends()
        .iter()
        .filter_map(|end| end.ty.model_id().map(str::to_string))
        .collect();
    for class_id in old_class_ids {
        // Resolved at wiring time, still present unless removed since
        if let Ok(class) = model.get_class_mut(&class_id) {
            class.unlink_association(association_id);
        }
    }
    Ok(())
}

fn wire_ends(model: &mut DomainModel, association_id: &str, mut ends: Vec<Property>) -> Result<()> {
    for end in &mut ends {
        end.owner = Some(association_id.to_string());
        if let Some(class_id) = end.ty.model_id().map(str::to_string) {
            model.get_class_mut(&class_id)?.link_association(association_id);
        }
    }
    model.get_association_mut(association_id)?.ends = ends;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Class, Multiplicity, TypeRef};
    use crate::ops::store::TypeEntry;

    fn two_class_model() -> (DomainModel, String, String) {
        let mut model = DomainModel::new("library");
        let book = model.add_type(TypeEntry::Class(Class::new("Book"))).unwrap();
        let author = model
            .add_type(TypeEntry::Class(Class::new("Author")))
            .unwrap();
        (model, book, author)
    }

    fn end(name: &str, class_id: &str) -> Property {
        Property::new(name, TypeRef::model(class_id))
            .with_multiplicity(Multiplicity::at_least(0))
    }

    #[test]
    fn test_create_wires_back_references_and_owners() {
        let (mut model, book, author) = two_class_model();
        let id = create_binary_association(
            &mut model,
            "writes",
            vec![end("books", &book), end("authors", &author)],
        )
        .unwrap();

        assert!(model.get_class(&book).unwrap().associations().contains(&id));
        assert!(model.get_class(&author).unwrap().associations().contains(&id));
        let association = model.get_association(&id).unwrap();
        assert!(association
            .ends()
            .iter()
            .all(|e| e.owner.as_deref() == Some(id.as_str())));
    }

    #[test]
    fn test_single_end_rejected() {
        let (mut model, book, _) = two_class_model();
        let result = create_association(&mut model, "broken", vec![end("books", &book)]);
        assert!(matches!(result, Err(ModelError::ArityViolation { .. })));
    }

    #[test]
    fn test_binary_rejects_three_ends() {
        let (mut model, book, author) = two_class_model();
        let publisher = model
            .add_type(TypeEntry::Class(Class::new("Publisher")))
            .unwrap();

        let result = create_binary_association(
            &mut model,
            "deal",
            vec![
                end("books", &book),
                end("authors", &author),
                end("publishers", &publisher),
            ],
        );
        assert!(matches!(result, Err(ModelError::ArityViolation { .. })));
    }

    #[test]
    fn test_binary_rejects_both_ends_composite() {
        let (mut model, book, author) = two_class_model();
        let result = create_binary_association(
            &mut model,
            "writes",
            vec![
                end("books", &book).composite(),
                end("authors", &author).composite(),
            ],
        );
        assert!(matches!(
            result,
            Err(ModelError::ArityViolation { association, .. }) if association == "writes"
        ));
    }

    #[test]
    fn test_end_typed_to_unknown_class_rejected_before_wiring() {
        let (mut model, book, _) = two_class_model();
        let result = create_binary_association(
            &mut model,
            "writes",
            vec![end("books", &book), end("ghosts", "no-such-id")],
        );
        assert!(matches!(result, Err(ModelError::ClassNotFound { .. })));
        // Nothing was wired
        assert!(model.get_class(&book).unwrap().associations().is_empty());
    }

    #[test]
    fn test_set_ends_rewires_back_references() {
        let (mut model, book, author) = two_class_model();
        let library = model
            .add_type(TypeEntry::Class(Class::new("Library")))
            .unwrap();
        let id = create_binary_association(
            &mut model,
            "writes",
            vec![end("books", &book), end("authors", &author)],
        )
        .unwrap();

        set_ends(
            &mut model,
            &id,
            vec![end("books", &book), end("holdings", &library)],
        )
        .unwrap();

        assert!(model.get_class(&book).unwrap().associations().contains(&id));
        assert!(model.get_class(&library).unwrap().associations().contains(&id));
        assert!(!model.get_class(&author).unwrap().associations().contains(&id));
    }

    #[test]
    fn test_failed_set_ends_leaves_wiring_untouched() {
        let (mut model, book, author) = two_class_model();
        let id = create_binary_association(
            &mut model,
            "writes",
            vec![end("books", &book), end("authors", &author)],
        )
        .unwrap();

        let result = set_ends(&mut model, &id, vec![end("books", &book)]);
        assert!(matches!(result, Err(ModelError::ArityViolation { .. })));
        assert!(model.get_class(&author).unwrap().associations().contains(&id));
        assert_eq!(model.get_association(&id).unwrap().ends().len(), 2);
    }

    #[test]
    fn test_remove_association_drops_back_references() {
        let (mut model, book, author) = two_class_model();
        let id = create_binary_association(
            &mut model,
            "writes",
            vec![end("books", &book), end("authors", &author)],
        )
        .unwrap();

        remove_association(&mut model, &id).unwrap();
        assert!(model.get_association(&id).is_err());
        assert!(model.get_class(&book).unwrap().associations().is_empty());
        assert!(model.get_class(&author).unwrap().associations().is_empty());
    }

    #[test]
    fn test_duplicate_association_name_rejected() {
        let (mut model, book, author) = two_class_model();
        create_binary_association(
            &mut model,
            "writes",
            vec![end("books", &book), end("authors", &author)],
        )
        .unwrap();

        let result = create_binary_association(
            &mut model,
            "writes",
            vec![end("books", &book), end("authors", &author)],
        );
        assert!(matches!(result, Err(ModelError::DuplicateName { .. })));
    }

    #[test]
    fn test_attach_association_class() {
        let (mut model, book, author) = two_class_model();
        let id = create_binary_association(
            &mut model,
            "writes",
            vec![end("books", &book), end("authors", &author)],
        )
        .unwrap();
        let contract = model
            .add_type(TypeEntry::Class(Class::new("Contract")))
            .unwrap();

        attach_association_class(&mut model, &id, &contract).unwrap();
        assert_eq!(
            model.get_class(&contract).unwrap().association.as_deref(),
            Some(id.as_str())
        );
    }
}
