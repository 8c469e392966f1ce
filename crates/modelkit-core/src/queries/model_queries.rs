//! Name-based lookups and typed listings over a model

use crate::model::{Class, Enumeration};
use crate::ops::store::{DomainModel, TypeEntry};

/// Find a type by its name, primitives included
pub fn get_type_by_name<'a>(model: &'a DomainModel, name: &str) -> Option<&'a TypeEntry> {
    model.types().find(|entry| entry.name() == name)
}

/// Find a class by its name
pub fn get_class_by_name<'a>(model: &'a DomainModel, name: &str) -> Option<&'a Class> {
    model
        .types()
        .filter_map(TypeEntry::as_class)
        .find(|class| class.meta.name == name)
}

/// Every class of the model, in creation order
pub fn get_classes(model: &DomainModel) -> Vec<&Class> {
    let mut classes: Vec<&Class> = model.types().filter_map(TypeEntry::as_class).collect();
    classes.sort_by_key(|class| class.meta.order);
    classes
}

/// Every enumeration of the model, in creation order
pub fn get_enumerations(model: &DomainModel) -> Vec<&Enumeration> {
    let mut enumerations: Vec<&Enumeration> = model
        .types()
        .filter_map(TypeEntry::as_enumeration)
        .collect();
    enumerations.sort_by_key(|enumeration| enumeration.meta.order);
    enumerations
}
