use modelkit_core::ops::association_ops;
use modelkit_core::ops::generalization_ops;
use modelkit_core::{
    Class, DomainModel, Multiplicity, PrimitiveKind, Property, TypeEntry, TypeRef,
};

/// Create a new empty model for testing
#[allow(dead_code)]
pub fn new_model() -> DomainModel {
    DomainModel::new("test-model")
}

/// Register a class by name and return its id
#[allow(dead_code)]
pub fn add_class(model: &mut DomainModel, name: &str) -> String {
    model
        .add_type(TypeEntry::Class(Class::new(name)))
        .unwrap_or_else(|e| panic!("failed to add class {name}: {e}"))
}

/// A string attribute with the default 1..1 multiplicity
#[allow(dead_code)]
pub fn str_attribute(name: &str) -> Property {
    Property::new(name, TypeRef::Primitive(PrimitiveKind::Str))
}

/// An association end typed to the given class, multiplicity 0..*
#[allow(dead_code)]
pub fn end(name: &str, class_id: &str) -> Property {
    Property::new(name, TypeRef::model(class_id)).with_multiplicity(Multiplicity::at_least(0))
}

/// Wire a binary association between two classes and return its id
#[allow(dead_code)]
pub fn link_binary(
    model: &mut DomainModel,
    name: &str,
    first: (&str, &str),
    second: (&str, &str),
) -> String {
    association_ops::create_binary_association(
        model,
        name,
        vec![end(first.0, first.1), end(second.0, second.1)],
    )
    .unwrap_or_else(|e| panic!("failed to create association {name}: {e}"))
}

/// Setup an inheritance chain: Media <- Book <- Novel
///
/// Returns (media_id, book_id, novel_id)
#[allow(dead_code)]
pub fn setup_inheritance_chain(model: &mut DomainModel) -> (String, String, String) {
    let media_id = add_class(model, "Media");
    let book_id = add_class(model, "Book");
    let novel_id = add_class(model, "Novel");

    generalization_ops::create_generalization(model, &media_id, &book_id).unwrap();
    generalization_ops::create_generalization(model, &book_id, &novel_id).unwrap();

    (media_id, book_id, novel_id)
}
