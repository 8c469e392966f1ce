mod common;

use std::collections::BTreeSet;

use common::{add_class, link_binary, new_model, str_attribute};
use modelkit_core::ops::generalization_ops;
use modelkit_core::{queries, traversal};
use modelkit_core::{
    Class, Constraint, DomainModel, Enumeration, EnumerationLiteral, GeneralizationSet,
    ModelError, Package, PrimitiveKind, TypeEntry, TypeRef,
};

// ===== TYPE COLLECTION TESTS =====

#[test]
fn test_fresh_model_exposes_primitives_by_name() {
    let model = new_model();
    for name in [
        "int",
        "float",
        "str",
        "bool",
        "time",
        "date",
        "datetime",
        "timedelta",
    ] {
        let entry = queries::get_type_by_name(&model, name);
        assert!(entry.is_some(), "primitive {name} missing");
        assert!(entry.unwrap().is_data_type());
    }
}

#[test]
fn test_duplicate_type_name_rejected() {
    let mut model = new_model();
    add_class(&mut model, "Book");

    let result = model.add_type(TypeEntry::Class(Class::new("Book")));
    assert!(matches!(result, Err(ModelError::DuplicateName { .. })));

    let result = model.add_type(TypeEntry::Enumeration(Enumeration::new("Book")));
    assert!(matches!(result, Err(ModelError::DuplicateName { .. })));
}

#[test]
fn test_type_replacement_keeps_primitives_and_rolls_back_on_failure() {
    let mut model = new_model();
    add_class(&mut model, "Book");

    // A valid replacement drops Book, keeps the primitives
    model
        .set_types(vec![TypeEntry::Class(Class::new("Author"))])
        .unwrap();
    assert!(queries::get_type_by_name(&model, "Book").is_none());
    assert!(queries::get_type_by_name(&model, "int").is_some());

    // An invalid candidate leaves the committed collection alone
    let result = model.set_types(vec![
        TypeEntry::Class(Class::new("Dup")),
        TypeEntry::Class(Class::new("Dup")),
    ]);
    assert!(result.is_err());
    assert!(queries::get_type_by_name(&model, "Author").is_some());
    assert!(queries::get_type_by_name(&model, "Dup").is_none());
}

// ===== QUERY TESTS =====

#[test]
fn test_class_and_enumeration_listings() {
    let mut model = new_model();
    add_class(&mut model, "Book");
    model
        .add_type(TypeEntry::Enumeration(
            Enumeration::with_literals(
                "Genre",
                vec![
                    EnumerationLiteral::new("fantasy"),
                    EnumerationLiteral::new("mystery"),
                ],
            )
            .unwrap(),
        ))
        .unwrap();
    add_class(&mut model, "Author");

    let classes: Vec<_> = queries::get_classes(&model)
        .iter()
        .map(|c| c.meta.name.clone())
        .collect();
    assert_eq!(classes, ["Book", "Author"]);

    let enumerations = queries::get_enumerations(&model);
    assert_eq!(enumerations.len(), 1);
    assert_eq!(enumerations[0].literals().len(), 2);

    assert!(queries::get_class_by_name(&model, "Book").is_some());
    assert!(queries::get_class_by_name(&model, "Genre").is_none());
}

// ===== PACKAGE AND CONSTRAINT TESTS =====

#[test]
fn test_packages_group_classes_by_id() {
    let mut model = new_model();
    let book_id = add_class(&mut model, "Book");
    let author_id = add_class(&mut model, "Author");

    let classes: BTreeSet<String> = [book_id, author_id].into_iter().collect();
    model.add_package(Package::new("catalog", classes)).unwrap();

    let result = model.add_package(Package::new("catalog", BTreeSet::new()));
    assert!(matches!(result, Err(ModelError::DuplicateName { kind, .. }) if kind == "package"));
}

#[test]
fn test_constraints_attach_to_a_context_class() {
    let mut model = new_model();
    let book_id = add_class(&mut model, "Book");

    model
        .add_constraint(Constraint::new(
            "positive-pages",
            book_id.clone(),
            "self.pages > 0",
            "OCL",
        ))
        .unwrap();

    let constraint = model.constraints().next().unwrap();
    assert_eq!(constraint.context, book_id);
    assert_eq!(constraint.language, "OCL");
}

// ===== WHOLESALE REPLACEMENT TESTS =====

#[test]
fn test_association_replacement_keeps_class_queries_answerable() {
    let mut model = new_model();
    let book_id = add_class(&mut model, "Book");
    let author_id = add_class(&mut model, "Author");
    link_binary(
        &mut model,
        "writes",
        ("books", &book_id),
        ("authors", &author_id),
    );

    model.set_associations(Vec::new()).unwrap();

    // No dangling back-reference: the query succeeds and is empty
    assert!(traversal::association_ends(&model, &book_id)
        .unwrap()
        .is_empty());
    assert!(model.get_class(&author_id).unwrap().associations().is_empty());
}

#[test]
fn test_generalization_replacement_keeps_inheritance_queries_answerable() {
    let mut model = new_model();
    let media_id = add_class(&mut model, "Media");
    let book_id = add_class(&mut model, "Book");
    generalization_ops::create_generalization(&mut model, &media_id, &book_id).unwrap();

    model.set_generalizations(Vec::new());

    assert!(traversal::parents(&model, &book_id).unwrap().is_empty());
    assert!(traversal::all_parents(&model, &book_id).unwrap().is_empty());
    assert!(traversal::specializations(&model, &media_id).unwrap().is_empty());
}

#[test]
fn test_partial_association_replacement_unwires_only_dropped_edges() {
    let mut model = new_model();
    let book_id = add_class(&mut model, "Book");
    let author_id = add_class(&mut model, "Author");
    let writes_id = link_binary(
        &mut model,
        "writes",
        ("books", &book_id),
        ("authors", &author_id),
    );
    let edits_id = link_binary(
        &mut model,
        "edits",
        ("books", &book_id),
        ("editors", &author_id),
    );

    let kept: Vec<_> = model
        .associations()
        .filter(|a| a.meta.id == writes_id)
        .cloned()
        .collect();
    model.set_associations(kept).unwrap();

    let ends = traversal::association_ends(&model, &book_id).unwrap();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].meta.name, "authors");
    assert!(!model
        .get_class(&book_id)
        .unwrap()
        .associations()
        .contains(&edits_id));
}

// ===== GENERALIZATION SET TESTS =====

#[test]
fn test_generalization_set_groups_edges() {
    let mut model = new_model();
    let media_id = add_class(&mut model, "Media");
    let book_id = add_class(&mut model, "Book");
    let audio_id = add_class(&mut model, "Audio");
    let first =
        generalization_ops::create_generalization(&mut model, &media_id, &book_id).unwrap();
    let second =
        generalization_ops::create_generalization(&mut model, &media_id, &audio_id).unwrap();

    let edges: BTreeSet<String> = [first.clone(), second.clone()].into_iter().collect();
    let set = GeneralizationSet::new("media-kinds", edges, true, false);

    assert_eq!(set.meta.name, "media-kinds");
    assert!(set.is_disjoint);
    assert!(!set.is_complete);
    assert!(set.generalizations.contains(&first));
    assert!(set.generalizations.contains(&second));
    // Every grouped edge resolves in the model
    for edge_id in &set.generalizations {
        assert!(model.get_generalization(edge_id).is_ok());
    }
}

// ===== SERIALIZATION TESTS =====

#[test]
fn test_model_round_trips_through_json() {
    let mut model = new_model();
    let book_id = add_class(&mut model, "Book");
    model
        .get_class_mut(&book_id)
        .unwrap()
        .add_attribute(str_attribute("title").as_id())
        .unwrap();
    model
        .get_class_mut(&book_id)
        .unwrap()
        .add_attribute(
            modelkit_core::Property::new("pages", TypeRef::Primitive(PrimitiveKind::Int)),
        )
        .unwrap();

    let encoded = model.to_json().unwrap();
    let decoded = DomainModel::from_json(&encoded).unwrap();

    let book = decoded.get_class(&book_id).unwrap();
    assert_eq!(book.meta.name, "Book");
    assert_eq!(book.attributes().len(), 2);
    assert_eq!(book.id_attribute().unwrap().meta.name, "title");
}
