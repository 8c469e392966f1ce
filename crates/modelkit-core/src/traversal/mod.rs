//! Read-only graph traversals over a domain model

pub mod inheritance;
pub mod order;

pub use inheritance::{
    all_association_ends, all_attributes, all_parents, all_specializations, association_ends,
    inherited_attributes, parents, specializations,
};
pub use order::classes_sorted_by_inheritance;
