//! Model-level operations
//!
//! The store owns every element; the operation modules implement the
//! mutations that have to see more than one element at a time (ownership
//! checks, back-reference wiring). Anything a single element can validate
//! on its own lives on the element type instead.

pub mod association_ops;
pub mod class_ops;
pub mod generalization_ops;
pub mod store;

pub use store::{DomainModel, TypeEntry};
