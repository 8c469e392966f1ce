pub mod model_queries;

pub use model_queries::{get_class_by_name, get_classes, get_enumerations, get_type_by_name};
