use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::meta::ElementMeta;

/// A named grouping of generalization edges with disjointness and
/// completeness flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralizationSet {
    pub meta: ElementMeta,
    pub generalizations: BTreeSet<String>,
    pub is_disjoint: bool,
    pub is_complete: bool,
}

impl GeneralizationSet {
    pub fn new(
        name: impl Into<String>,
        generalizations: BTreeSet<String>,
        is_disjoint: bool,
        is_complete: bool,
    ) -> Self {
        Self {
            meta: ElementMeta::new(name),
            generalizations,
            is_disjoint,
            is_complete,
        }
    }
}

/// A package groups a set of classes by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub meta: ElementMeta,
    pub classes: BTreeSet<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, classes: BTreeSet<String>) -> Self {
        Self {
            meta: ElementMeta::new(name),
            classes,
        }
    }
}

/// A constraint expression attached to a context class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub meta: ElementMeta,
    /// Id of the class the constraint is evaluated against
    pub context: String,
    pub expression: String,
    pub language: String,
}

impl Constraint {
    pub fn new(
        name: impl Into<String>,
        context: impl Into<String>,
        expression: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            meta: ElementMeta::new(name),
            context: context.into(),
            expression: expression.into(),
            language: language.into(),
        }
    }
}
