use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::member::Property;
use super::meta::ElementMeta;

/// An association between two or more classes
///
/// Each end is a `Property` owned by the association and typed to a class
/// registered in the model. End wiring and rewiring go through
/// `ops::association_ops`, which maintains the back-reference sets on the
/// classes the ends touch; the record itself never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub meta: ElementMeta,

    /// Binary associations carry the stricter end constraints: exactly
    /// two ends, not both composite
    pub binary: bool,

    pub(crate) ends: Vec<Property>,
}

impl Association {
    pub(crate) fn new(name: impl Into<String>, binary: bool) -> Self {
        Self {
            meta: ElementMeta::new(name),
            binary,
            ends: Vec::new(),
        }
    }

    /// The ends of the association
    pub fn ends(&self) -> &[Property] {
        &self.ends
    }
}

/// A generalization edge: `specific` inherits from `general`
///
/// Both sides are class ids. The edge is unnamed; it carries only its
/// identity and creation marker. Reassigning either side goes through
/// `ops::generalization_ops`, which runs the remove-then-add protocol on
/// the classes' back-reference sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generalization {
    pub id: String,
    pub order: u64,
    pub created_at: DateTime<Utc>,
    pub(crate) general: String,
    pub(crate) specific: String,
}

impl Generalization {
    pub(crate) fn new(general: impl Into<String>, specific: impl Into<String>) -> Self {
        // Reuse the element sequence so generalizations sort with the
        // rest of the construction order
        let marker = ElementMeta::new("");
        Self {
            id: Uuid::now_v7().to_string(),
            order: marker.order,
            created_at: marker.created_at,
            general: general.into(),
            specific: specific.into(),
        }
    }

    /// Id of the general (parent) class
    pub fn general(&self) -> &str {
        &self.general
    }

    /// Id of the specific (child) class
    pub fn specific(&self) -> &str {
        &self.specific
    }
}
