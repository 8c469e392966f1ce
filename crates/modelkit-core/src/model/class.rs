use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::member::{ensure_unique, Method, Property};
use super::meta::ElementMeta;
use crate::errors::{ModelError, Result};

/// A class: the central vertex of the type graph
///
/// A class owns its attributes and methods (setting itself as their
/// owner), and carries two back-reference sets populated by the
/// relationship operations: the ids of the associations whose ends
/// mention it, and the ids of the generalizations it participates in as
/// either side. The back-reference sets are never mutated directly by
/// callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub meta: ElementMeta,
    pub is_abstract: bool,
    pub is_read_only: bool,

    /// When set, this class reifies the association with the given id
    /// (an association class)
    pub association: Option<String>,

    attributes: Vec<Property>,
    methods: Vec<Method>,
    pub(crate) associations: BTreeSet<String>,
    pub(crate) generalizations: BTreeSet<String>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: ElementMeta::new(name),
            is_abstract: false,
            is_read_only: false,
            association: None,
            attributes: Vec::new(),
            methods: Vec::new(),
            associations: BTreeSet::new(),
            generalizations: BTreeSet::new(),
        }
    }

    /// Create a class with an initial member collection, fully validated
    pub fn with_members(
        name: impl Into<String>,
        attributes: Vec<Property>,
        methods: Vec<Method>,
    ) -> Result<Self> {
        let mut class = Self::new(name);
        class.set_attributes(attributes)?;
        class.set_methods(methods)?;
        Ok(class)
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.is_read_only = true;
        self
    }

    pub fn attributes(&self) -> &[Property] {
        &self.attributes
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Ids of the associations whose ends reference this class
    pub fn associations(&self) -> &BTreeSet<String> {
        &self.associations
    }

    /// Ids of the generalizations this class participates in
    pub fn generalizations(&self) -> &BTreeSet<String> {
        &self.generalizations
    }

    /// Add an attribute, taking ownership of it
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if an attribute with the same name exists.
    pub fn add_attribute(&mut self, mut attribute: Property) -> Result<()> {
        if self
            .attributes
            .iter()
            .any(|a| a.meta.name == attribute.meta.name)
        {
            return Err(ModelError::DuplicateName {
                kind: "attribute".to_string(),
                name: attribute.meta.name,
            });
        }
        attribute.owner = Some(self.meta.id.clone());
        self.attributes.push(attribute);
        Ok(())
    }

    /// Replace the whole attribute collection
    ///
    /// The candidate collection is validated in full (duplicate names, at
    /// most one id attribute) before committing; on failure the previous
    /// attributes are untouched. On success every member's owner is
    /// re-pointed at this class. Owners of removed members are left as
    /// they were.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` or `MultipleIdentifiers`.
    pub fn set_attributes(&mut self, mut attributes: Vec<Property>) -> Result<()> {
        ensure_unique(
            attributes.iter().map(|a| a.meta.name.as_str()),
            "attribute",
        )?;
        if attributes.iter().filter(|a| a.is_id).count() > 1 {
            return Err(ModelError::MultipleIdentifiers {
                class: self.meta.name.clone(),
            });
        }
        for attribute in &mut attributes {
            attribute.owner = Some(self.meta.id.clone());
        }
        self.attributes = attributes;
        Ok(())
    }

    /// Add a method, taking ownership of it
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if a method with the same name exists.
    pub fn add_method(&mut self, mut method: Method) -> Result<()> {
        if self.methods.iter().any(|m| m.meta.name == method.meta.name) {
            return Err(ModelError::DuplicateName {
                kind: "method".to_string(),
                name: method.meta.name,
            });
        }
        method.owner = Some(self.meta.id.clone());
        self.methods.push(method);
        Ok(())
    }

    /// Replace the whole method collection, validating the full candidate
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if two candidates share a name.
    pub fn set_methods(&mut self, mut methods: Vec<Method>) -> Result<()> {
        ensure_unique(methods.iter().map(|m| m.meta.name.as_str()), "method")?;
        for method in &mut methods {
            method.owner = Some(self.meta.id.clone());
        }
        self.methods = methods;
        Ok(())
    }

    /// The unique attribute marked as id, if any
    pub fn id_attribute(&self) -> Option<&Property> {
        self.attributes.iter().find(|a| a.is_id)
    }

    pub(crate) fn link_association(&mut self, association_id: &str) {
        self.associations.insert(association_id.to_string());
    }

    pub(crate) fn unlink_association(&mut self, association_id: &str) {
        self.associations.remove(association_id);
    }

    pub(crate) fn link_generalization(&mut self, generalization_id: &str) {
        self.generalizations.insert(generalization_id.to_string());
    }

    pub(crate) fn unlink_generalization(&mut self, generalization_id: &str) {
        self.generalizations.remove(generalization_id);
    }
}
