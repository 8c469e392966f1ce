use serde::{Deserialize, Serialize};

use super::member::ensure_unique;
use super::meta::ElementMeta;
use crate::errors::{ModelError, Result};

/// A single literal of an enumeration
///
/// `owner` holds the id of the enumeration the literal belongs to once it
/// is linked in; it is never a primitive type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumerationLiteral {
    pub meta: ElementMeta,
    pub owner: Option<String>,
}

impl EnumerationLiteral {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: ElementMeta::new(name),
            owner: None,
        }
    }
}

/// An enumeration data type with a set of named literals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enumeration {
    pub meta: ElementMeta,
    literals: Vec<EnumerationLiteral>,
}

impl Enumeration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: ElementMeta::new(name),
            literals: Vec::new(),
        }
    }

    /// Create an enumeration with an initial literal collection
    pub fn with_literals(
        name: impl Into<String>,
        literals: Vec<EnumerationLiteral>,
    ) -> Result<Self> {
        let mut enumeration = Self::new(name);
        enumeration.set_literals(literals)?;
        Ok(enumeration)
    }

    pub fn literals(&self) -> &[EnumerationLiteral] {
        &self.literals
    }

    /// Add a literal, taking ownership of it
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if a literal with the same name exists.
    pub fn add_literal(&mut self, mut literal: EnumerationLiteral) -> Result<()> {
        if self
            .literals
            .iter()
            .any(|l| l.meta.name == literal.meta.name)
        {
            return Err(ModelError::DuplicateName {
                kind: "literal".to_string(),
                name: literal.meta.name,
            });
        }
        literal.owner = Some(self.meta.id.clone());
        self.literals.push(literal);
        Ok(())
    }

    /// Replace the whole literal collection, validating the full candidate
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if two candidates share a name.
    pub fn set_literals(&mut self, mut literals: Vec<EnumerationLiteral>) -> Result<()> {
        ensure_unique(literals.iter().map(|l| l.meta.name.as_str()), "literal")?;
        for literal in &mut literals {
            literal.owner = Some(self.meta.id.clone());
        }
        self.literals = literals;
        Ok(())
    }
}
