use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ModelError, Result};
use crate::model::member::ensure_unique;
use crate::model::{
    primitive_registry, Association, Class, Constraint, DataType, ElementMeta, Enumeration,
    Generalization, Package, PrimitiveType,
};

/// A type registered in a domain model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeEntry {
    Class(Class),
    Enumeration(Enumeration),
    Primitive(PrimitiveType),
    DataType(DataType),
}

impl TypeEntry {
    pub fn id(&self) -> &str {
        match self {
            TypeEntry::Class(c) => &c.meta.id,
            TypeEntry::Enumeration(e) => &e.meta.id,
            TypeEntry::Primitive(p) => &p.meta.id,
            TypeEntry::DataType(d) => &d.meta.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Class(c) => &c.meta.name,
            TypeEntry::Enumeration(e) => &e.meta.name,
            TypeEntry::Primitive(p) => &p.meta.name,
            TypeEntry::DataType(d) => &d.meta.name,
        }
    }

    pub fn order(&self) -> u64 {
        match self {
            TypeEntry::Class(c) => c.meta.order,
            TypeEntry::Enumeration(e) => e.meta.order,
            TypeEntry::Primitive(p) => p.meta.order,
            TypeEntry::DataType(d) => d.meta.order,
        }
    }

    /// Whether this entry is a data type (primitive, enumeration, or
    /// plain data type) rather than a class
    pub fn is_data_type(&self) -> bool {
        !matches!(self, TypeEntry::Class(_))
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            TypeEntry::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut Class> {
        match self {
            TypeEntry::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_enumeration(&self) -> Option<&Enumeration> {
        match self {
            TypeEntry::Enumeration(e) => Some(e),
            _ => None,
        }
    }
}

/// The root aggregate: an in-memory arena owning every model element
///
/// All cross-references between elements are ids into this container, so
/// ownership stays acyclic while the graph itself carries cycles of
/// back-references. Single-writer, synchronous construction; read-mostly
/// queries afterwards. Not thread-safe by design.
///
/// The eight primitive types are injected at construction and re-injected
/// by every wholesale replacement of `types`, so they are always
/// queryable by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainModel {
    pub meta: ElementMeta,
    types: HashMap<String, TypeEntry>,
    associations: HashMap<String, Association>,
    generalizations: HashMap<String, Generalization>,
    packages: HashMap<String, Package>,
    constraints: HashMap<String, Constraint>,
}

impl DomainModel {
    /// Create an empty model holding only the primitive types
    pub fn new(name: impl Into<String>) -> Self {
        let mut types = HashMap::new();
        for primitive in primitive_registry() {
            types.insert(
                primitive.meta.id.clone(),
                TypeEntry::Primitive(primitive.clone()),
            );
        }
        Self {
            meta: ElementMeta::new(name),
            types,
            associations: HashMap::new(),
            generalizations: HashMap::new(),
            packages: HashMap::new(),
            constraints: HashMap::new(),
        }
    }

    // ===== Types =====

    /// Get a type entry by id
    ///
    /// # Errors
    ///
    /// Returns `TypeNotFound` if no type with this id is registered.
    pub fn get_type(&self, id: &str) -> Result<&TypeEntry> {
        self.types.get(id).ok_or_else(|| ModelError::TypeNotFound {
            name: id.to_string(),
        })
    }

    pub(crate) fn get_type_mut(&mut self, id: &str) -> Result<&mut TypeEntry> {
        self.types
            .get_mut(id)
            .ok_or_else(|| ModelError::TypeNotFound {
                name: id.to_string(),
            })
    }

    /// Get a class by id
    ///
    /// # Errors
    ///
    /// Returns `ClassNotFound` if the id is absent or not a class.
    pub fn get_class(&self, id: &str) -> Result<&Class> {
        self.types
            .get(id)
            .and_then(TypeEntry::as_class)
            .ok_or_else(|| ModelError::ClassNotFound { id: id.to_string() })
    }

    /// Get a class by id for mutation
    ///
    /// # Errors
    ///
    /// Returns `ClassNotFound` if the id is absent or not a class.
    pub fn get_class_mut(&mut self, id: &str) -> Result<&mut Class> {
        self.types
            .get_mut(id)
            .and_then(TypeEntry::as_class_mut)
            .ok_or_else(|| ModelError::ClassNotFound { id: id.to_string() })
    }

    /// Register a type, enforcing model-wide name uniqueness
    ///
    /// Re-runs the full duplicate scan on every call: O(n) per add,
    /// acceptable for construction-time use.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if another type carries the same name.
    pub fn add_type(&mut self, entry: TypeEntry) -> Result<String> {
        if self.types.values().any(|t| t.name() == entry.name()) {
            return Err(ModelError::DuplicateName {
                kind: "type".to_string(),
                name: entry.name().to_string(),
            });
        }
        let id = entry.id().to_string();
        debug!(type_id = %id, name = %entry.name(), "type registered");
        self.types.insert(id.clone(), entry);
        Ok(id)
    }

    /// Replace the whole type collection
    ///
    /// The primitive registry is always unioned into the candidate. The
    /// candidate is validated in full before committing; on failure the
    /// previous collection is untouched.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if two candidate types share a name.
    pub fn set_types(&mut self, entries: Vec<TypeEntry>) -> Result<()> {
        let mut candidate = HashMap::new();
        for primitive in primitive_registry() {
            candidate.insert(
                primitive.meta.id.clone(),
                TypeEntry::Primitive(primitive.clone()),
            );
        }
        for entry in entries {
            // Supplying a primitive again is a no-op, not a duplicate
            if candidate.contains_key(entry.id()) {
                continue;
            }
            candidate.insert(entry.id().to_string(), entry);
        }
        ensure_unique(candidate.values().map(TypeEntry::name), "type")?;
        self.types = candidate;
        Ok(())
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    // ===== Associations =====

    /// Get an association by id
    ///
    /// # Errors
    ///
    /// Returns `AssociationNotFound` if no association with this id exists.
    pub fn get_association(&self, id: &str) -> Result<&Association> {
        self.associations
            .get(id)
            .ok_or_else(|| ModelError::AssociationNotFound { id: id.to_string() })
    }

    pub(crate) fn get_association_mut(&mut self, id: &str) -> Result<&mut Association> {
        self.associations
            .get_mut(id)
            .ok_or_else(|| ModelError::AssociationNotFound { id: id.to_string() })
    }

    pub(crate) fn ensure_association_name_free(&self, name: &str) -> Result<()> {
        if self.associations.values().any(|a| a.meta.name == name) {
            return Err(ModelError::DuplicateName {
                kind: "association".to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn insert_association(&mut self, association: Association) {
        self.associations
            .insert(association.meta.id.clone(), association);
    }

    pub(crate) fn remove_association_entry(&mut self, id: &str) -> Option<Association> {
        self.associations.remove(id)
    }

    /// Replace the whole association collection
    ///
    /// The candidate is name-validated in full before committing. Classes
    /// whose associations are dropped by the replacement lose their
    /// back-reference, and every surviving or incoming association has
    /// its end classes linked, so class-level queries stay answerable
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if two candidate associations share a name.
    pub fn set_associations(&mut self, associations: Vec<Association>) -> Result<()> {
        ensure_unique(
            associations.iter().map(|a| a.meta.name.as_str()),
            "association",
        )?;
        let incoming: HashMap<String, Association> = associations
            .into_iter()
            .map(|a| (a.meta.id.clone(), a))
            .collect();

        let dropped: Vec<(String, Vec<String>)> = self
            .associations
            .values()
            .filter(|a| !incoming.contains_key(&a.meta.id))
            .map(|a| {
                let class_ids = a
                    .ends()
                    .iter()
                    .filter_map(|end| end.ty.model_id().map(str::to_string))
                    .collect();
                (a.meta.id.clone(), class_ids)
            })
            .collect();
        for (association_id, class_ids) in dropped {
            for class_id in class_ids {
                if let Some(class) = self.types.get_mut(&class_id).and_then(TypeEntry::as_class_mut)
                {
                    class.unlink_association(&association_id);
                }
            }
        }

        let linked: Vec<(String, Vec<String>)> = incoming
            .values()
            .map(|a| {
                let class_ids = a
                    .ends()
                    .iter()
                    .filter_map(|end| end.ty.model_id().map(str::to_string))
                    .collect();
                (a.meta.id.clone(), class_ids)
            })
            .collect();
        for (association_id, class_ids) in linked {
            for class_id in class_ids {
                if let Some(class) = self.types.get_mut(&class_id).and_then(TypeEntry::as_class_mut)
                {
                    class.link_association(&association_id);
                }
            }
        }

        self.associations = incoming;
        Ok(())
    }

    pub fn associations(&self) -> impl Iterator<Item = &Association> {
        self.associations.values()
    }

    // ===== Generalizations =====

    /// Get a generalization by id
    ///
    /// # Errors
    ///
    /// Returns `GeneralizationNotFound` if no edge with this id exists.
    pub fn get_generalization(&self, id: &str) -> Result<&Generalization> {
        self.generalizations
            .get(id)
            .ok_or_else(|| ModelError::GeneralizationNotFound { id: id.to_string() })
    }

    pub(crate) fn get_generalization_mut(&mut self, id: &str) -> Result<&mut Generalization> {
        self.generalizations
            .get_mut(id)
            .ok_or_else(|| ModelError::GeneralizationNotFound { id: id.to_string() })
    }

    pub(crate) fn insert_generalization(&mut self, generalization: Generalization) {
        self.generalizations
            .insert(generalization.id.clone(), generalization);
    }

    pub(crate) fn remove_generalization_entry(&mut self, id: &str) -> Option<Generalization> {
        self.generalizations.remove(id)
    }

    /// Replace the whole generalization collection
    ///
    /// Edges are unnamed, so there is nothing to validate. Classes
    /// participating in dropped edges lose their back-reference and the
    /// classes of surviving or incoming edges gain one, so inheritance
    /// queries stay answerable afterwards.
    pub fn set_generalizations(&mut self, generalizations: Vec<Generalization>) {
        let incoming: HashMap<String, Generalization> = generalizations
            .into_iter()
            .map(|g| (g.id.clone(), g))
            .collect();

        let dropped: Vec<(String, String, String)> = self
            .generalizations
            .values()
            .filter(|g| !incoming.contains_key(&g.id))
            .map(|g| (g.id.clone(), g.general().to_string(), g.specific().to_string()))
            .collect();
        for (edge_id, general, specific) in dropped {
            for class_id in [general, specific] {
                if let Some(class) = self.types.get_mut(&class_id).and_then(TypeEntry::as_class_mut)
                {
                    class.unlink_generalization(&edge_id);
                }
            }
        }

        let linked: Vec<(String, String, String)> = incoming
            .values()
            .map(|g| (g.id.clone(), g.general().to_string(), g.specific().to_string()))
            .collect();
        for (edge_id, general, specific) in linked {
            for class_id in [general, specific] {
                if let Some(class) = self.types.get_mut(&class_id).and_then(TypeEntry::as_class_mut)
                {
                    class.link_generalization(&edge_id);
                }
            }
        }

        self.generalizations = incoming;
    }

    pub fn generalizations(&self) -> impl Iterator<Item = &Generalization> {
        self.generalizations.values()
    }

    // ===== Packages =====

    /// Add a package, enforcing name uniqueness
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if another package carries the same name.
    pub fn add_package(&mut self, package: Package) -> Result<String> {
        if self
            .packages
            .values()
            .any(|p| p.meta.name == package.meta.name)
        {
            return Err(ModelError::DuplicateName {
                kind: "package".to_string(),
                name: package.meta.name.clone(),
            });
        }
        let id = package.meta.id.clone();
        self.packages.insert(id.clone(), package);
        Ok(id)
    }

    /// Replace the whole package collection, validating the candidate first
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if two candidate packages share a name.
    pub fn set_packages(&mut self, packages: Vec<Package>) -> Result<()> {
        ensure_unique(packages.iter().map(|p| p.meta.name.as_str()), "package")?;
        self.packages = packages
            .into_iter()
            .map(|p| (p.meta.id.clone(), p))
            .collect();
        Ok(())
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    // ===== Constraints =====

    /// Add a constraint, enforcing name uniqueness
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if another constraint carries the same name.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<String> {
        if self
            .constraints
            .values()
            .any(|c| c.meta.name == constraint.meta.name)
        {
            return Err(ModelError::DuplicateName {
                kind: "constraint".to_string(),
                name: constraint.meta.name.clone(),
            });
        }
        let id = constraint.meta.id.clone();
        self.constraints.insert(id.clone(), constraint);
        Ok(id)
    }

    /// Replace the whole constraint collection, validating the candidate
    /// first
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if two candidate constraints share a name.
    pub fn set_constraints(&mut self, constraints: Vec<Constraint>) -> Result<()> {
        ensure_unique(
            constraints.iter().map(|c| c.meta.name.as_str()),
            "constraint",
        )?;
        self.constraints = constraints
            .into_iter()
            .map(|c| (c.meta.id.clone(), c))
            .collect();
        Ok(())
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    // ===== Serialization =====

    /// Encode the whole model as JSON
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a model from JSON
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed input.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}
