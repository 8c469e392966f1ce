use serde::{Deserialize, Serialize};

use super::meta::ElementMeta;
use super::types::TypeRef;
use crate::errors::{ModelError, Result};

/// Sentinel reported for an unbounded maximum multiplicity
pub const UNLIMITED_MAX_MULTIPLICITY: u32 = 9999;

/// Upper bound of a multiplicity range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiplicityBound {
    Bounded(u32),
    Unbounded,
}

impl MultiplicityBound {
    /// Parse a bound from its textual form: a non-negative integer or `*`
    pub fn parse(s: &str) -> Result<Self> {
        if s == "*" {
            return Ok(MultiplicityBound::Unbounded);
        }
        s.parse::<u32>()
            .map(MultiplicityBound::Bounded)
            .map_err(|_| ModelError::InvalidValue {
                reason: format!("invalid max multiplicity: {s}"),
            })
    }

    /// Numeric value of the bound; unbounded reports the sentinel 9999
    pub fn as_u32(&self) -> u32 {
        match self {
            MultiplicityBound::Bounded(n) => *n,
            MultiplicityBound::Unbounded => UNLIMITED_MAX_MULTIPLICITY,
        }
    }
}

impl From<u32> for MultiplicityBound {
    fn from(n: u32) -> Self {
        MultiplicityBound::Bounded(n)
    }
}

/// Cardinality range `[min, max]` of a property or association end
///
/// Both bounds are validated at construction and re-validated against the
/// current value of the other bound whenever either is reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multiplicity {
    min: u32,
    max: MultiplicityBound,
}

impl Multiplicity {
    /// Create a multiplicity with the given bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if a bounded max is below min.
    pub fn new(min: u32, max: impl Into<MultiplicityBound>) -> Result<Self> {
        let max = max.into();
        check_bounds(min, max)?;
        Ok(Self { min, max })
    }

    /// The default 1..1 multiplicity
    pub fn one() -> Self {
        Self {
            min: 1,
            max: MultiplicityBound::Bounded(1),
        }
    }

    /// An unbounded multiplicity `min..*`
    pub fn at_least(min: u32) -> Self {
        Self {
            min,
            max: MultiplicityBound::Unbounded,
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> MultiplicityBound {
        self.max
    }

    /// Reassign the minimum, re-validating against the current max
    pub fn set_min(&mut self, min: u32) -> Result<()> {
        check_bounds(min, self.max)?;
        self.min = min;
        Ok(())
    }

    /// Reassign the maximum, re-validating against the current min
    pub fn set_max(&mut self, max: impl Into<MultiplicityBound>) -> Result<()> {
        let max = max.into();
        check_bounds(self.min, max)?;
        self.max = max;
        Ok(())
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Self::one()
    }
}

fn check_bounds(min: u32, max: MultiplicityBound) -> Result<()> {
    if let MultiplicityBound::Bounded(n) = max {
        if n < min {
            return Err(ModelError::InvalidValue {
                reason: format!("max multiplicity {n} is below min {min}"),
            });
        }
    }
    Ok(())
}

/// An attribute of a class or an end of an association
///
/// Owned by exactly one class or association; `owner` holds that element's
/// id once the property is linked in and is maintained by the owning side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub meta: ElementMeta,
    pub ty: TypeRef,
    pub owner: Option<String>,
    pub multiplicity: Multiplicity,
    pub is_composite: bool,
    pub is_navigable: bool,
    pub is_id: bool,
    pub is_read_only: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            meta: ElementMeta::new(name),
            ty: ty.into(),
            owner: None,
            multiplicity: Multiplicity::default(),
            is_composite: false,
            is_navigable: true,
            is_id: false,
            is_read_only: false,
        }
    }

    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    pub fn as_id(mut self) -> Self {
        self.is_id = true;
        self
    }

    pub fn composite(mut self) -> Self {
        self.is_composite = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.is_read_only = true;
        self
    }

    pub fn non_navigable(mut self) -> Self {
        self.is_navigable = false;
        self
    }
}

/// A parameter of a method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub meta: ElementMeta,
    pub ty: TypeRef,
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            meta: ElementMeta::new(name),
            ty: ty.into(),
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// A method of a class
///
/// The return type defaults to the ad hoc `OclVoid` type when none is
/// given. Parameter names are unique within one method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub meta: ElementMeta,
    pub ty: TypeRef,
    pub owner: Option<String>,
    pub is_abstract: bool,
    pub code: String,
    parameters: Vec<Parameter>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: ElementMeta::new(name),
            ty: TypeRef::Named("OclVoid".to_string()),
            owner: None,
            is_abstract: false,
            code: String::new(),
            parameters: Vec::new(),
        }
    }

    pub fn with_return_type(mut self, ty: impl Into<TypeRef>) -> Self {
        self.ty = ty.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Add a parameter
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if a parameter with the same name exists.
    pub fn add_parameter(&mut self, parameter: Parameter) -> Result<()> {
        if self
            .parameters
            .iter()
            .any(|p| p.meta.name == parameter.meta.name)
        {
            return Err(ModelError::DuplicateName {
                kind: "parameter".to_string(),
                name: parameter.meta.name,
            });
        }
        self.parameters.push(parameter);
        Ok(())
    }

    /// Replace the whole parameter collection
    ///
    /// The candidate collection is validated in full before anything is
    /// committed; on failure the previous parameters are untouched.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if two candidates share a name.
    pub fn set_parameters(&mut self, parameters: Vec<Parameter>) -> Result<()> {
        ensure_unique(parameters.iter().map(|p| p.meta.name.as_str()), "parameter")?;
        self.parameters = parameters;
        Ok(())
    }
}

/// Scan a candidate name sequence for duplicates
pub(crate) fn ensure_unique<'a>(
    names: impl Iterator<Item = &'a str>,
    kind: &str,
) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ModelError::DuplicateName {
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
