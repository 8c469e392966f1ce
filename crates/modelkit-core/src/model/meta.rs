use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ModelError, Result};

// Global construction sequence. Timestamps alone cannot break ties between
// elements created within the same clock tick, so ordering is carried by
// this counter and the timestamp stays informational.
static NEXT_ORDER: AtomicU64 = AtomicU64::new(1);

/// Visibility of a named element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
    Package,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Package => "package",
        }
    }
}

impl FromStr for Visibility {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "protected" => Ok(Visibility::Protected),
            "package" => Ok(Visibility::Package),
            other => Err(ModelError::InvalidValue {
                reason: format!("invalid visibility: {other}"),
            }),
        }
    }
}

/// Common identity and metadata carried by every named element
///
/// The `order` marker is a process-wide monotonically increasing sequence
/// assigned at construction: sorting by it reproduces construction order
/// deterministically. The exact value is not semantically meaningful, only
/// the relative order is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementMeta {
    /// Unique identifier for this element (UUID v7)
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Construction-order marker (monotonic, process-wide)
    pub order: u64,

    /// Timestamp when this element was created
    pub created_at: DateTime<Utc>,

    /// Optional ordered list of synonyms
    pub synonyms: Option<Vec<String>>,

    /// Visibility of the element
    pub visibility: Visibility,
}

impl ElementMeta {
    /// Create metadata for a new element with a fresh id and order marker
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            order: NEXT_ORDER.fetch_add(1, Ordering::Relaxed),
            created_at: Utc::now(),
            synonyms: None,
            visibility: Visibility::default(),
        }
    }

    pub fn with_synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.synonyms = Some(synonyms);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}
