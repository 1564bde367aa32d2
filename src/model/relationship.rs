//! Relationship declarations between entities

use serde::{Deserialize, Serialize};

/// Kind of a declared relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    BelongsTo,
    HasMany,
    HasOne,
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationKind::BelongsTo => write!(f, "belongs_to"),
            RelationKind::HasMany => write!(f, "has_many"),
            RelationKind::HasOne => write!(f, "has_one"),
        }
    }
}

impl std::str::FromStr for RelationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "belongs_to" => Ok(RelationKind::BelongsTo),
            "has_many" => Ok(RelationKind::HasMany),
            "has_one" => Ok(RelationKind::HasOne),
            _ => anyhow::bail!(
                "Invalid relationship kind: {s}. Valid values: belongs_to, has_many, has_one"
            ),
        }
    }
}

/// A declared relationship from one entity to another.
///
/// The target is a by-name reference; `resolved` is flipped by the
/// resolution pass once the target entity is confirmed to exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub target: String,
    pub foreign_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,
    /// Dot-path marking a pre-declared transitive relationship
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<String>,
    #[serde(skip)]
    pub resolved: bool,
}

impl Relationship {
    pub fn new(
        name: impl Into<String>,
        kind: RelationKind,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            target: target.into(),
            foreign_key: foreign_key.into(),
            inverse: None,
            through: None,
            resolved: false,
        }
    }

    pub fn with_inverse(mut self, inverse: impl Into<String>) -> Self {
        self.inverse = Some(inverse.into());
        self
    }

    pub fn with_through(mut self, through: impl Into<String>) -> Self {
        self.through = Some(through.into());
        self
    }
}
