//! Persisted manifest: graph snapshot plus suggestion lifecycle.
//!
//! The manifest is the only cross-run state in the analyzer. It records a
//! content hash of the entity definition sources for staleness detection,
//! a light projection of every entity, a graph summary, and the suggestion
//! records whose accept/skip decisions must survive re-scans.

mod hash;
mod store;


pub use hash::content_hash;
pub use store::{ManifestStore, DEFAULT_MANIFEST_DIR, MANIFEST_FILE};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::{Cardinality, DomainGraph};
use crate::model::{Entity, Field, FieldType, ForeignKeyRef, RelationKind, Relationship};
use crate::suggest::TransitivePath;

/// Manifest schema version; bump on incompatible shape changes
pub const MANIFEST_VERSION: u32 = 1;

/// Lifecycle status of a recorded suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    /// Detected, awaiting a decision
    Pending,
    /// Accepted by a human decision
    Accepted,
    /// Skipped by a human decision
    Skipped,
}

impl std::fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionStatus::Pending => write!(f, "pending"),
            SuggestionStatus::Accepted => write!(f, "accepted"),
            SuggestionStatus::Skipped => write!(f, "skipped"),
        }
    }
}

impl std::str::FromStr for SuggestionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SuggestionStatus::Pending),
            "accepted" => Ok(SuggestionStatus::Accepted),
            "skipped" => Ok(SuggestionStatus::Skipped),
            _ => anyhow::bail!(
                "Invalid suggestion status: {s}. Valid values: pending, accepted, skipped"
            ),
        }
    }
}

/// A suggestion record with cross-run identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestSuggestion {
    /// Stable id, `{source}->{target}`
    pub id: String,
    pub source: String,
    pub target: String,
    pub through_path: String,
    pub suggested_name: String,
    pub snippet: String,
    pub status: SuggestionStatus,
    pub detected_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ManifestSuggestion {
    /// Stable identity for a (source, target) pair
    pub fn suggestion_id(source: &str, target: &str) -> String {
        format!("{source}->{target}")
    }

    /// Fresh pending record for a newly detected path
    pub fn from_detected(path: &TransitivePath, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::suggestion_id(&path.source, &path.target),
            source: path.source.clone(),
            target: path.target.clone(),
            through_path: path.through_path.clone(),
            suggested_name: path.suggested_name.clone(),
            snippet: path.snippet.clone(),
            status: SuggestionStatus::Pending,
            detected_at: now,
            resolved_at: None,
        }
    }

    /// Whether a human decision has been recorded
    pub fn is_resolved(&self) -> bool {
        matches!(
            self.status,
            SuggestionStatus::Accepted | SuggestionStatus::Skipped
        )
    }
}

/// Field projection stored in the manifest, UI metadata omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestField {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    pub nullable: bool,
    pub unique: bool,
    pub index: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyRef>,
}

impl From<&Field> for ManifestField {
    fn from(field: &Field) -> Self {
        Self {
            field_type: field.field_type,
            required: field.required,
            nullable: field.nullable,
            unique: field.unique,
            index: field.index,
            foreign_key: field.foreign_key.clone(),
        }
    }
}

/// Relationship projection stored in the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRelationship {
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub target: String,
    pub foreign_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<String>,
}

impl From<&Relationship> for ManifestRelationship {
    fn from(relationship: &Relationship) -> Self {
        Self {
            kind: relationship.kind,
            target: relationship.target.clone(),
            foreign_key: relationship.foreign_key.clone(),
            inverse: relationship.inverse.clone(),
            through: relationship.through.clone(),
        }
    }
}

/// Entity projection stored in the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntity {
    pub name: String,
    pub plural: String,
    pub table: String,
    #[serde(default)]
    pub fields: BTreeMap<String, ManifestField>,
    #[serde(default)]
    pub relationships: BTreeMap<String, ManifestRelationship>,
    #[serde(default)]
    pub behaviors: Vec<String>,
}

impl From<&Entity> for ManifestEntity {
    fn from(entity: &Entity) -> Self {
        Self {
            name: entity.name.clone(),
            plural: entity.plural_form(),
            table: entity.table_name(),
            fields: entity
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), ManifestField::from(field)))
                .collect(),
            relationships: entity
                .relationships
                .iter()
                .map(|(name, rel)| (name.clone(), ManifestRelationship::from(rel)))
                .collect(),
            behaviors: entity.behaviors.clone(),
        }
    }
}

/// One edge in the persisted graph summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSummary {
    pub from: String,
    pub to: String,
    /// Name of the relationship behind the edge
    pub relationship: String,
    pub cardinality: Cardinality,
    pub bidirectional: bool,
}

/// Serialized shape of the built graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub edges: Vec<EdgeSummary>,
    pub orphans: Vec<String>,
    pub cycles: Vec<Vec<String>>,
}

impl GraphSummary {
    pub fn from_graph(graph: &DomainGraph) -> Self {
        Self {
            edges: graph
                .edges
                .iter()
                .map(|edge| EdgeSummary {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    relationship: edge.relationship.name.clone(),
                    cardinality: edge.cardinality,
                    bidirectional: edge.bidirectional,
                })
                .collect(),
            orphans: graph.orphans(),
            cycles: graph.circular_dependencies(),
        }
    }
}

/// The persisted snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    /// Hash of the entity definition sources this snapshot was built from
    pub content_hash: String,
    pub entities: BTreeMap<String, ManifestEntity>,
    pub graph: GraphSummary,
    #[serde(default)]
    pub suggestions: Vec<ManifestSuggestion>,
}

impl Manifest {
    /// Assemble a manifest from a built graph and merged suggestions
    pub fn build(
        graph: &DomainGraph,
        content_hash: impl Into<String>,
        suggestions: Vec<ManifestSuggestion>,
    ) -> Self {
        Self {
            version: MANIFEST_VERSION,
            generated_at: Utc::now(),
            content_hash: content_hash.into(),
            entities: graph
                .entities
                .values()
                .map(|entity| (entity.name.clone(), ManifestEntity::from(entity)))
                .collect(),
            graph: GraphSummary::from_graph(graph),
            suggestions,
        }
    }

    pub fn suggestion(&self, id: &str) -> Option<&ManifestSuggestion> {
        self.suggestions.iter().find(|s| s.id == id)
    }
}
