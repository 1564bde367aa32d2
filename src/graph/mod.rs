//! Directed relationship graph built from the resolved entity set

mod cycle;
mod traversal;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Entity, RelationKind, Relationship};

/// Inferred one/many shape of a relationship edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    #[serde(rename = "N:1")]
    ManyToOne,
    #[serde(rename = "1:N")]
    OneToMany,
    #[serde(rename = "1:1")]
    OneToOne,
}

impl From<RelationKind> for Cardinality {
    fn from(kind: RelationKind) -> Self {
        // Any kind added later defaults to 1:N
        match kind {
            RelationKind::BelongsTo => Cardinality::ManyToOne,
            RelationKind::HasOne => Cardinality::OneToOne,
            RelationKind::HasMany => Cardinality::OneToMany,
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cardinality::ManyToOne => write!(f, "N:1"),
            Cardinality::OneToMany => write!(f, "1:N"),
            Cardinality::OneToOne => write!(f, "1:1"),
        }
    }
}

/// One directed relationship instance between two entities.
///
/// Edges store entity names rather than references; the graph's entity
/// map is the arena they point into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub relationship: Relationship,
    pub cardinality: Cardinality,
    /// Set when a reverse edge between the same two entities exists
    pub bidirectional: bool,
}

/// The domain graph: a name-keyed entity map plus relationship edges.
///
/// Rebuilt from scratch on every analysis run; cross-run state lives in
/// the manifest, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainGraph {
    pub entities: BTreeMap<String, Entity>,
    pub edges: Vec<Edge>,
}

impl DomainGraph {
    /// Build the graph from resolved entities.
    ///
    /// Only relationships marked resolved produce edges; the resolution
    /// pass is trusted to have checked target existence. Cardinality is
    /// inferred from the relationship kind alone.
    pub fn build(entities: Vec<Entity>) -> Self {
        let entities: BTreeMap<String, Entity> = entities
            .into_iter()
            .map(|e| (e.name.clone(), e))
            .collect();

        let mut edges: Vec<Edge> = Vec::new();
        for (name, entity) in &entities {
            for relationship in entity.relationships.values() {
                if !relationship.resolved {
                    continue;
                }

                let mut edge = Edge {
                    from: name.clone(),
                    to: relationship.target.clone(),
                    cardinality: relationship.kind.into(),
                    relationship: relationship.clone(),
                    bidirectional: false,
                };

                // A reverse edge between the same two entities makes the pair bidirectional
                if let Some(reverse) = edges
                    .iter_mut()
                    .find(|e| e.from == edge.to && e.to == edge.from)
                {
                    reverse.bidirectional = true;
                    edge.bidirectional = true;
                }

                edges.push(edge);
            }
        }

        Self { entities, edges }
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
