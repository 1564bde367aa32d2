//! Aggregate statistics over the domain graph

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::DomainGraph;

/// Counts and distributions computed in a single pass.
///
/// A pure reduction: no side effects, no issues, always succeeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub entities: usize,
    pub fields: usize,
    pub relationships: usize,
    pub fields_by_type: BTreeMap<String, usize>,
    pub relationships_by_kind: BTreeMap<String, usize>,
    pub entities_with_behaviors: usize,
    pub avg_fields_per_entity: f64,
}

impl Statistics {
    pub fn compute(graph: &DomainGraph) -> Self {
        let mut stats = Self {
            entities: graph.entity_count(),
            ..Self::default()
        };

        for entity in graph.entities.values() {
            stats.fields += entity.fields.len();
            stats.relationships += entity.relationships.len();

            if !entity.behaviors.is_empty() {
                stats.entities_with_behaviors += 1;
            }

            for field in entity.fields.values() {
                *stats
                    .fields_by_type
                    .entry(field.field_type.to_string())
                    .or_default() += 1;
            }

            for relationship in entity.relationships.values() {
                *stats
                    .relationships_by_kind
                    .entry(relationship.kind.to_string())
                    .or_default() += 1;
            }
        }

        if stats.entities > 0 {
            stats.avg_fields_per_entity = stats.fields as f64 / stats.entities as f64;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Field, FieldType, RelationKind, Relationship};

    #[test]
    fn test_empty_graph_has_zero_average() {
        let stats = Statistics::compute(&DomainGraph::default());

        assert_eq!(stats.entities, 0);
        assert_eq!(stats.avg_fields_per_entity, 0.0);
    }

    #[test]
    fn test_counts_and_distributions() {
        let entities = vec![
            Entity::new("person")
                .with_field(Field::new("id", FieldType::Uuid))
                .with_field(Field::new("name", FieldType::String))
                .with_behavior("timestamps")
                .with_relationship(Relationship::new(
                    "meetings",
                    RelationKind::HasMany,
                    "meeting",
                    "person_id",
                )),
            Entity::new("meeting")
                .with_field(Field::new("id", FieldType::Uuid))
                .with_field(Field::new("held_on", FieldType::Date)),
        ];
        let stats = Statistics::compute(&DomainGraph::build(entities));

        assert_eq!(stats.entities, 2);
        assert_eq!(stats.fields, 4);
        assert_eq!(stats.relationships, 1);
        assert_eq!(stats.fields_by_type["uuid"], 2);
        assert_eq!(stats.fields_by_type["string"], 1);
        assert_eq!(stats.relationships_by_kind["has_many"], 1);
        assert_eq!(stats.entities_with_behaviors, 1);
        assert_eq!(stats.avg_fields_per_entity, 2.0);
    }
}
