//! Cross-entity reference resolution.
//!
//! Runs once per analysis, before graph construction: flips each
//! relationship's `resolved` flag against the loaded entity set and emits
//! the only error-severity issues the core produces. Resolution never
//! aborts on the first failure; issues accumulate across all entities so
//! one bad definition does not hide the rest.

use std::collections::BTreeSet;

use crate::issue::AnalysisIssue;
use crate::model::Entity;

/// Resolve relationship targets and foreign-key table references.
///
/// Duplicate entity names are dropped after the first occurrence.
/// Relationships whose target is missing stay unresolved and are later
/// skipped by the graph builder.
pub fn resolve_references(entities: &mut Vec<Entity>) -> Vec<AnalysisIssue> {
    let mut issues = Vec::new();

    // Drop duplicates before anything else resolves against the set
    let mut seen = BTreeSet::new();
    entities.retain(|entity| {
        if seen.contains(&entity.name) {
            issues.push(
                AnalysisIssue::error(
                    "duplicate_entity",
                    format!("duplicate entity name '{}'", entity.name),
                )
                .with_entity(entity.name.clone())
                .with_source_path(entity.source_path.clone()),
            );
            false
        } else {
            seen.insert(entity.name.clone());
            true
        }
    });

    let names: BTreeSet<String> = entities.iter().map(|e| e.name.clone()).collect();
    let tables: BTreeSet<String> = entities.iter().map(Entity::table_name).collect();

    for entity in entities.iter_mut() {
        for field in entity.fields.values() {
            if let Err(e) = field.validate() {
                issues.push(
                    AnalysisIssue::error("invalid_field", e.to_string())
                        .with_entity(entity.name.clone())
                        .with_field(field.name.clone())
                        .with_source_path(entity.source_path.clone()),
                );
            }

            if let Some(fk) = &field.foreign_key {
                if !tables.contains(&fk.table) {
                    issues.push(
                        AnalysisIssue::error(
                            "unknown_fk_table",
                            format!(
                                "field '{}' references unknown table '{}'",
                                field.name, fk.table
                            ),
                        )
                        .with_entity(entity.name.clone())
                        .with_field(field.name.clone())
                        .with_source_path(entity.source_path.clone()),
                    );
                }
            }
        }

        for relationship in entity.relationships.values_mut() {
            if names.contains(&relationship.target) {
                relationship.resolved = true;
            } else {
                issues.push(
                    AnalysisIssue::error(
                        "missing_target",
                        format!(
                            "relationship '{}' references unknown entity '{}'",
                            relationship.name, relationship.target
                        ),
                    )
                    .with_entity(entity.name.clone())
                    .with_source_path(entity.source_path.clone()),
                );
            }
        }
    }

    issues
}
