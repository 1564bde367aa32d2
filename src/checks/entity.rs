//! Per-entity rule checks

use convert_case::{Case, Casing};

use super::SYSTEM_FIELDS;
use crate::graph::DomainGraph;
use crate::issue::AnalysisIssue;
use crate::model::{Entity, RelationKind};

/// Standard `id` and timestamp conventions
pub(super) fn check_standard_fields(entity: &Entity, issues: &mut Vec<AnalysisIssue>) {
    if !entity.has_field("id") {
        issues.push(
            AnalysisIssue::info(
                "missing_id",
                format!("entity '{}' has no 'id' field", entity.name),
            )
            .with_entity(entity.name.clone())
            .with_suggestion("add an 'id' field (uuid or integer)")
            .with_source_path(entity.source_path.clone()),
        );
    }

    if !entity.has_field("created_at") && !entity.has_behavior("timestamps") {
        issues.push(
            AnalysisIssue::info(
                "missing_timestamps",
                format!(
                    "entity '{}' has neither a 'created_at' field nor the 'timestamps' behavior",
                    entity.name
                ),
            )
            .with_entity(entity.name.clone())
            .with_suggestion("add the 'timestamps' behavior")
            .with_source_path(entity.source_path.clone()),
        );
    }
}

/// Foreign-key fields expected by declared relationships
pub(super) fn check_relationship_foreign_keys(
    entity: &Entity,
    graph: &DomainGraph,
    issues: &mut Vec<AnalysisIssue>,
) {
    for relationship in entity.relationships.values() {
        match relationship.kind {
            RelationKind::BelongsTo => {
                if !entity.has_field(&relationship.foreign_key) {
                    issues.push(
                        AnalysisIssue::warning(
                            "missing_fk_field",
                            format!(
                                "belongs_to '{}' expects field '{}' on '{}'",
                                relationship.name, relationship.foreign_key, entity.name
                            ),
                        )
                        .with_entity(entity.name.clone())
                        .with_field(relationship.foreign_key.clone())
                        .with_suggestion(format!(
                            "add a '{}' field to '{}'",
                            relationship.foreign_key, entity.name
                        ))
                        .with_source_path(entity.source_path.clone()),
                    );
                }
            }
            RelationKind::HasMany | RelationKind::HasOne => {
                let Some(target) = graph.entity(&relationship.target) else {
                    continue;
                };
                if !target.has_field(&relationship.foreign_key) {
                    issues.push(
                        AnalysisIssue::warning(
                            "missing_target_fk_field",
                            format!(
                                "{} '{}' expects field '{}' on target '{}'",
                                relationship.kind,
                                relationship.name,
                                relationship.foreign_key,
                                relationship.target
                            ),
                        )
                        .with_entity(entity.name.clone())
                        .with_field(relationship.foreign_key.clone())
                        .with_suggestion(format!(
                            "add a '{}' field to '{}'",
                            relationship.foreign_key, relationship.target
                        ))
                        .with_source_path(entity.source_path.clone()),
                    );
                }
            }
        }
    }
}

fn has_uppercase(name: &str) -> bool {
    name.chars().any(char::is_uppercase)
}

/// Lowercase naming conventions for entities, fields, and relationships
pub(super) fn check_naming(entity: &Entity, issues: &mut Vec<AnalysisIssue>) {
    if has_uppercase(&entity.name) {
        issues.push(
            AnalysisIssue::warning(
                "entity_naming",
                format!("entity name '{}' is not all-lowercase", entity.name),
            )
            .with_entity(entity.name.clone())
            .with_suggestion(format!("rename to '{}'", entity.name.to_case(Case::Snake)))
            .with_source_path(entity.source_path.clone()),
        );
    }

    for field in entity.fields.values() {
        if has_uppercase(&field.name) {
            issues.push(
                AnalysisIssue::warning(
                    "field_naming",
                    format!("field name '{}' is not all-lowercase", field.name),
                )
                .with_entity(entity.name.clone())
                .with_field(field.name.clone())
                .with_suggestion(format!("rename to '{}'", field.name.to_case(Case::Snake)))
                .with_source_path(entity.source_path.clone()),
            );
        }
    }

    for relationship in entity.relationships.values() {
        if has_uppercase(&relationship.name) {
            issues.push(
                AnalysisIssue::warning(
                    "relationship_naming",
                    format!(
                        "relationship name '{}' is not all-lowercase",
                        relationship.name
                    ),
                )
                .with_entity(entity.name.clone())
                .with_suggestion(format!(
                    "rename to '{}'",
                    relationship.name.to_case(Case::Snake)
                ))
                .with_source_path(entity.source_path.clone()),
            );
        }
    }
}

/// Index expectations for filterable and foreign-key fields
pub(super) fn check_indexes(entity: &Entity, issues: &mut Vec<AnalysisIssue>) {
    for field in entity.fields.values() {
        let indexed = field.index || field.unique;

        if field.ui.filterable && !indexed {
            issues.push(
                AnalysisIssue::warning(
                    "unindexed_filterable",
                    format!(
                        "filterable field '{}.{}' has neither index nor unique",
                        entity.name, field.name
                    ),
                )
                .with_entity(entity.name.clone())
                .with_field(field.name.clone())
                .with_suggestion(format!("add an index to '{}'", field.name))
                .with_source_path(entity.source_path.clone()),
            );
        }

        if field.foreign_key.is_some() && !indexed {
            issues.push(
                AnalysisIssue::info(
                    "unindexed_foreign_key",
                    format!(
                        "foreign-key field '{}.{}' has neither index nor unique",
                        entity.name, field.name
                    ),
                )
                .with_entity(entity.name.clone())
                .with_field(field.name.clone())
                .with_suggestion(format!("add an index to '{}'", field.name))
                .with_source_path(entity.source_path.clone()),
            );
        }
    }
}

/// Presentation metadata on non-system fields
pub(super) fn check_ui_metadata(entity: &Entity, issues: &mut Vec<AnalysisIssue>) {
    for field in entity.fields.values() {
        if SYSTEM_FIELDS.contains(&field.name.as_str()) {
            continue;
        }

        if field.ui.is_blank() {
            issues.push(
                AnalysisIssue::info(
                    "missing_ui_metadata",
                    format!(
                        "field '{}.{}' has no label, display type, or group",
                        entity.name, field.name
                    ),
                )
                .with_entity(entity.name.clone())
                .with_field(field.name.clone())
                .with_source_path(entity.source_path.clone()),
            );
        }
    }
}
