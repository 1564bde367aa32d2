//! Tests for the consistency rules

use super::*;
use crate::issue::Severity;
use crate::model::{Entity, Field, FieldType, RelationKind, Relationship, UiMeta};
use crate::resolve::resolve_references;

fn checked(mut entities: Vec<Entity>) -> Vec<AnalysisIssue> {
    resolve_references(&mut entities);
    run_checks(&DomainGraph::build(entities))
}

fn issues_of_type<'a>(issues: &'a [AnalysisIssue], issue_type: &str) -> Vec<&'a AnalysisIssue> {
    issues
        .iter()
        .filter(|i| i.issue_type == issue_type)
        .collect()
}

fn id_field() -> Field {
    Field::new("id", FieldType::Uuid).with_required().with_unique()
}

#[test]
fn test_missing_id_reported_as_info() {
    let issues = checked(vec![Entity::new("person")]);

    let found = issues_of_type(&issues, "missing_id");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Info);
}

#[test]
fn test_timestamps_behavior_suppresses_missing_timestamps() {
    let with_behavior = checked(vec![Entity::new("person")
        .with_field(id_field())
        .with_behavior("timestamps")]);
    assert!(issues_of_type(&with_behavior, "missing_timestamps").is_empty());

    let without = checked(vec![Entity::new("person").with_field(id_field())]);
    assert_eq!(issues_of_type(&without, "missing_timestamps").len(), 1);
}

#[test]
fn test_belongs_to_without_fk_field_warns() {
    let issues = checked(vec![
        Entity::new("meeting").with_relationship(Relationship::new(
            "person",
            RelationKind::BelongsTo,
            "person",
            "person_id",
        )),
        Entity::new("person"),
    ]);

    let found = issues_of_type(&issues, "missing_fk_field");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Warning);
    assert_eq!(found[0].entity.as_deref(), Some("meeting"));
    assert_eq!(found[0].field.as_deref(), Some("person_id"));
}

#[test]
fn test_has_many_target_missing_fk_field_warns() {
    let issues = checked(vec![
        Entity::new("person").with_relationship(Relationship::new(
            "meetings",
            RelationKind::HasMany,
            "meeting",
            "person_id",
        )),
        Entity::new("meeting"),
    ]);

    let found = issues_of_type(&issues, "missing_target_fk_field");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].entity.as_deref(), Some("person"));
}

#[test]
fn test_has_many_target_with_fk_field_is_clean() {
    let issues = checked(vec![
        Entity::new("person").with_relationship(Relationship::new(
            "meetings",
            RelationKind::HasMany,
            "meeting",
            "person_id",
        )),
        Entity::new("meeting").with_field(Field::new("person_id", FieldType::Uuid).with_index()),
    ]);

    assert!(issues_of_type(&issues, "missing_target_fk_field").is_empty());
}

#[test]
fn test_naming_rules_suggest_snake_case() {
    let issues = checked(vec![Entity::new("UserProfile")
        .with_field(Field::new("displayName", FieldType::String))]);

    let entity_naming = issues_of_type(&issues, "entity_naming");
    assert_eq!(entity_naming.len(), 1);
    assert_eq!(
        entity_naming[0].suggestion.as_deref(),
        Some("rename to 'user_profile'")
    );

    let field_naming = issues_of_type(&issues, "field_naming");
    assert_eq!(field_naming.len(), 1);
    assert_eq!(
        field_naming[0].suggestion.as_deref(),
        Some("rename to 'display_name'")
    );
}

#[test]
fn test_unindexed_filterable_warns_and_unique_counts_as_indexed() {
    let filterable = |name: &str| {
        Field::new(name, FieldType::String).with_ui(UiMeta {
            filterable: true,
            ..UiMeta::default()
        })
    };

    let issues = checked(vec![Entity::new("person")
        .with_field(filterable("status"))
        .with_field(filterable("email").with_unique())]);

    let found = issues_of_type(&issues, "unindexed_filterable");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].field.as_deref(), Some("status"));
}

#[test]
fn test_unindexed_foreign_key_is_softer_info() {
    let issues = checked(vec![
        Entity::new("task")
            .with_field(Field::new("owner_id", FieldType::Uuid).with_foreign_key("persons")),
        Entity::new("person"),
    ]);

    let found = issues_of_type(&issues, "unindexed_foreign_key");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Info);
}

#[test]
fn test_system_fields_exempt_from_ui_metadata() {
    let issues = checked(vec![Entity::new("person")
        .with_field(id_field())
        .with_field(Field::new("created_at", FieldType::DateTime))
        .with_field(Field::new("nickname", FieldType::String))]);

    let found = issues_of_type(&issues, "missing_ui_metadata");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].field.as_deref(), Some("nickname"));
}

#[test]
fn test_orphan_entities_reported() {
    let issues = checked(vec![
        Entity::new("person").with_relationship(Relationship::new(
            "meetings",
            RelationKind::HasMany,
            "meeting",
            "person_id",
        )),
        Entity::new("meeting"),
        Entity::new("audit_log"),
    ]);

    let found = issues_of_type(&issues, "orphan_entity");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].entity.as_deref(), Some("audit_log"));
}

#[test]
fn test_cycle_issue_includes_full_path() {
    let issues = checked(vec![
        Entity::new("a").with_relationship(Relationship::new(
            "b",
            RelationKind::BelongsTo,
            "b",
            "b_id",
        )),
        Entity::new("b").with_relationship(Relationship::new(
            "a",
            RelationKind::BelongsTo,
            "a",
            "a_id",
        )),
    ]);

    let found = issues_of_type(&issues, "circular_dependency");
    assert_eq!(found.len(), 1);
    assert!(found[0].message.contains("a -> b -> a"));
}

#[test]
fn test_belongs_to_never_needs_explicit_inverse() {
    // meeting belongs_to person, person declares nothing back
    let issues = checked(vec![
        Entity::new("meeting").with_relationship(Relationship::new(
            "person",
            RelationKind::BelongsTo,
            "person",
            "person_id",
        )),
        Entity::new("person"),
    ]);

    assert!(issues_of_type(&issues, "missing_inverse").is_empty());
}

#[test]
fn test_has_many_without_inverse_reported() {
    let issues = checked(vec![
        Entity::new("person").with_relationship(Relationship::new(
            "meetings",
            RelationKind::HasMany,
            "meeting",
            "person_id",
        )),
        Entity::new("meeting"),
    ]);

    let found = issues_of_type(&issues, "missing_inverse");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].entity.as_deref(), Some("meeting"));
}

#[test]
fn test_no_rule_raises_error_severity() {
    // A deliberately messy model: bad naming, missing fks, orphans, cycles
    let issues = checked(vec![
        Entity::new("BadName").with_relationship(Relationship::new(
            "other",
            RelationKind::HasMany,
            "other",
            "bad_id",
        )),
        Entity::new("other").with_relationship(Relationship::new(
            "BadName",
            RelationKind::HasMany,
            "BadName",
            "other_id",
        )),
        Entity::new("loner"),
    ]);

    assert!(!issues.is_empty());
    assert!(issues.iter().all(|i| i.severity != Severity::Error));
}
