//! End-to-end analysis over YAML-defined entities

use lattice::analysis::analyze;
use lattice::issue::Severity;
use lattice::model::Entity;
use lattice::stats::Statistics;
use lattice::suggest::{find_transitive, SuggesterConfig};

fn load_fixture_entities() -> Vec<Entity> {
    let person = r#"
name: person
plural: people
table: people
behaviors: [timestamps]
fields:
  id:
    name: id
    type: uuid
    required: true
    unique: true
  full_name:
    name: full_name
    type: string
    required: true
    ui:
      label: Full name
      group: identity
relationships:
  meetings:
    name: meetings
    type: has_many
    target: meeting
    foreign_key: person_id
"#;

    let meeting = r#"
name: meeting
plural: meetings
table: meetings
behaviors: [timestamps]
fields:
  id:
    name: id
    type: uuid
    required: true
    unique: true
  person_id:
    name: person_id
    type: uuid
    index: true
relationships:
  person:
    name: person
    type: belongs_to
    target: person
    foreign_key: person_id
  action_items:
    name: action_items
    type: has_many
    target: action_item
    foreign_key: meeting_id
"#;

    let action_item = r#"
name: action_item
plural: action_items
table: action_items
behaviors: [timestamps]
fields:
  id:
    name: id
    type: uuid
    required: true
    unique: true
  meeting_id:
    name: meeting_id
    type: uuid
    index: true
  title:
    name: title
    type: string
    required: true
    ui:
      label: Title
"#;

    [person, meeting, action_item]
        .iter()
        .map(|yaml| serde_yaml::from_str(yaml).expect("fixture should parse"))
        .collect()
}

#[test]
fn analyzes_clean_model_as_valid() {
    let result = analyze(load_fixture_entities(), Vec::new());

    assert!(result.valid);
    assert_eq!(result.graph.entity_count(), 3);
    // person->meeting, meeting->person, meeting->action_item
    assert_eq!(result.graph.edge_count(), 3);
    assert!(result.issues.iter().all(|i| i.severity != Severity::Error));
}

#[test]
fn statistics_reflect_the_fixture_model() {
    let result = analyze(load_fixture_entities(), Vec::new());
    let stats: &Statistics = &result.statistics;

    assert_eq!(stats.entities, 3);
    assert_eq!(stats.fields, 7);
    assert_eq!(stats.relationships, 3);
    assert_eq!(stats.fields_by_type["uuid"], 5);
    assert_eq!(stats.relationships_by_kind["has_many"], 2);
    assert_eq!(stats.relationships_by_kind["belongs_to"], 1);
    assert_eq!(stats.entities_with_behaviors, 3);
}

#[test]
fn load_errors_flip_validity_but_analysis_continues() {
    // The meeting file failed to load; person still references it
    let mut entities = load_fixture_entities();
    entities.retain(|e| e.name != "meeting");

    let load_issue = lattice::issue::AnalysisIssue::error(
        "parse_failure",
        "entities/meeting.yaml did not parse",
    );
    let result = analyze(entities, vec![load_issue]);

    assert!(!result.valid);
    // The dangling reference surfaces as a resolve error
    assert!(result
        .issues
        .iter()
        .any(|i| i.issue_type == "missing_target"));
    // The remaining entities still analyzed
    assert_eq!(result.graph.entity_count(), 2);
    assert_eq!(result.statistics.entities, 2);
}

#[test]
fn suggester_finds_the_two_hop_path_in_the_fixture() {
    let result = analyze(load_fixture_entities(), Vec::new());
    let suggestions = find_transitive(&result.graph, &SuggesterConfig::default());

    assert_eq!(suggestions.len(), 1);
    let path = &suggestions[0].path;
    assert_eq!(path.source, "person");
    assert_eq!(path.target, "action_item");
    assert_eq!(path.suggested_name, "meeting_action_items");
    assert_eq!(path.through_path, "meetings.action_items");
}

#[test]
fn repeated_analysis_is_byte_identical() {
    let first = analyze(load_fixture_entities(), Vec::new());
    let second = analyze(load_fixture_entities(), Vec::new());

    assert_eq!(
        serde_json::to_string(&first.issues).unwrap(),
        serde_json::to_string(&second.issues).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.statistics).unwrap(),
        serde_json::to_string(&second.statistics).unwrap()
    );

    let first_suggestions = find_transitive(&first.graph, &SuggesterConfig::default());
    let second_suggestions = find_transitive(&second.graph, &SuggesterConfig::default());
    assert_eq!(
        serde_json::to_string(&first_suggestions).unwrap(),
        serde_json::to_string(&second_suggestions).unwrap()
    );
}
