//! Graph-level rule checks

use crate::graph::DomainGraph;
use crate::issue::AnalysisIssue;
use crate::model::RelationKind;

/// Entities with no edges in either direction
pub(super) fn check_orphans(graph: &DomainGraph, issues: &mut Vec<AnalysisIssue>) {
    for name in graph.orphans() {
        issues.push(
            AnalysisIssue::info(
                "orphan_entity",
                format!("entity '{name}' has no relationships to or from any other entity"),
            )
            .with_entity(name),
        );
    }
}

/// One issue per deduplicated dependency cycle
pub(super) fn check_cycles(graph: &DomainGraph, issues: &mut Vec<AnalysisIssue>) {
    for cycle in graph.circular_dependencies() {
        issues.push(AnalysisIssue::info(
            "circular_dependency",
            format!("circular dependency: {}", cycle.join(" -> ")),
        ));
    }
}

/// Edges whose target declares no relationship back at the source.
///
/// belongs_to edges are exempt: a has_many on the other side is the
/// implicit inverse, so they never need an explicit one.
pub(super) fn check_missing_inverses(graph: &DomainGraph, issues: &mut Vec<AnalysisIssue>) {
    for edge in &graph.edges {
        if edge.relationship.kind == RelationKind::BelongsTo {
            continue;
        }

        let Some(target) = graph.entity(&edge.to) else {
            continue;
        };

        let has_inverse = target
            .relationships
            .values()
            .any(|r| r.target == edge.from);

        if !has_inverse {
            issues.push(
                AnalysisIssue::info(
                    "missing_inverse",
                    format!(
                        "'{}' has no relationship back to '{}' for {} '{}'",
                        edge.to, edge.from, edge.relationship.kind, edge.relationship.name
                    ),
                )
                .with_entity(edge.to.clone())
                .with_suggestion(format!(
                    "add a belongs_to '{}' relationship on '{}'",
                    edge.from, edge.to
                )),
            );
        }
    }
}
