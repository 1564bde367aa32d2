//! Consistency rules over entities and the built graph

mod entity;
mod graph;

#[cfg(test)]
mod tests;

use crate::graph::DomainGraph;
use crate::issue::AnalysisIssue;

/// Fields exempt from UI-metadata expectations
pub const SYSTEM_FIELDS: &[&str] = &["id", "created_at", "updated_at", "deleted_at", "tenant_id"];

/// Run every rule family.
///
/// Entity rules run in graph-map iteration order, then graph-level rules,
/// so output order is stable run to run. No rule here raises error
/// severity; invalidity is reserved for load and resolution failures.
pub fn run_checks(graph: &DomainGraph) -> Vec<AnalysisIssue> {
    let mut issues = Vec::new();

    for entity in graph.entities.values() {
        entity::check_standard_fields(entity, &mut issues);
        entity::check_relationship_foreign_keys(entity, graph, &mut issues);
        entity::check_naming(entity, &mut issues);
        entity::check_indexes(entity, &mut issues);
        entity::check_ui_metadata(entity, &mut issues);
    }

    graph::check_orphans(graph, &mut issues);
    graph::check_cycles(graph, &mut issues);
    graph::check_missing_inverses(graph, &mut issues);

    issues
}
