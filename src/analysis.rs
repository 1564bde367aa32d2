//! Full analysis pass over a loaded entity set.
//!
//! One synchronous run: resolve references, build the graph, run the
//! consistency rules, compute statistics. The upstream loader remains a
//! collaborator; its issues are passed in and lead the combined list.

use serde::Serialize;
use tracing::debug;

use crate::checks;
use crate::graph::DomainGraph;
use crate::issue::AnalysisIssue;
use crate::model::Entity;
use crate::resolve::resolve_references;
use crate::stats::Statistics;

/// Everything one analysis run produces for downstream consumers
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub graph: DomainGraph,
    /// Load issues, then resolve issues, then consistency issues
    pub issues: Vec<AnalysisIssue>,
    pub statistics: Statistics,
    /// True iff no issue has error severity
    pub valid: bool,
}

impl AnalysisResult {
    /// Resolved entities, in graph-map order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.graph.entities.values()
    }

    pub fn errors(&self) -> impl Iterator<Item = &AnalysisIssue> {
        self.issues.iter().filter(|i| i.is_error())
    }
}

/// Analyze a loaded entity set.
///
/// `load_issues` come from the loading collaborator and may already
/// contain errors; the consistency rules themselves never produce any,
/// so validity is controlled by loading and resolution alone.
pub fn analyze(mut entities: Vec<Entity>, load_issues: Vec<AnalysisIssue>) -> AnalysisResult {
    let mut issues = load_issues;
    issues.extend(resolve_references(&mut entities));

    let graph = DomainGraph::build(entities);
    debug!(
        entities = graph.entity_count(),
        edges = graph.edge_count(),
        "built domain graph"
    );

    issues.extend(checks::run_checks(&graph));
    let statistics = Statistics::compute(&graph);
    let valid = !issues.iter().any(AnalysisIssue::is_error);

    AnalysisResult {
        graph,
        issues,
        statistics,
        valid,
    }
}
