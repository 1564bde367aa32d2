//! Discovery of implicit multi-hop relationships.
//!
//! Walks `has_many`/`has_one` chains breadth-first from every entity and
//! proposes transitive relationships of two or more hops that are not
//! directly declared. For a fixed graph and configuration the output is
//! fully deterministic; manifest suggestion identity depends on that.

mod naming;


use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use tracing::warn;

use crate::graph::DomainGraph;
use crate::issue::AnalysisIssue;
use crate::model::{Entity, RelationKind};

fn default_max_depth() -> usize {
    3
}

fn default_exclude_entities() -> Vec<String> {
    ["tenant", "workspace", "organization"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_exclude_patterns() -> Vec<String> {
    [r"_audit$", r"_log$", r"_history$"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Options recognized by the suggester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggesterConfig {
    /// Maximum hop count explored per source entity
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Entity names never used as intermediaries or endpoints
    #[serde(default = "default_exclude_entities")]
    pub exclude_entities: Vec<String>,
    /// Name regexes excluded the same way
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            exclude_entities: default_exclude_entities(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

/// One hop along a transitive path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitiveHop {
    /// Entity reached by this hop
    pub entity: String,
    /// Relationship name traversed
    pub relationship: String,
    /// Foreign key used at this hop
    pub foreign_key: String,
}

/// A discovered multi-hop relationship, ready to propose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitivePath {
    pub source: String,
    pub target: String,
    pub hops: Vec<TransitiveHop>,
    pub suggested_name: String,
    /// Dot-joined relationship names describing the route
    pub through_path: String,
    /// Ready-to-paste declaration of the suggested relationship
    pub snippet: String,
}

/// A proposed transitive relationship: an info issue plus the path payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitiveSuggestion {
    pub issue: AnalysisIssue,
    pub path: TransitivePath,
}

/// Find undeclared multi-hop relationships across the whole graph
pub fn find_transitive(graph: &DomainGraph, config: &SuggesterConfig) -> Vec<TransitiveSuggestion> {
    let patterns = compile_patterns(&config.exclude_patterns);
    let mut suggestions = Vec::new();

    for source in graph.entities.keys() {
        if is_excluded(source, config, &patterns) {
            continue;
        }
        walk_from(graph, source, config, &patterns, &mut suggestions);
    }

    suggestions
}

fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("skipping invalid exclude pattern '{pattern}': {e}");
                None
            }
        })
        .collect()
}

fn is_excluded(name: &str, config: &SuggesterConfig, patterns: &[Regex]) -> bool {
    config.exclude_entities.iter().any(|e| e == name)
        || patterns.iter().any(|re| re.is_match(name))
}

/// Breadth-first walk from one source entity.
///
/// Depth counts edges already taken; a candidate is emitted when an edge
/// is taken from a node at depth >= 1, i.e. the resulting path has at
/// least two hops. The visited set guarantees termination on cyclic
/// graphs and at most one path per (source, target) pair.
fn walk_from(
    graph: &DomainGraph,
    source: &str,
    config: &SuggesterConfig,
    patterns: &[Regex],
    out: &mut Vec<TransitiveSuggestion>,
) {
    let Some(source_entity) = graph.entity(source) else {
        return;
    };

    let mut visited: BTreeSet<String> = BTreeSet::new();
    visited.insert(source.to_string());

    let mut queue: VecDeque<(String, usize, Vec<TransitiveHop>)> = VecDeque::new();
    queue.push_back((source.to_string(), 0, Vec::new()));

    while let Some((current, depth, path)) = queue.pop_front() {
        let Some(entity) = graph.entity(&current) else {
            continue;
        };

        for relationship in entity.relationships.values() {
            if !matches!(
                relationship.kind,
                RelationKind::HasMany | RelationKind::HasOne
            ) {
                continue;
            }
            // Pre-declared transitive relationships are not re-traversed
            if relationship.through.is_some() || !relationship.resolved {
                continue;
            }
            if visited.contains(&relationship.target)
                || is_excluded(&relationship.target, config, patterns)
            {
                continue;
            }

            visited.insert(relationship.target.clone());

            let mut hops = path.clone();
            hops.push(TransitiveHop {
                entity: relationship.target.clone(),
                relationship: relationship.name.clone(),
                foreign_key: relationship.foreign_key.clone(),
            });

            if depth >= 1 && !has_direct_relationship(source_entity, &relationship.target) {
                out.push(build_suggestion(graph, source, &relationship.target, &hops));
            }

            if depth + 1 < config.max_depth {
                queue.push_back((relationship.target.clone(), depth + 1, hops));
            }
        }
    }
}

fn has_direct_relationship(source: &Entity, target: &str) -> bool {
    source
        .relationships
        .values()
        .any(|r| r.target == target && r.through.is_none())
}

fn build_suggestion(
    graph: &DomainGraph,
    source: &str,
    target: &str,
    hops: &[TransitiveHop],
) -> TransitiveSuggestion {
    let through_path = hops
        .iter()
        .map(|h| h.relationship.as_str())
        .collect::<Vec<_>>()
        .join(".");

    let target_plural = graph
        .entity(target)
        .map(Entity::plural_form)
        .unwrap_or_else(|| format!("{target}s"));
    let suggested_name = naming::suggest_name(&hops[0].relationship, &target_plural);
    let snippet = naming::snippet(&suggested_name, target, &through_path);

    let issue = AnalysisIssue::info(
        "transitive_relationship",
        format!("'{source}' can reach '{target}' through {through_path}"),
    )
    .with_entity(source)
    .with_suggestion(format!("add relationship '{suggested_name}'"));

    TransitiveSuggestion {
        issue,
        path: TransitivePath {
            source: source.to_string(),
            target: target.to_string(),
            hops: hops.to_vec(),
            suggested_name,
            through_path,
            snippet,
        },
    }
}
