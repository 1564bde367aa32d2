//! Cycle detection over the directed edge set

use std::collections::{BTreeMap, BTreeSet};

use super::DomainGraph;

impl DomainGraph {
    /// Detect circular dependencies among directed edges using DFS.
    ///
    /// Each cycle is reported as the ordered entity-name path from the
    /// point the cycle closes back to itself, with the closing name
    /// repeated at the end. Traversals of the same cycle reached from
    /// different starting points are deduplicated.
    pub fn circular_dependencies(&self) -> Vec<Vec<String>> {
        let mut adjacency: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for edge in &self.edges {
            adjacency
                .entry(edge.from.as_str())
                .or_default()
                .push(edge.to.as_str());
        }

        let mut visited = BTreeSet::new();
        let mut cycles = Vec::new();
        let mut seen_canonical = BTreeSet::new();

        for name in self.entities.keys() {
            if !visited.contains(name.as_str()) {
                let mut rec_stack = BTreeSet::new();
                let mut path = Vec::new();
                dfs_collect_cycles(
                    &adjacency,
                    name.as_str(),
                    &mut visited,
                    &mut rec_stack,
                    &mut path,
                    &mut seen_canonical,
                    &mut cycles,
                );
            }
        }

        cycles
    }
}

/// DFS helper collecting every cycle closed by a back-edge into the
/// current recursion stack
fn dfs_collect_cycles<'a>(
    adjacency: &BTreeMap<&'a str, Vec<&'a str>>,
    node: &'a str,
    visited: &mut BTreeSet<&'a str>,
    rec_stack: &mut BTreeSet<&'a str>,
    path: &mut Vec<&'a str>,
    seen_canonical: &mut BTreeSet<Vec<String>>,
    cycles: &mut Vec<Vec<String>>,
) {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(targets) = adjacency.get(node) {
        for &target in targets {
            if !visited.contains(target) {
                dfs_collect_cycles(
                    adjacency,
                    target,
                    visited,
                    rec_stack,
                    path,
                    seen_canonical,
                    cycles,
                );
            } else if rec_stack.contains(target) {
                // Back-edge found: rebuild the cycle path
                let mut cycle = vec![target.to_string()];
                for &p in path.iter().rev() {
                    cycle.push(p.to_string());
                    if p == target {
                        break;
                    }
                }
                cycle.reverse();

                if seen_canonical.insert(canonical_rotation(&cycle)) {
                    cycles.push(cycle);
                }
            }
        }
    }

    path.pop();
    rec_stack.remove(node);
}

/// Rotate a cycle (closing repeat stripped) to start at its
/// lexicographically smallest member, for mirror-traversal dedup
fn canonical_rotation(cycle: &[String]) -> Vec<String> {
    let core = &cycle[..cycle.len().saturating_sub(1)];
    if core.is_empty() {
        return cycle.to_vec();
    }

    let min_index = core
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0);

    core[min_index..]
        .iter()
        .chain(core[..min_index].iter())
        .cloned()
        .collect()
}
