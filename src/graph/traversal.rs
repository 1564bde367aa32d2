//! Reachability and orphan queries over the built graph

use std::collections::{BTreeSet, VecDeque};

use super::DomainGraph;

impl DomainGraph {
    /// Entity names reachable within `depth` hops of `name`.
    ///
    /// Both edge directions count as adjacency. The start entity is
    /// excluded, and no name is visited twice.
    pub fn related_within_depth(&self, name: &str, depth: usize) -> Vec<String> {
        let mut visited: BTreeSet<String> = BTreeSet::new();
        let mut found = Vec::new();
        let mut queue: VecDeque<(String, usize)> = VecDeque::new();

        visited.insert(name.to_string());
        queue.push_back((name.to_string(), 0));

        while let Some((current, hops)) = queue.pop_front() {
            if hops >= depth {
                continue;
            }

            for edge in &self.edges {
                let neighbor = if edge.from == current {
                    &edge.to
                } else if edge.to == current {
                    &edge.from
                } else {
                    continue;
                };

                if visited.insert(neighbor.clone()) {
                    found.push(neighbor.clone());
                    queue.push_back((neighbor.clone(), hops + 1));
                }
            }
        }

        found
    }

    /// Entities with no incident edges in either direction
    pub fn orphans(&self) -> Vec<String> {
        self.entities
            .keys()
            .filter(|name| {
                !self
                    .edges
                    .iter()
                    .any(|e| e.from == **name || e.to == **name)
            })
            .cloned()
            .collect()
    }
}
