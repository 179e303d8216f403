//! Ordering and validation of content graphs.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hash;

use super::ContentGraph;
use crate::error::ContentError;

impl<K, N> ContentGraph<K, N>
where
    K: Clone + Eq + Hash + fmt::Display,
{
    /// Topological order of all nodes.
    ///
    /// Among nodes that are ready at the same time, the one inserted first
    /// comes first, so the result is stable for a fixed build. Edges whose
    /// endpoints are not nodes are skipped.
    pub fn topological_order(&self) -> Result<Vec<K>, ContentError> {
        let position: HashMap<&K, usize> = self
            .order
            .iter()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect();

        let mut in_degree = vec![0usize; self.order.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); self.order.len()];
        for edge in &self.edges {
            let (Some(&from), Some(&to)) = (position.get(&edge.from), position.get(&edge.to))
            else {
                continue;
            };
            successors[from].push(to);
            in_degree[to] += 1;
        }

        let mut ready: BTreeSet<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(i, _)| i)
            .collect();
        let mut sorted = Vec::with_capacity(self.order.len());

        while let Some(next) = ready.pop_first() {
            sorted.push(self.order[next].clone());
            for &succ in &successors[next] {
                in_degree[succ] -= 1;
                if in_degree[succ] == 0 {
                    ready.insert(succ);
                }
            }
        }

        if sorted.len() < self.order.len() {
            let nodes = in_degree
                .iter()
                .enumerate()
                .filter(|(_, degree)| **degree > 0)
                .map(|(i, _)| self.order[i].to_string())
                .collect();
            return Err(ContentError::Cycle { nodes });
        }

        Ok(sorted)
    }

    /// Check that every edge connects existing nodes and that the graph is
    /// acyclic. Returns the topological order on success.
    pub fn validate(&self) -> Result<Vec<K>, ContentError> {
        if let Some(edge) = self
            .edges
            .iter()
            .find(|e| !self.nodes.contains_key(&e.from) || !self.nodes.contains_key(&e.to))
        {
            return Err(ContentError::DanglingEdge {
                from: edge.from.to_string(),
                to: edge.to.to_string(),
            });
        }

        self.topological_order()
    }
}
