//! Content Graph - a directed graph of named nodes.
//!
//! Nodes are kept in a keyed map together with the order in which each key
//! was first inserted; edges are an ordered, duplicate-free sequence. Both
//! orders are used to make traversals deterministic.
//!
//! The graph does not reject cycles on insertion. Call
//! [`ContentGraph::validate`] at the authoring boundary.

mod order;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// A directed edge: `to` is unlocked after `from`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<K> {
    pub from: K,
    pub to: K,
}

impl<K> Edge<K> {
    pub fn new(from: K, to: K) -> Self {
        Self { from, to }
    }
}

/// Directed graph of nodes keyed by `K`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize, N: Serialize",
    deserialize = "K: Deserialize<'de>, N: Deserialize<'de>"
))]
pub struct ContentGraph<K: Eq + Hash, N> {
    nodes: HashMap<K, N>,

    /// Keys in first-insertion order.
    order: Vec<K>,

    edges: Vec<Edge<K>>,
}

impl<K: Eq + Hash, N> Default for ContentGraph<K, N> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<K, N> ContentGraph<K, N>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node. A replaced node keeps its original position.
    pub fn insert_node(&mut self, id: K, node: N) -> Option<N> {
        if !self.nodes.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.nodes.insert(id, node)
    }

    /// Insert `node`, or combine it with the node already stored under `id`.
    ///
    /// `combine` receives the stored node first and the new node second.
    pub fn merge_node<F>(&mut self, id: K, node: N, combine: F)
    where
        F: FnOnce(N, N) -> N,
    {
        match self.nodes.remove(&id) {
            Some(existing) => {
                self.nodes.insert(id, combine(existing, node));
            }
            None => {
                self.order.push(id.clone());
                self.nodes.insert(id, node);
            }
        }
    }

    /// Append an edge unless an equal edge is already present.
    ///
    /// Returns whether the edge was added.
    pub fn add_edge(&mut self, from: K, to: K) -> bool {
        let edge = Edge::new(from, to);
        if self.edges.contains(&edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Look up a node.
    pub fn find_node(&self, id: &K) -> Option<&N> {
        self.nodes.get(id)
    }

    pub fn find_node_mut(&mut self, id: &K) -> Option<&mut N> {
        self.nodes.get_mut(id)
    }

    pub fn contains_node(&self, id: &K) -> bool {
        self.nodes.contains_key(id)
    }

    /// Check whether the edge `from -> to` exists.
    pub fn contains_edge(&self, from: &K, to: &K) -> bool {
        self.edges.iter().any(|e| &e.from == from && &e.to == to)
    }

    /// Nodes in first-insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&K, &N)> {
        self.order
            .iter()
            .filter_map(|id| self.nodes.get(id).map(|node| (id, node)))
    }

    pub fn node_ids(&self) -> &[K] {
        &self.order
    }

    pub fn edges(&self) -> &[Edge<K>] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct predecessors of `id`, in edge order.
    pub fn predecessors<'a>(&'a self, id: &'a K) -> impl Iterator<Item = &'a K> + 'a {
        self.edges.iter().filter(move |e| &e.to == id).map(|e| &e.from)
    }

    /// Direct successors of `id`, in edge order.
    pub fn successors<'a>(&'a self, id: &'a K) -> impl Iterator<Item = &'a K> + 'a {
        self.edges.iter().filter(move |e| &e.from == id).map(|e| &e.to)
    }

    /// Every node from which `id` can be reached. Does not include `id`
    /// itself unless it lies on a cycle.
    pub fn ancestors(&self, id: &K) -> HashSet<K> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([id.clone()]);

        while let Some(current) = queue.pop_front() {
            for pred in self.predecessors(&current) {
                if seen.insert(pred.clone()) {
                    queue.push_back(pred.clone());
                }
            }
        }

        seen
    }

    /// Split the graph into its nodes (in insertion order) and edges.
    pub fn into_parts(mut self) -> (Vec<(K, N)>, Vec<Edge<K>>) {
        let nodes = self
            .order
            .into_iter()
            .filter_map(|id| self.nodes.remove(&id).map(|node| (id, node)))
            .collect();
        (nodes, self.edges)
    }
}
