//! Weighted adjacency-list graph

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Non-negative integer edge weight
pub type Weight = u64;

/// Weight used when an edge is added without one
pub const DEFAULT_WEIGHT: Weight = 1;

/// An edge as reported by [`Graph::get_edges`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<V> {
    pub from: V,
    pub to: V,
    pub weight: Weight,
}

/// Directed or undirected graph keyed by vertex value.
///
/// Each vertex maps to an ordered list of `(neighbor, weight)` pairs.
/// List order follows insertion order and decides traversal tie-breaking.
/// In an undirected graph every edge is stored in both endpoint lists.
///
/// Adding a `(neighbor, weight)` pair that is already present does nothing,
/// but the same neighbor with a different weight is kept as a second edge.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    pub(crate) adjacency: HashMap<V, Vec<(V, Weight)>>,
    /// Vertices in insertion order
    vertices: Vec<V>,
    directed: bool,
}

impl<V> Graph<V> {
    pub fn new(directed: bool) -> Self {
        Self {
            adjacency: HashMap::new(),
            vertices: Vec::new(),
            directed,
        }
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Vertices in the order they were first added
    pub fn get_vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

impl<V: Clone + Eq + Hash> Graph<V> {
    fn adjacency_mut(&mut self, vertex: &V) -> &mut Vec<(V, Weight)> {
        if !self.adjacency.contains_key(vertex) {
            self.vertices.push(vertex.clone());
        }
        self.adjacency.entry(vertex.clone()).or_default()
    }

    /// Adds `vertex` with no edges; does nothing if it already exists
    pub fn add_vertex(&mut self, vertex: V) {
        self.adjacency_mut(&vertex);
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Adds an edge, creating missing endpoints.
    ///
    /// An undirected self-loop is stored once, since its mirror entry is the
    /// same `(neighbor, weight)` pair.
    pub fn add_edge(&mut self, from: V, to: V, weight: Weight) {
        self.adjacency_mut(&from);
        self.adjacency_mut(&to);

        let forward = self.adjacency_mut(&from);
        if forward.iter().any(|(n, w)| *n == to && *w == weight) {
            return;
        }
        forward.push((to.clone(), weight));

        if !self.directed && from != to {
            self.adjacency_mut(&to).push((from, weight));
        }
    }

    /// Adds an edge with [`DEFAULT_WEIGHT`]
    pub fn add_unit_edge(&mut self, from: V, to: V) {
        self.add_edge(from, to, DEFAULT_WEIGHT);
    }

    /// Removes every edge from `from` to `to`, whatever its weight.
    ///
    /// Returns whether anything was removed.
    pub fn remove_edge(&mut self, from: &V, to: &V) -> bool {
        let mut removed = false;
        if let Some(list) = self.adjacency.get_mut(from) {
            let before = list.len();
            list.retain(|(n, _)| n != to);
            removed |= list.len() != before;
        }
        if !self.directed {
            if let Some(list) = self.adjacency.get_mut(to) {
                let before = list.len();
                list.retain(|(n, _)| n != from);
                removed |= list.len() != before;
            }
        }
        removed
    }

    /// Removes `vertex` together with every edge that touches it.
    ///
    /// Returns whether the vertex existed.
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        if self.adjacency.remove(vertex).is_none() {
            return false;
        }
        for list in self.adjacency.values_mut() {
            list.retain(|(n, _)| n != vertex);
        }
        self.vertices.retain(|v| v != vertex);
        true
    }

    /// Outgoing `(neighbor, weight)` pairs; empty for an unknown vertex
    pub fn neighbors(&self, vertex: &V) -> &[(V, Weight)] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of edges, counting an undirected edge once
    pub fn edge_count(&self) -> usize {
        let entries: usize = self.adjacency.values().map(Vec::len).sum();
        if self.directed {
            return entries;
        }
        let self_loops = self
            .adjacency
            .iter()
            .map(|(v, list)| list.iter().filter(|(n, _)| n == v).count())
            .sum::<usize>();
        (entries + self_loops) / 2
    }
}

impl<V: Clone + Eq + Hash + Ord> Graph<V> {
    /// All edges as `(from, to, weight)`.
    ///
    /// An undirected graph reports each edge once, oriented so that
    /// `from <= to`.
    pub fn get_edges(&self) -> Vec<Edge<V>> {
        self.vertices
            .iter()
            .flat_map(|from| {
                self.neighbors(from)
                    .iter()
                    .filter(move |(to, _)| self.directed || from <= to)
                    .map(move |(to, weight)| Edge {
                        from: from.clone(),
                        to: to.clone(),
                        weight: *weight,
                    })
            })
            .collect()
    }
}

impl<V: Clone + Eq + Hash> Extend<(V, V, Weight)> for Graph<V> {
    fn extend<I: IntoIterator<Item = (V, V, Weight)>>(&mut self, iter: I) {
        for (from, to, weight) in iter {
            self.add_edge(from, to, weight);
        }
    }
}

/// Renders one line per vertex: `A -> B(4), C(2)`.
///
/// A vertex with no outgoing edges renders as `D ->` with no trailing
/// space, so every line is free of trailing whitespace.
impl<V: fmt::Display + Eq + Hash> fmt::Display for Graph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} ->", vertex)?;
            let list = self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[]);
            for (j, (neighbor, weight)) in list.iter().enumerate() {
                let separator = if j == 0 { " " } else { ", " };
                write!(f, "{}{}({})", separator, neighbor, weight)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph = Graph::undirected();
        graph.add_vertex("A");
        graph.add_vertex("A");
        assert_eq!(graph.get_vertices(), &["A"]);
        assert!(graph.neighbors(&"A").is_empty());
    }

    #[test]
    fn test_undirected_edge_is_symmetric() {
        let mut graph = Graph::undirected();
        graph.add_edge("A", "B", 4);
        assert_eq!(graph.neighbors(&"A"), &[("B", 4)]);
        assert_eq!(graph.neighbors(&"B"), &[("A", 4)]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            graph.get_edges(),
            vec![Edge {
                from: "A",
                to: "B",
                weight: 4
            }]
        );
    }

    #[test]
    fn test_directed_edge_is_one_way() {
        let mut graph = Graph::directed();
        graph.add_edge("A", "B", 1);
        assert_eq!(graph.neighbors(&"A"), &[("B", 1)]);
        assert!(graph.neighbors(&"B").is_empty());
        assert_eq!(graph.get_vertices(), &["A", "B"]);
    }

    #[test]
    fn test_duplicate_pair_ignored_other_weight_kept() {
        let mut graph = Graph::undirected();
        graph.add_edge(1, 2, 5);
        graph.add_edge(1, 2, 5);
        graph.add_edge(1, 2, 7);
        assert_eq!(graph.neighbors(&1), &[(2, 5), (2, 7)]);
        assert_eq!(graph.neighbors(&2), &[(1, 5), (1, 7)]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_undirected_self_loop_stored_once() {
        let mut graph = Graph::undirected();
        graph.add_edge(1, 1, 3);
        assert_eq!(graph.neighbors(&1), &[(1, 3)]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.get_edges().len(), 1);
    }

    #[test]
    fn test_remove_edge_any_weight() {
        let mut graph = Graph::undirected();
        graph.add_edge("A", "B", 1);
        graph.add_edge("A", "B", 2);
        graph.add_edge("A", "C", 3);
        assert!(graph.remove_edge(&"A", &"B"));
        assert_eq!(graph.neighbors(&"A"), &[("C", 3)]);
        assert!(graph.neighbors(&"B").is_empty());
        assert!(!graph.remove_edge(&"A", &"B"));
        assert!(!graph.remove_edge(&"A", &"Z"));
    }

    #[test]
    fn test_remove_edge_directed_keeps_reverse() {
        let mut graph = Graph::directed();
        graph.add_edge("A", "B", 1);
        graph.add_edge("B", "A", 1);
        assert!(graph.remove_edge(&"A", &"B"));
        assert_eq!(graph.neighbors(&"B"), &[("A", 1)]);
    }

    #[test]
    fn test_remove_vertex_scrubs_edges() {
        let mut graph = Graph::directed();
        graph.add_edge("A", "B", 1);
        graph.add_edge("C", "B", 2);
        graph.add_edge("B", "D", 3);
        assert!(graph.remove_vertex(&"B"));
        assert!(!graph.contains_vertex(&"B"));
        assert!(graph.neighbors(&"A").is_empty());
        assert!(graph.neighbors(&"C").is_empty());
        assert_eq!(graph.get_vertices(), &["A", "C", "D"]);
        assert!(!graph.remove_vertex(&"B"));
    }

    #[test]
    fn test_display() {
        let mut graph = Graph::undirected();
        graph.add_edge("A", "B", 4);
        graph.add_edge("A", "C", 2);
        assert_eq!(graph.to_string(), "A -> B(4), C(2)\nB -> A(4)\nC -> A(2)");
    }

    #[test]
    fn test_display_isolated_vertex_has_no_trailing_space() {
        let mut graph = Graph::directed();
        graph.add_edge("A", "B", 2);
        graph.add_vertex("D");
        let rendered = graph.to_string();
        assert_eq!(rendered, "A -> B(2)\nB ->\nD ->");
        assert!(rendered.lines().all(|line| !line.ends_with(' ')));
    }
}
