//! Graph traversal types and algorithms

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// Length of a path, or infinity when no path exists.
///
/// `Finite` sorts before `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Distance {
    Finite(u64),
    Infinite,
}

impl Distance {
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn finite(&self) -> Option<u64> {
        match self {
            Self::Finite(d) => Some(*d),
            Self::Infinite => None,
        }
    }
}

impl From<u64> for Distance {
    fn from(d: u64) -> Self {
        Self::Finite(d)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{}", d),
            Self::Infinite => write!(f, "inf"),
        }
    }
}

/// Result of [`Graph::dijkstra`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPath<V> {
    /// Vertices from start to end inclusive; empty when unreachable
    pub path: Vec<V>,

    /// Sum of edge weights along `path`
    pub distance: Distance,
}

impl<V> ShortestPath<V> {
    /// The empty-path, infinite-distance sentinel
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            distance: Distance::Infinite,
        }
    }

    pub fn is_found(&self) -> bool {
        self.distance.is_finite()
    }
}

/// State for Dijkstra priority queue
#[derive(PartialEq, Eq)]
struct DijkstraState<'a, V> {
    cost: u64,
    node: &'a V,
}

impl<V: Ord> Ord for DijkstraState<'_, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; ties go to the smaller vertex
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl<V: Ord> PartialOrd for DijkstraState<'_, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Clone + Eq + Hash> Graph<V> {
    /// Breadth-first order of the vertices reachable from `start`.
    ///
    /// Returns an empty list if `start` is not in the graph.
    pub fn bfs(&self, start: &V) -> Vec<V> {
        let Some((start, _)) = self.adjacency.get_key_value(start) else {
            return Vec::new();
        };

        let mut visited: HashSet<&V> = HashSet::new();
        let mut queue: VecDeque<&V> = VecDeque::new();
        let mut order = Vec::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            order.push(current.clone());
            for (next, _) in self.neighbors(current) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        tracing::trace!("BFS visited {} vertices", order.len());
        order
    }

    /// Depth-first pre-order of the vertices reachable from `start`.
    ///
    /// Neighbors are explored in adjacency order, exactly as a recursive
    /// descent would, but with an explicit stack so deep graphs cannot
    /// overflow the call stack.
    pub fn dfs(&self, start: &V) -> Vec<V> {
        let Some((start, neighbors)) = self.adjacency.get_key_value(start) else {
            return Vec::new();
        };

        let mut visited: HashSet<&V> = HashSet::new();
        let mut order = vec![start.clone()];
        let mut stack = vec![neighbors.iter()];
        visited.insert(start);

        while let Some(frame) = stack.last_mut() {
            match frame.next() {
                Some((next, _)) => {
                    if visited.insert(next) {
                        order.push(next.clone());
                        stack.push(self.neighbors(next).iter());
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }

        tracing::trace!("DFS visited {} vertices", order.len());
        order
    }
}

impl<V: Clone + Eq + Hash + Ord> Graph<V> {
    /// Shortest path from `start` to `end` by total weight.
    ///
    /// The heap may hold several entries for one vertex; an entry whose cost
    /// exceeds the best known distance is stale and skipped. The search
    /// stops as soon as `end` is popped.
    ///
    /// Path lengths are exact `u64` sums. An edge that would push a route's
    /// total past `u64::MAX` is ignored for that route, so the reported
    /// distance always equals the weight of the reported path.
    ///
    /// Returns [`ShortestPath::unreachable`] if either vertex is missing or
    /// `end` cannot be reached.
    pub fn dijkstra(&self, start: &V, end: &V) -> ShortestPath<V> {
        let Some((start, _)) = self.adjacency.get_key_value(start) else {
            return ShortestPath::unreachable();
        };
        if !self.contains_vertex(end) {
            return ShortestPath::unreachable();
        }

        // Missing entries are at infinite distance
        let mut dist: HashMap<&V, u64> = HashMap::new();
        let mut previous: HashMap<&V, &V> = HashMap::new();
        let mut heap = BinaryHeap::new();
        let mut popped = 0usize;

        dist.insert(start, 0);
        heap.push(DijkstraState {
            cost: 0,
            node: start,
        });

        while let Some(DijkstraState { cost, node }) = heap.pop() {
            popped += 1;

            // Skip if we already found a better path
            if dist.get(node).is_some_and(|&best| cost > best) {
                continue;
            }

            if node == end {
                break;
            }

            for (next, weight) in self.neighbors(node) {
                // A route whose total would not fit in a u64 is not taken
                let Some(candidate) = cost.checked_add(*weight) else {
                    continue;
                };
                if dist.get(next).map_or(true, |&known| candidate < known) {
                    tracing::trace!("Relaxed edge to new cost {}", candidate);
                    dist.insert(next, candidate);
                    previous.insert(next, node);
                    heap.push(DijkstraState {
                        cost: candidate,
                        node: next,
                    });
                }
            }
        }

        let Some(&distance) = dist.get(end) else {
            tracing::debug!("Dijkstra found no path after {} pops", popped);
            return ShortestPath::unreachable();
        };

        let mut path = vec![end.clone()];
        let mut current = end;
        while let Some(&prev) = previous.get(current) {
            path.push(prev.clone());
            current = prev;
        }
        path.reverse();

        tracing::debug!("Dijkstra found path with cost {} after {} pops", distance, popped);
        ShortestPath {
            path,
            distance: Distance::Finite(distance),
        }
    }
}
