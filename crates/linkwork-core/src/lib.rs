//! Linkwork Core - Linked and associative containers
//!
//! This crate provides three self-contained containers, each owning its
//! nodes and keeping its invariants intact across every mutation:
//!
//! - [`SearchTree`]: unbalanced binary search tree with parent links
//! - [`HashTable`]: separate-chaining hash table that doubles on load
//! - [`Graph`]: weighted adjacency-list graph with BFS, DFS and Dijkstra

pub mod error;
pub mod graph;
pub mod limits;
pub mod table;
pub mod traversal;
pub mod tree;

pub use error::{Error, Result};
pub use graph::{Edge, Graph, Weight};
pub use table::{HashTable, TableConfig};
pub use traversal::{Distance, ShortestPath};
pub use tree::{InOrder, NodeIndex, NodeRef, SearchTree};
