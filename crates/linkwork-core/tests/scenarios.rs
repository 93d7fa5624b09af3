//! End-to-end walkthroughs of the three containers

use linkwork_core::{Distance, Error, Graph, HashTable, SearchTree};

#[test]
fn tree_insert_then_delete_interior_node() {
    let mut tree = SearchTree::new();
    for key in [50, 30, 20, 40, 70, 60, 80] {
        tree.insert(key);
    }
    assert_eq!(
        tree.inorder_traversal().copied().collect::<Vec<_>>(),
        vec![20, 30, 40, 50, 60, 70, 80]
    );
    assert!(tree.search(&40).is_some());

    assert_eq!(tree.delete(&30), Some(30));
    assert_eq!(
        tree.inorder_traversal().copied().collect::<Vec<_>>(),
        vec![20, 40, 50, 60, 70, 80]
    );
    assert!(tree.search(&30).is_none());
    assert_eq!(tree.to_string(), "[20, 40, 50, 60, 70, 80]");
}

#[test]
fn table_update_membership_and_remove() {
    let mut table = HashTable::with_capacity(5).unwrap();
    table.put("apple", 10);
    table.put("banana", 20);
    table.put("apple", 100);

    assert_eq!(table.get("apple"), Some(&100));
    assert_eq!(table.len(), 2);
    assert!(table.contains_key("banana"));

    assert_eq!(table.remove("banana"), Ok(20));
    assert!(!table.contains_key("banana"));
    assert_eq!(*table.get_or("banana", &0), 0);
    assert!(matches!(table.remove("banana"), Err(Error::KeyNotFound(_))));
}

#[test]
fn table_walkthrough_grows_once() {
    let mut table = HashTable::with_capacity(5).unwrap();
    for (key, value) in [("apple", 10), ("banana", 20), ("orange", 30), ("grape", 40), ("mango", 50)] {
        table.put(key, value);
    }
    assert_eq!(table.capacity(), 10);
    assert_eq!(table.len(), 5);
    assert_eq!(table.to_string().lines().count(), table.chain_lengths().iter().filter(|&&n| n > 0).count());
}

fn weighted_graph() -> Graph<char> {
    let mut graph = Graph::undirected();
    graph.extend([
        ('A', 'B', 4),
        ('A', 'C', 2),
        ('B', 'C', 1),
        ('B', 'D', 5),
        ('C', 'D', 8),
        ('C', 'E', 10),
        ('D', 'E', 2),
    ]);
    graph
}

#[test]
fn graph_shortest_path_matches_path_weight() {
    let graph = weighted_graph();
    let result = graph.dijkstra(&'A', &'E');

    assert_eq!(result.path, vec!['A', 'C', 'B', 'D', 'E']);
    let weight: u64 = result
        .path
        .windows(2)
        .map(|hop| {
            graph
                .neighbors(&hop[0])
                .iter()
                .filter(|(n, _)| *n == hop[1])
                .map(|(_, w)| *w)
                .min()
                .unwrap()
        })
        .sum();
    assert_eq!(result.distance, Distance::Finite(weight));
    assert_eq!(weight, 10);
}

#[test]
fn graph_edges_reported_once() {
    let graph = weighted_graph();
    let edges = graph.get_edges();
    assert_eq!(edges.len(), 7);
    assert!(edges.iter().all(|e| e.from < e.to));
    assert_eq!(graph.edge_count(), 7);
}

#[test]
fn graph_directed_walkthrough() {
    let mut graph = Graph::directed();
    graph.extend([('A', 'B', 1), ('B', 'C', 2), ('C', 'A', 3), ('C', 'D', 4)]);

    assert_eq!(graph.to_string(), "A -> B(1)\nB -> C(2)\nC -> A(3), D(4)\nD ->");
    assert_eq!(graph.dijkstra(&'A', &'D').distance, Distance::Finite(7));
    assert!(!graph.dijkstra(&'D', &'A').is_found());
    assert_eq!(graph.get_edges().len(), 4);
}

#[test]
fn shortest_path_serializes_infinity_as_null() {
    let graph = weighted_graph();
    let found = serde_json::to_value(graph.dijkstra(&'A', &'B')).unwrap();
    assert_eq!(found["distance"], 3);
    let missing = serde_json::to_value(graph.dijkstra(&'A', &'Z')).unwrap();
    assert!(missing["distance"].is_null());
    assert_eq!(missing["path"].as_array().unwrap().len(), 0);
}
