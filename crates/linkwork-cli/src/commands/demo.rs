//! Walkthrough of all three containers with fixed inputs

use serde::Serialize;

use crate::commands::graph::{self, GraphArgs, GraphReport};
use crate::commands::table::{self, TableArgs, TableReport};
use crate::commands::tree::{self, TreeArgs, TreeReport};
use crate::output::{self, OutputFormat};
use crate::AppContext;

const UNDIRECTED_EDGES: &[(&str, &str, u64)] = &[
    ("A", "B", 4),
    ("A", "C", 2),
    ("B", "C", 1),
    ("B", "D", 5),
    ("C", "D", 8),
    ("C", "E", 10),
    ("D", "E", 2),
];

const DIRECTED_EDGES: &[(&str, &str, u64)] = &[("A", "B", 1), ("B", "C", 2), ("C", "A", 3), ("C", "D", 4)];

fn edges(list: &[(&str, &str, u64)]) -> Vec<(String, String, u64)> {
    list.iter()
        .map(|(from, to, weight)| (from.to_string(), to.to_string(), *weight))
        .collect()
}

fn heading(title: &str) {
    println!();
    println!("=== {} ===", title);
}

fn graph_args(list: &[(&str, &str, u64)], directed: bool, end: &str) -> GraphArgs {
    GraphArgs {
        directed,
        edges: edges(list),
        vertices: Vec::new(),
        remove_edges: Vec::new(),
        remove_vertices: Vec::new(),
        bfs: Some("A".to_string()),
        dfs: Some("A".to_string()),
        path: Some(("A".to_string(), end.to_string())),
    }
}

/// Every walkthrough, emitted as one JSON document
#[derive(Serialize)]
struct DemoReport {
    tree: TreeReport,
    table: TableReport,
    undirected_graph: GraphReport,
    directed_graph: GraphReport,
}

pub fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let tree_args = TreeArgs {
        insert: vec![50, 30, 20, 40, 70, 60, 80],
        delete: vec![30],
        search: vec![40],
    };

    let fruit = [("apple", 5), ("banana", 8), ("orange", 12), ("grape", 15), ("mango", 20)];
    let mut puts: Vec<(String, i64)> = fruit.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    puts.push(("apple".to_string(), 100));
    let table_args = TableArgs {
        capacity: Some(5),
        load_factor: None,
        puts,
        removes: vec!["banana".to_string()],
        gets: ["apple", "banana", "orange", "pear"].iter().map(|k| k.to_string()).collect(),
    };

    let undirected_args = graph_args(UNDIRECTED_EDGES, false, "E");
    let directed_args = graph_args(DIRECTED_EDGES, true, "D");

    let report = DemoReport {
        tree: tree::build(&tree_args),
        table: table::build(&table_args, ctx.config.table_config())?,
        undirected_graph: graph::build(&undirected_args, false),
        directed_graph: graph::build(&directed_args, true),
    };

    match ctx.format {
        OutputFormat::Json => output::print_json(&report)?,
        OutputFormat::Table => {
            heading("Binary search tree");
            tree::print_table(&report.tree);
            heading("Hash table");
            table::print_table(&report.table);
            heading("Undirected graph");
            graph::print_table(&undirected_args, &report.undirected_graph);
            heading("Directed graph");
            graph::print_table(&directed_args, &report.directed_graph);
        }
    }

    Ok(())
}
