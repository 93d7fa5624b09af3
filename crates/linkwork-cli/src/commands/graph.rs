//! Graph commands

use clap::Args;
use serde::Serialize;

use crate::commands::{parse_edge, parse_vertex_pair};
use crate::output::{self, OutputFormat};
use crate::AppContext;
use linkwork_core::{Edge, Graph, ShortestPath};

#[derive(Args)]
pub struct GraphArgs {
    /// Treat edges as one-way (also enabled by the graph_directed config key)
    #[arg(long)]
    pub directed: bool,

    /// Edge as from:to[:weight] (repeatable; weight defaults to 1)
    #[arg(short, long = "edge", value_parser = parse_edge)]
    pub edges: Vec<(String, String, u64)>,

    /// Vertex with no edges (repeatable)
    #[arg(long = "vertex")]
    pub vertices: Vec<String>,

    /// Remove every edge from:to after building (repeatable)
    #[arg(long = "remove-edge", value_parser = parse_vertex_pair)]
    pub remove_edges: Vec<(String, String)>,

    /// Remove a vertex and its edges after building (repeatable)
    #[arg(long = "remove-vertex")]
    pub remove_vertices: Vec<String>,

    /// Breadth-first traversal from this vertex
    #[arg(long)]
    pub bfs: Option<String>,

    /// Depth-first traversal from this vertex
    #[arg(long)]
    pub dfs: Option<String>,

    /// Shortest path query as start:end
    #[arg(long, value_parser = parse_vertex_pair)]
    pub path: Option<(String, String)>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GraphReport {
    directed: bool,
    vertices: Vec<String>,
    edges: Vec<Edge<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bfs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dfs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shortest_path: Option<ShortestPath<String>>,
    /// Adjacency listing for table output
    #[serde(skip)]
    rendered: String,
}

/// Builds the graph, applies removals and runs the requested queries
pub(crate) fn build(args: &GraphArgs, directed: bool) -> GraphReport {
    let mut graph = Graph::new(directed);

    for vertex in &args.vertices {
        graph.add_vertex(vertex.clone());
    }
    graph.extend(args.edges.iter().cloned());

    for (from, to) in &args.remove_edges {
        if !graph.remove_edge(from, to) {
            tracing::warn!("No edge {} -> {} to remove", from, to);
        }
    }
    for vertex in &args.remove_vertices {
        if !graph.remove_vertex(vertex) {
            tracing::warn!("No vertex {} to remove", vertex);
        }
    }

    tracing::info!(
        "Built {} graph with {} vertices and {} edges",
        if directed { "directed" } else { "undirected" },
        graph.vertex_count(),
        graph.edge_count()
    );

    GraphReport {
        directed,
        vertices: graph.get_vertices().to_vec(),
        edges: graph.get_edges(),
        bfs: args.bfs.as_ref().map(|start| graph.bfs(start)),
        dfs: args.dfs.as_ref().map(|start| graph.dfs(start)),
        shortest_path: args.path.as_ref().map(|(start, end)| graph.dijkstra(start, end)),
        rendered: graph.to_string(),
    }
}

pub(crate) fn print_table(args: &GraphArgs, report: &GraphReport) {
    println!("Graph structure:");
    if report.vertices.is_empty() {
        println!("  (empty)");
    }
    for line in report.rendered.lines() {
        println!("  {}", line);
    }
    if let (Some(start), Some(order)) = (&args.bfs, &report.bfs) {
        println!("BFS starting from {}: {}", start, output::join(order, ", "));
    }
    if let (Some(start), Some(order)) = (&args.dfs, &report.dfs) {
        println!("DFS starting from {}: {}", start, output::join(order, ", "));
    }
    if let (Some((start, end)), Some(result)) = (&args.path, &report.shortest_path) {
        println!("Shortest path from {} to {}:", start, end);
        if result.is_found() {
            println!("  Path: {}", output::join(&result.path, " -> "));
            println!("  Total distance: {}", result.distance);
        } else {
            println!("  No path exists");
        }
    }
}

pub fn run(args: &GraphArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let report = build(args, args.directed || ctx.config.graph_directed);
    match ctx.format {
        OutputFormat::Json => output::print_json(&report)?,
        OutputFormat::Table => print_table(args, &report),
    }
    Ok(())
}
