//! Search tree commands

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use crate::AppContext;
use linkwork_core::SearchTree;

#[derive(Args)]
pub struct TreeArgs {
    /// Keys to insert, in order (comma-separated)
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub insert: Vec<i64>,

    /// Keys to delete after inserting (comma-separated)
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub delete: Vec<i64>,

    /// Keys to look up at the end (comma-separated)
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub search: Vec<i64>,
}

#[derive(Debug, Serialize)]
struct DeleteOutcome {
    key: i64,
    removed: bool,
}

#[derive(Debug, Serialize)]
struct SearchOutcome {
    key: i64,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TreeReport {
    /// In-order keys before any deletion
    inserted: Vec<i64>,
    inorder: Vec<i64>,
    len: usize,
    height: usize,
    deleted: Vec<DeleteOutcome>,
    searches: Vec<SearchOutcome>,
}

/// Applies the inserts, deletes and searches in order
pub(crate) fn build(args: &TreeArgs) -> TreeReport {
    let mut tree: SearchTree<i64> = args.insert.iter().copied().collect();
    tracing::info!("Inserted {} keys (height {})", tree.len(), tree.height());
    let inserted: Vec<i64> = tree.iter().copied().collect();

    let deleted: Vec<DeleteOutcome> = args
        .delete
        .iter()
        .map(|key| DeleteOutcome {
            key: *key,
            removed: tree.delete(key).is_some(),
        })
        .collect();

    let searches: Vec<SearchOutcome> = args
        .search
        .iter()
        .map(|key| {
            let node = tree.search(key);
            SearchOutcome {
                key: *key,
                found: node.is_some(),
                parent: node.and_then(|n| n.parent()).map(|p| *p.key()),
            }
        })
        .collect();

    TreeReport {
        inserted,
        inorder: tree.iter().copied().collect(),
        len: tree.len(),
        height: tree.height(),
        deleted,
        searches,
    }
}

pub(crate) fn print_table(report: &TreeReport) {
    println!("In-order traversal: [{}]", output::join(&report.inserted, ", "));
    for outcome in &report.deleted {
        if outcome.removed {
            println!("Deleted {}", outcome.key);
        } else {
            println!("Delete {}: not found", outcome.key);
        }
    }
    for outcome in &report.searches {
        match (outcome.found, outcome.parent) {
            (true, Some(parent)) => println!("Search {}: found (parent {})", outcome.key, parent),
            (true, None) => println!("Search {}: found (root)", outcome.key),
            (false, _) => println!("Search {}: not found", outcome.key),
        }
    }
    if !report.deleted.is_empty() {
        println!("After deletions: [{}]", output::join(&report.inorder, ", "));
    }
    println!("  {} keys, height {}", report.len, report.height);
}

pub fn run(args: &TreeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let report = build(args);
    match ctx.format {
        OutputFormat::Json => output::print_json(&report)?,
        OutputFormat::Table => print_table(&report),
    }
    Ok(())
}
