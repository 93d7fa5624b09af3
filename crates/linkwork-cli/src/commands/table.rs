//! Hash table commands

use clap::Args;
use serde::Serialize;

use crate::commands::parse_pair;
use crate::output::{self, OutputFormat};
use crate::AppContext;
use linkwork_core::{HashTable, TableConfig};

#[derive(Args)]
pub struct TableArgs {
    /// Initial bucket count (defaults to the configured capacity)
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Resize threshold (defaults to the configured load factor)
    #[arg(long)]
    pub load_factor: Option<f64>,

    /// Entry to insert or update as key=value (repeatable, applied in order)
    #[arg(short, long = "put", value_parser = parse_pair, allow_hyphen_values = true)]
    pub puts: Vec<(String, i64)>,

    /// Key to remove after all puts (repeatable; a missing key is an error)
    #[arg(short, long = "remove")]
    pub removes: Vec<String>,

    /// Key to look up at the end (repeatable)
    #[arg(short, long = "get")]
    pub gets: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Lookup {
    key: String,
    value: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TableReport {
    capacity: usize,
    len: usize,
    load_factor: f64,
    buckets: Vec<String>,
    removed: Vec<Lookup>,
    lookups: Vec<Lookup>,
}

/// Applies puts, then removes, then lookups to a table built from `base`
/// overridden by the command line
pub(crate) fn build(args: &TableArgs, base: TableConfig) -> anyhow::Result<TableReport> {
    let mut config = base;
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    if let Some(load_factor) = args.load_factor {
        config.load_factor = load_factor;
    }

    let mut table = HashTable::with_config(config)?;
    for (key, value) in &args.puts {
        if let Some(previous) = table.put(key.clone(), *value) {
            tracing::info!("Updated {}: {} -> {}", key, previous, value);
        }
    }

    let mut removed = Vec::new();
    for key in &args.removes {
        let value = table.remove(key.as_str())?;
        removed.push(Lookup {
            key: key.clone(),
            value: Some(value),
        });
    }

    let lookups: Vec<Lookup> = args
        .gets
        .iter()
        .map(|key| Lookup {
            key: key.clone(),
            value: table.get(key.as_str()).copied(),
        })
        .collect();

    Ok(TableReport {
        capacity: table.capacity(),
        len: table.len(),
        load_factor: table.load_factor(),
        buckets: table.to_string().lines().map(str::to_string).collect(),
        removed,
        lookups,
    })
}

pub(crate) fn print_table(report: &TableReport) {
    println!("Hash table contents:");
    if report.buckets.is_empty() {
        println!("  (empty)");
    }
    for line in &report.buckets {
        println!("  {}", line);
    }
    println!(
        "  {} entries in {} buckets (load {:.2})",
        report.len, report.capacity, report.load_factor
    );
    for lookup in &report.removed {
        println!("Removed {}", lookup.key);
    }
    for lookup in &report.lookups {
        match lookup.value {
            Some(value) => println!("{} = {}", lookup.key, value),
            None => println!("{}: not found", lookup.key),
        }
    }
}

pub fn run(args: &TableArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let report = build(args, ctx.config.table_config())?;
    match ctx.format {
        OutputFormat::Json => output::print_json(&report)?,
        OutputFormat::Table => print_table(&report),
    }
    Ok(())
}
