//! imgraph CLI: apply merge batches to an empty graph and print the result
//!
//! ```text
//! imgraph --config graph.yaml --batch day1.json --batch day2.json --format table
//! ```

use anyhow::Context;
use clap::Parser;
use comfy_table::{ContentArrangement, Table};
use imgraph::{Graph, GraphConfig, MergeBatch};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "imgraph", version, about = "Persistent property graph merge tool")]
struct Cli {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON merge batch, applied in the order given
    #[arg(long = "batch", required = true)]
    batches: Vec<PathBuf>,

    /// Output format
    #[arg(long, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    info!("imgraph v{}", imgraph::version());

    let config = match &cli.config {
        Some(path) => GraphConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GraphConfig::default(),
    };

    let mut graph = Graph::with_config(&config)?;
    for path in &cli.batches {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading batch {}", path.display()))?;
        let batch = MergeBatch::from_json_str(&text)
            .with_context(|| format!("decoding batch {}", path.display()))?;
        graph = graph.merge(&batch);
        info!(
            "Applied {}: {} nodes, {} edges",
            path.display(),
            graph.node_count(),
            graph.edge_count()
        );
    }

    match cli.format {
        OutputFormat::Json => {
            let plain = graph.to_plain()?;
            if cli.pretty {
                println!("{}", serde_json::to_string_pretty(&plain)?);
            } else {
                println!("{}", plain);
            }
        }
        OutputFormat::Table => print_tables(&graph),
    }

    Ok(())
}

fn print_tables(graph: &Graph) {
    let mut nodes: Vec<_> = graph.nodes().collect();
    nodes.sort_by(|a, b| a.key.cmp(&b.key));

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["node", "legacy id", "props", "out", "in"]);
    for node in nodes {
        table.add_row(vec![
            node.key.to_string(),
            graph.node_legacy_id(node.key.as_str()).unwrap_or("").to_string(),
            imgraph::PropertyValue::Map(node.props.clone()).to_string(),
            node.out.len().to_string(),
            node.in_.len().to_string(),
        ]);
    }
    println!("{}", table);

    let mut edges: Vec<_> = graph.edges().collect();
    edges.sort_by(|a, b| a.key.cmp(&b.key));

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["edge", "label", "start", "end", "props"]);
    for edge in edges {
        table.add_row(vec![
            edge.key.to_string(),
            edge.label.to_string(),
            edge.start.to_string(),
            edge.end.to_string(),
            imgraph::PropertyValue::Map(edge.props.clone()).to_string(),
        ]);
    }
    println!("{}", table);
    println!("{} node(s), {} edge(s)", graph.node_count(), graph.edge_count());
}
