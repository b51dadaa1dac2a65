//! Protein CLI: command-line access to the protein dashboard
//!
//! Opens the configured stores directly and runs one dashboard operation per
//! invocation.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use protein_dashboard::{
    Backend, DashboardConfig, EcCategory, LengthHistogram, ProteinDashboard, ProteinFilter,
};

/// Longest cell printed in table mode; sequences are truncated past this
const MAX_CELL_CHARS: usize = 60;

#[derive(Parser)]
#[command(name = "protein-cli", version, about = "Protein dashboard CLI")]
struct Cli {
    /// YAML config file
    #[arg(long, global = true, env = "PROTEIN_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Use the in-memory backend loaded from this JSON dataset
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    #[arg(long, global = true, env = "MONGO_URI")]
    mongo_uri: Option<String>,

    #[arg(long, global = true, env = "NEO4J_URI")]
    neo4j_uri: Option<String>,

    #[arg(long, global = true, env = "NEO4J_USER")]
    neo4j_user: Option<String>,

    #[arg(long, global = true, env = "NEO4J_PASSWORD", hide_env_values = true)]
    neo4j_password: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
struct FilterArgs {
    /// Exact Entry
    #[arg(long)]
    entry: Option<String>,

    /// InterPro substring, case-insensitive
    #[arg(long)]
    interpro: Option<String>,

    /// EC number substring, case-insensitive
    #[arg(long)]
    ec_number: Option<String>,
}

impl From<FilterArgs> for ProteinFilter {
    fn from(args: FilterArgs) -> Self {
        ProteinFilter::from_inputs(args.entry, args.interpro, args.ec_number)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search protein documents
    Search(FilterArgs),
    /// Count matching protein documents
    Count(FilterArgs),
    /// Search protein nodes in the similarity graph
    GraphSearch(FilterArgs),
    /// List the direct neighbors of a protein
    Neighbors { entry: String },
    /// Write the similarity graph around one protein as HTML
    Graph {
        entry: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write up to LIMIT similarity edges as an HTML graph
    Sample {
        #[arg(allow_negative_numbers = true)]
        limit: i64,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// EC number distribution over the graph
    EcStats,
    /// Sequence length histogram over the documents
    Lengths {
        #[arg(long, default_value_t = protein_dashboard::stats::DEFAULT_BIN_WIDTH)]
        bin_width: usize,
    },
    /// Store health and sizes
    Status,
}

impl Cli {
    fn dashboard_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = DashboardConfig::load_or_default(self.config.as_deref())
            .context("loading dashboard config")?;

        if let Some(dataset) = &self.dataset {
            config.backend = Backend::Embedded;
            config.embedded.dataset = Some(dataset.clone());
        }
        if let Some(uri) = &self.mongo_uri {
            config.mongo.uri = uri.clone();
        }
        if let Some(uri) = &self.neo4j_uri {
            config.neo4j.uri = uri.clone();
        }
        if let Some(user) = &self.neo4j_user {
            config.neo4j.user = user.clone();
        }
        if let Some(password) = &self.neo4j_password {
            config.neo4j.password = password.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.dashboard_config()?;
    let dashboard = ProteinDashboard::connect(&config).await?;
    let format = cli.format;

    match cli.command {
        Commands::Search(filter) => run_search(&dashboard, filter.into(), &format).await,
        Commands::Count(filter) => run_count(&dashboard, filter.into(), &format).await,
        Commands::GraphSearch(filter) => run_graph_search(&dashboard, filter.into(), &format).await,
        Commands::Neighbors { entry } => run_neighbors(&dashboard, &entry, &format).await,
        Commands::Graph { entry, output } => {
            let output = output.unwrap_or(config.visualization.protein_graph_file.clone());
            let artifact = dashboard.build_graph_for(&entry).await?;
            let title = format!("Protein Graph for Entry: {}", entry);
            let path = dashboard.renderer().write(&artifact, &title, &output)?;
            println!(
                "Wrote {} ({} nodes, {} edges)",
                path.display(),
                artifact.node_count(),
                artifact.edge_count()
            );
            Ok(())
        }
        Commands::Sample { limit, output } => {
            let output = output.unwrap_or(config.visualization.sample_graph_file.clone());
            let artifact = dashboard.build_graph_sample(limit).await?;
            let title = format!("Protein Graph with {} Connections", limit);
            let path = dashboard.renderer().write(&artifact, &title, &output)?;
            println!(
                "Wrote {} ({} nodes, {} edges)",
                path.display(),
                artifact.node_count(),
                artifact.edge_count()
            );
            Ok(())
        }
        Commands::EcStats => run_ec_stats(&dashboard, &format).await,
        Commands::Lengths { bin_width } => run_lengths(&dashboard, bin_width, &format).await,
        Commands::Status => run_status(&dashboard, &format).await,
    }
}

async fn run_search(
    dashboard: &ProteinDashboard,
    filter: ProteinFilter,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let records = dashboard.search(&filter).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Table => {
            if records.is_empty() {
                println!("No results found.");
                return Ok(());
            }

            let rows: Vec<&serde_json::Map<String, serde_json::Value>> =
                records.iter().map(|r| r.fields()).collect();
            let columns = collect_columns(&rows);

            let mut table = new_table(&columns);
            for row in &rows {
                let cells: Vec<String> = columns
                    .iter()
                    .map(|c| row.get(c).map(format_table_value).unwrap_or_default())
                    .collect();
                table.add_row(cells);
            }

            println!("{}", table);
            println!("{} row(s)", records.len());
        }
    }
    Ok(())
}

async fn run_count(
    dashboard: &ProteinDashboard,
    filter: ProteinFilter,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let count = dashboard.count(&filter).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "count": count })),
        OutputFormat::Table => println!("Number of matching documents: {}", count),
    }
    Ok(())
}

async fn run_graph_search(
    dashboard: &ProteinDashboard,
    filter: ProteinFilter,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let proteins = dashboard.search_graph(&filter).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&proteins)?),
        OutputFormat::Table => {
            if proteins.is_empty() {
                println!("No results found.");
                return Ok(());
            }

            let mut table = new_table(&["Entry", "InterPro", "ECNumber"]);
            for protein in &proteins {
                table.add_row(vec![
                    protein.entry.clone(),
                    truncate(&protein.interpro),
                    protein.ec_number.clone(),
                ]);
            }
            println!("{}", table);
            println!("{} row(s)", proteins.len());
        }
    }
    Ok(())
}

async fn run_neighbors(
    dashboard: &ProteinDashboard,
    entry: &str,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let neighbors = dashboard.neighbors(entry).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&neighbors)?),
        OutputFormat::Table => {
            println!("Neighbors for Protein: {}", entry);
            if neighbors.is_empty() {
                println!("No neighbors found.");
            }
            for neighbor in &neighbors {
                println!("{}", neighbor);
            }
        }
    }
    Ok(())
}

async fn run_ec_stats(dashboard: &ProteinDashboard, format: &OutputFormat) -> anyhow::Result<()> {
    let distribution = dashboard.ec_category_distribution().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&distribution)?),
        OutputFormat::Table => {
            let mut table = new_table(&["EC category", "Proteins", "Share"]);
            for category in EcCategory::ALL {
                table.add_row(vec![
                    category.label().to_string(),
                    distribution.count(category).to_string(),
                    format!("{:.1}%", distribution.share(category) * 100.0),
                ]);
            }
            println!("{}", table);
            println!("{} protein(s)", distribution.total());
        }
    }
    Ok(())
}

async fn run_lengths(
    dashboard: &ProteinDashboard,
    bin_width: usize,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let lengths = dashboard.sequence_length_distribution().await?;
    let histogram = LengthHistogram::from_lengths(&lengths, bin_width)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&histogram)?),
        OutputFormat::Table => {
            let mut table = new_table(&["Length", "Sequences"]);
            for bin in &histogram.bins {
                table.add_row(vec![
                    format!("{}-{}", bin.start, bin.end - 1),
                    bin.count.to_string(),
                ]);
            }
            println!("{}", table);
            println!("{} sequence(s)", histogram.total());
        }
    }
    Ok(())
}

async fn run_status(dashboard: &ProteinDashboard, format: &OutputFormat) -> anyhow::Result<()> {
    let status = dashboard.status().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Table => {
            println!("Status:    {}", status.status);
            println!("Version:   {}", status.version);
            println!("Documents: {}", status.documents);
            println!("Proteins:  {}", status.graph_nodes);
            println!("Edges:     {}", status.graph_edges);
        }
    }
    Ok(())
}

fn new_table<S: ToString>(header: &[S]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    table
}

/// Column order of first appearance across all rows
fn collect_columns(rows: &[&serde_json::Map<String, serde_json::Value>]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn truncate(s: &str) -> String {
    if s.chars().count() <= MAX_CELL_CHARS {
        return s.to_string();
    }
    let mut out: String = s.chars().take(MAX_CELL_CHARS).collect();
    out.push('…');
    out
}

fn format_table_value(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::String(s) => truncate(s),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => truncate(&serde_json::to_string(v).unwrap_or_default()),
    }
}
