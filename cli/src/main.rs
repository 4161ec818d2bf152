//! Sociogram CLI: command-line host for the Sociogram engine
//!
//! Reads a CSV rating matrix, runs the pipeline, and prints the result.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use sociogram::{
    CategoryLookup, Envelope, GraphVariant, RatingMatrix, SociogramConfig, SociogramPipeline,
    SociogramReport,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sociogram-cli", version, about = "Sociogram engine CLI")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration file (YAML, or JSON by extension)
    #[arg(long, global = true, env = "SOCIOGRAM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum VariantArg {
    Full,
    Positive,
    Negative,
}

impl From<VariantArg> for GraphVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Full => GraphVariant::Full,
            VariantArg::Positive => GraphVariant::Positive,
            VariantArg::Negative => GraphVariant::Negative,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Score a rating matrix and build its sociogram
    Analyze {
        /// CSV matrix: header of raters, one row per rated entity
        matrix: PathBuf,

        /// Category file mapping entity id to F/M (YAML, or JSON by extension)
        #[arg(long)]
        categories: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,

        /// Graph variant whose layout and groups are shown in table mode
        #[arg(long, default_value = "positive")]
        variant: VariantArg,
    },
    /// Print the effective symbol table
    Symbols,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => SociogramConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SociogramConfig::default(),
    };
    let pipeline = SociogramPipeline::new(config)?;

    match cli.command {
        Commands::Analyze {
            matrix,
            categories,
            format,
            variant,
        } => {
            let lookup = match &categories {
                Some(path) => CategoryLookup::from_path(path)
                    .with_context(|| format!("loading categories {}", path.display()))?,
                None => CategoryLookup::new(),
            };
            let matrix = RatingMatrix::from_csv_path(&matrix)
                .with_context(|| format!("reading matrix {}", matrix.display()))?;
            debug!(entities = matrix.len(), categories = lookup.len(), "inputs loaded");
            let report = pipeline.run(&matrix, &lookup)?;
            print_report(&report, &format, variant.into())
        }
        Commands::Symbols => {
            let mut table = Table::new();
            table.set_header(vec!["Token", "Weight"]);
            for (token, weight) in pipeline.symbols().entries() {
                let shown = if token.is_empty() { "(empty)" } else { token };
                table.add_row(vec![shown.to_string(), format!("{:+.1}", weight)]);
            }
            println!("{}", table);
            Ok(())
        }
    }
}

fn print_report(report: &SociogramReport, format: &OutputFormat, variant: GraphVariant) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", report.to_json_pretty()?);
        }
        OutputFormat::Csv => {
            let mut header = vec![String::new()];
            header.extend(report.entities.iter().map(|e| format_csv_value(e.id.as_str())));
            header.push("net_score".to_string());
            println!("{}", header.join(","));

            for row in &report.scored_matrix {
                let mut cells = vec![format_csv_value(row.entity.as_str())];
                cells.extend(row.tokens.iter().map(|t| format_csv_value(t)));
                cells.push(row.net_score.to_string());
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            let bundle = report.bundle(variant);

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Entity", "Category", "Net score", "Acceptance %", "x", "y"]);
            for (entry, entity) in report.acceptance.iter().zip(&report.entities) {
                let (x, y) = bundle
                    .layout
                    .position(&entry.entity)
                    .map(|p| (format!("{:.3}", p.x), format!("{:.3}", p.y)))
                    .unwrap_or_default();
                table.add_row(vec![
                    entry.entity.to_string(),
                    entity.category.to_string(),
                    format!("{}", entry.net_score),
                    format!("{:.1}", entry.index),
                    x,
                    y,
                ]);
            }
            println!("{}", table);
            println!(
                "{} entities, {} {} edge(s), {:?} layout",
                report.entities.len(),
                bundle.graph.edge_count(),
                variant,
                bundle.layout.strategy
            );

            if bundle.groups.is_empty() {
                println!("(no cohesion groups)");
                return Ok(());
            }

            let mut groups = Table::new();
            groups.set_content_arrangement(ContentArrangement::Dynamic);
            groups.set_header(vec!["Group", "Members", "Envelope"]);
            for (i, group) in bundle.groups.iter().enumerate() {
                let members: Vec<&str> = group.members.iter().map(|m| m.as_str()).collect();
                let envelope = match &group.envelope {
                    Some(Envelope::Hull { vertices }) => format!("hull ({} vertices)", vertices.len()),
                    Some(Envelope::Disk { center, radius }) => {
                        format!("disk r={} at ({:.3}, {:.3})", radius, center.x, center.y)
                    }
                    None => "-".to_string(),
                };
                groups.add_row(vec![(i + 1).to_string(), members.join(", "), envelope]);
            }
            println!("{}", groups);
        }
    }

    Ok(())
}

fn format_csv_value(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
