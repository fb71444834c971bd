//! Cite
//!
//! Command-line front end for inspecting citation URNs, extracting text
//! from a work and editing its passage chain. Works and passages are read
//! from JSON files; results are written to stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cite_passages::config::{Config, OutputFormat};
use cite_passages::urn::{
    find_range_endpoints, is_cite_urn, is_cts_urn, is_range, split_cts, wants_substring,
};
use cite_passages::{extract_text, Passage, TextAndId, Work};

#[derive(Parser)]
#[command(name = "cite")]
#[command(about = "Inspect CTS URNs and extract passage text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a URN is classified
    Inspect {
        urn: String,
    },

    /// Extract the text addressed by a URN
    Extract {
        /// Work JSON file
        #[arg(long)]
        work: PathBuf,
        urn: String,
    },

    /// Rebuild canonical passage order
    Sort {
        #[arg(long)]
        work: PathBuf,
    },

    /// Insert a passage next to the neighbors it names
    Insert {
        #[arg(long)]
        work: PathBuf,
        /// Passage JSON file
        #[arg(long)]
        passage: PathBuf,
    },

    /// Delete a passage by id
    Delete {
        #[arg(long)]
        work: PathBuf,
        id: String,
    },
}

/// URN classification report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Inspection {
    urn: String,
    scheme: &'static str,
    depth: Option<String>,
    range: bool,
    substring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoints: Option<(String, String)>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let (config, config_errors) = Config::from_env();

    let filter = if cli.verbose {
        "cite_passages=debug,cite=debug".to_string()
    } else {
        config.log_filter.clone()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    for e in &config_errors {
        tracing::warn!("{}, using default", e);
    }

    match cli.command {
        Commands::Inspect { urn } => {
            let inspection = inspect(&urn);
            match config.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&inspection)?),
                OutputFormat::Text => {
                    println!("urn:       {}", inspection.urn);
                    println!("scheme:    {}", inspection.scheme);
                    println!("depth:     {}", inspection.depth.as_deref().unwrap_or("-"));
                    println!("range:     {}", inspection.range);
                    println!("substring: {}", inspection.substring);
                    if let Some((start, end)) = &inspection.endpoints {
                        println!("start:     {}", start);
                        println!("end:       {}", end);
                    }
                }
            }
        }
        Commands::Extract { work, urn } => {
            let mut work: Work = read_json(&work)?;
            if config.auto_sort && !work.ordered {
                tracing::info!("Sorting {} before extraction", work.work_id);
                work = work.sort_passages()?;
            }
            let extracts = extract_text(&urn, &work)
                .with_context(|| format!("Failed to extract {}", urn))?;
            print_extracts(&extracts, config.output)?;
        }
        Commands::Sort { work } => {
            let work: Work = read_json(&work)?;
            let sorted = work
                .sort_passages()
                .with_context(|| format!("Failed to sort {}", work.work_id))?;
            print_work(&sorted, config.output)?;
        }
        Commands::Insert { work, passage } => {
            let work: Work = read_json(&work)?;
            let passage: Passage = read_json(&passage)?;
            let id = passage.passage_id.clone();
            let updated = work
                .insert_passage(passage)
                .with_context(|| format!("Failed to insert {}", id))?;
            tracing::info!("Inserted {} into {}", id, updated.work_id);
            print_work(&updated, config.output)?;
        }
        Commands::Delete { work, id } => {
            let work: Work = read_json(&work)?;
            let updated = work
                .delete_passage(&id)
                .with_context(|| format!("Failed to delete {}", id))?;
            tracing::info!("Deleted {} from {}", id, updated.work_id);
            print_work(&updated, config.output)?;
        }
    }

    Ok(())
}

fn inspect(urn: &str) -> Inspection {
    let scheme = if is_cts_urn(urn) {
        "cts"
    } else if is_cite_urn(urn) {
        "cite2"
    } else {
        "invalid"
    };

    Inspection {
        urn: urn.to_string(),
        scheme,
        depth: split_cts(urn).depth().map(|d| d.to_string()),
        range: is_range(urn),
        substring: wants_substring(urn),
        endpoints: if is_range(urn) {
            find_range_endpoints(urn).ok()
        } else {
            None
        },
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_extracts(extracts: &[TextAndId], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(extracts)?),
        OutputFormat::Text => {
            for extract in extracts {
                println!("{}\t{}", extract.id, extract.text);
            }
        }
    }
    Ok(())
}

fn print_work(work: &Work, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(work)?),
        OutputFormat::Text => {
            println!("{} (ordered: {})", work.work_id, work.ordered);
            for passage in work.live_passages() {
                println!("{}\t{}\t{}", passage.index, passage.passage_id, passage.text.txt);
            }
        }
    }
    Ok(())
}
