use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use nightowls_dataset::config::LoaderConfig;
use nightowls_dataset::dataset::SegmentStats;
use nightowls_dataset::logging::setup_logging;
use nightowls_dataset::opendataset::NightOwls;

#[derive(Parser)]
#[command(name = "nightowls")]
#[command(about = "Inspect a local copy of the NightOwls pedestrian dataset")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print per-segment label statistics
    Summary {
        /// Dataset root directory
        root: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a random sample of image paths from one segment
    Sample {
        root: PathBuf,

        #[arg(short, long, default_value = "training")]
        segment: String,

        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// Seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the label catalog as JSON
    Catalog,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LoaderConfig::load_from(path),
        None => LoaderConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    setup_logging(&config.logging).context("Failed to initialise logging")?;

    match cli.command {
        Command::Summary { root, json } => summary(&root, json, &config),
        Command::Sample {
            root,
            segment,
            count,
            seed,
        } => sample(&root, &segment, count, seed, &config),
        Command::Catalog => {
            let catalog = NightOwls::embedded_catalog()?;
            println!("{}", serde_json::to_string_pretty(catalog)?);
            Ok(())
        }
    }
}

fn load(root: &Path, config: &LoaderConfig) -> Result<NightOwls> {
    NightOwls::load_with_config(root, config)
        .with_context(|| format!("Failed to load NightOwls from {}", root.display()))
}

fn summary(root: &Path, json: bool, config: &LoaderConfig) -> Result<()> {
    let owls = load(root, config)?;
    let stats: Vec<SegmentStats> = owls
        .segments()
        .iter()
        .map(|segment| segment.statistics(owls.catalog()))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} at {}", owls.name(), owls.root().display());
    for segment in &stats {
        println!();
        println!("[{}]", segment.segment);
        println!("  images:      {}", segment.total_images);
        println!("  labeled:     {}", segment.labeled_images);
        println!("  background:  {}", segment.background_images);
        println!("  boxes:       {}", segment.total_boxes);
        for (category, count) in &segment.per_category {
            println!(
                "    {:<16} {:>8} ({:.1}%)",
                category,
                count,
                segment.category_percentage(category)
            );
        }
        println!("  occluded:    {}", segment.occluded);
        println!("  truncated:   {}", segment.truncated);
        println!("  difficult:   {}", segment.difficult);
        println!("  tracks:      {}", segment.tracks);
    }
    Ok(())
}

fn sample(
    root: &Path,
    segment_name: &str,
    count: usize,
    seed: Option<u64>,
    config: &LoaderConfig,
) -> Result<()> {
    let owls = load(root, config)?;
    let segment = owls.segment(segment_name).with_context(|| {
        format!(
            "No segment {:?}; available: {}",
            segment_name,
            owls.dataset().segment_names().join(", ")
        )
    })?;

    let picked = segment.sample(count, seed);
    info!("Sampled {} of {} images", picked.len(), segment.len());
    for data in picked {
        println!("{}", data.path.display());
    }
    Ok(())
}
