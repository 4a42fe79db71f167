//! Command implementations.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use food_ingest::{import_dump, ImportOptions};
use food_store::ProductStore;
use food_types::{Manifest, Settings};
use tracing::info;

use crate::cli::{Cli, Commands};

/// Load settings (defaults -> file -> env) and apply the global CLI flags.
pub fn load_settings(config_path: Option<&str>, log_level: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(level) = log_level {
        settings.log_level = level.to_string();
    }
    Ok(settings)
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level. Logs go to stderr.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

fn resolve_data_dir(settings: &Settings, data_dir: Option<PathBuf>) -> PathBuf {
    data_dir.unwrap_or_else(|| settings.expanded_data_dir())
}

fn open_store(data_dir: &Path) -> Result<ProductStore> {
    ProductStore::open_read_only(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))
}

/// Load settings, initialise logging and dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&settings)?;

    match cli.command {
        Commands::Import {
            dump,
            out,
            verbose,
            batch_size,
        } => {
            let out = resolve_data_dir(&settings, out);
            handle_import(&settings, &dump, &out, verbose, batch_size)
        }
        Commands::Get { barcode, data_dir } => {
            handle_get(&resolve_data_dir(&settings, data_dir), &barcode)
        }
        Commands::Search {
            query,
            limit,
            data_dir,
        } => handle_search(
            &settings,
            &resolve_data_dir(&settings, data_dir),
            &query,
            limit,
        ),
        Commands::Manifest { data_dir } => {
            handle_manifest(&resolve_data_dir(&settings, data_dir))
        }
        Commands::Stats { data_dir } => handle_stats(&resolve_data_dir(&settings, data_dir)),
    }
}

pub fn handle_import(
    settings: &Settings,
    dump: &Path,
    out: &Path,
    verbose: bool,
    batch_size: Option<usize>,
) -> Result<()> {
    let mut options = ImportOptions::from_settings(settings).with_verbose(verbose);
    if let Some(size) = batch_size {
        if size == 0 {
            bail!("--batch-size must be > 0");
        }
        options = options.with_batch_size(size);
    }

    info!(dump = ?dump, out = ?out, batch_size = options.batch_size, "Importing dump");
    let manifest = import_dump(dump, out, &options)
        .with_context(|| format!("Import of {} failed", dump.display()))?;

    println!("Output: {}", out.display());
    println!("  Products stored : {}", manifest.product_count);
    println!("  Names indexed   : {}", manifest.indexed_count);
    println!("  Skipped         : {}", manifest.skipped_count);
    if !manifest.skip_reasons.is_empty() {
        println!("  Skip reasons:");
        for (reason, count) in &manifest.skip_reasons {
            println!("    {:<20}: {}", reason, count);
        }
    }
    Ok(())
}

pub fn handle_get(data_dir: &Path, barcode: &str) -> Result<()> {
    let store = open_store(data_dir)?;
    match store.get(barcode)? {
        Some(product) => {
            println!("{}", serde_json::to_string_pretty(&product)?);
            Ok(())
        }
        None => bail!("No product with barcode {barcode}"),
    }
}

pub fn handle_search(
    settings: &Settings,
    data_dir: &Path,
    query: &str,
    limit: Option<usize>,
) -> Result<()> {
    let store = open_store(data_dir)?.with_default_limit(settings.search_limit);
    let products = store.search(query, limit.unwrap_or(0))?;
    println!("{}", serde_json::to_string_pretty(&products)?);
    Ok(())
}

pub fn handle_manifest(data_dir: &Path) -> Result<()> {
    let manifest = Manifest::read(data_dir)
        .with_context(|| format!("Failed to read manifest in {}", data_dir.display()))?;
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}

pub fn handle_stats(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let stats = store.stats()?;
    println!("Data directory: {}", data_dir.display());
    println!("  Records (estimated): {}", stats.records);
    println!("  Indexed names      : {}", stats.indexed);
    Ok(())
}
