//! CLI argument parsing for fastfood.
//!
//! CLI flags override every other configuration source.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// fastfood
///
/// Product nutrition lookup and fuzzy name search over Open Food Facts dumps.
#[derive(Parser, Debug)]
#[command(name = "fastfood")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/fastfood/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a data directory from a gzip-compressed JSONL dump
    Import {
        /// Path to the dump (.jsonl.gz)
        #[arg(long)]
        dump: PathBuf,

        /// Output data directory (default from config)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Log progress while importing
        #[arg(short, long)]
        verbose: bool,

        /// Products per committed batch
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// Look up one product by barcode
    Get {
        barcode: String,

        /// Data directory (default from config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Search products by name
    Search {
        query: String,

        /// Maximum results (0 uses the configured default, capped at 100)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Data directory (default from config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Print the manifest of a data directory
    Manifest {
        /// Data directory (default from config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Show record and index counts
    Stats {
        /// Data directory (default from config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_import() {
        let cli = Cli::parse_from([
            "fastfood",
            "import",
            "--dump",
            "products.jsonl.gz",
            "--out",
            "/srv/fastfood",
            "-v",
            "--batch-size",
            "1000",
        ]);
        match cli.command {
            Commands::Import {
                dump,
                out,
                verbose,
                batch_size,
            } => {
                assert_eq!(dump, PathBuf::from("products.jsonl.gz"));
                assert_eq!(out, Some(PathBuf::from("/srv/fastfood")));
                assert!(verbose);
                assert_eq!(batch_size, Some(1000));
            }
            _ => panic!("Expected Import command"),
        }
    }

    #[test]
    fn test_cli_import_requires_dump() {
        assert!(Cli::try_parse_from(["fastfood", "import"]).is_err());
    }

    #[test]
    fn test_cli_get() {
        let cli = Cli::parse_from(["fastfood", "get", "3017620422003", "--data-dir", "./data"]);
        match cli.command {
            Commands::Get { barcode, data_dir } => {
                assert_eq!(barcode, "3017620422003");
                assert_eq!(data_dir, Some(PathBuf::from("./data")));
            }
            _ => panic!("Expected Get command"),
        }
    }

    #[test]
    fn test_cli_search_with_limit() {
        let cli = Cli::parse_from(["fastfood", "search", "oat milk", "-n", "5"]);
        match cli.command {
            Commands::Search { query, limit, .. } => {
                assert_eq!(query, "oat milk");
                assert_eq!(limit, Some(5));
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "fastfood",
            "stats",
            "--config",
            "/etc/fastfood.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.config, Some("/etc/fastfood.toml".to_string()));
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Stats { .. }));
    }

    #[test]
    fn test_cli_manifest() {
        let cli = Cli::parse_from(["fastfood", "manifest"]);
        assert!(matches!(cli.command, Commands::Manifest { data_dir: None }));
    }
}
