//! fastfood
//!
//! Product nutrition lookup and fuzzy name search over Open Food Facts dumps.
//!
//! # Usage
//!
//! ```bash
//! fastfood import --dump openfoodfacts-products.jsonl.gz --out ./data [-v] [--batch-size N]
//! fastfood get 3017620422003 [--data-dir ./data]
//! fastfood search "oat milk" [-n 10] [--data-dir ./data]
//! fastfood manifest [--data-dir ./data]
//! fastfood stats [--data-dir ./data]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/fastfood/config.toml)
//! 3. Environment variables (FOOD_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use food_cli::{run, Cli};

fn main() -> Result<()> {
    run(Cli::parse())
}
