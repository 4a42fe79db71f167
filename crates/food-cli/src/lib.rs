//! fastfood command-line library.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (import, get, search, manifest, stats)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{
    handle_get, handle_import, handle_manifest, handle_search, handle_stats, init_logging,
    load_settings, run,
};
