//! # food-ingest
//!
//! Builds a fastfood data directory from an Open Food Facts JSONL dump.
//!
//! - [`raw`]: the loosely typed dump record
//! - [`validate`]: name resolution, nutrient coercion and range checks
//! - [`pipeline`]: streaming ingestion into a dual-store write batch
//! - [`summary`]: per-run counters and skip classification
//!
//! ```no_run
//! use std::path::Path;
//! use food_ingest::{import_dump, ImportOptions};
//!
//! let manifest = import_dump(
//!     Path::new("openfoodfacts-products.jsonl.gz"),
//!     Path::new("./data"),
//!     &ImportOptions::default().with_verbose(true),
//! )?;
//! println!("{} products", manifest.product_count);
//! # Ok::<(), food_ingest::IngestError>(())
//! ```

pub mod error;
pub mod lines;
pub mod pipeline;
pub mod raw;
pub mod summary;
pub mod validate;

pub use error::IngestError;
pub use pipeline::{import_dump, ImportOptions, Importer};
pub use raw::{NutrientValue, RawProduct};
pub use summary::{RunSummary, SkipReason};
pub use validate::build_product;
