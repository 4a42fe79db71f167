//! # food-store
//!
//! The dual store behind fastfood: a keyed store for exact barcode lookups
//! and a token index for ranked name search, written together and read
//! together.
//!
//! ## Write path
//! - [`DualStore::put`] stores one product and its search document
//! - [`DualStore::write_batch`] accumulates products and flushes them with
//!   the keyed store committed before the index
//!
//! ## Read path
//! - [`DualStore::get`] decodes the stored payload for a barcode
//! - [`DualStore::search`] folds the query, runs the tiered plan from
//!   [`query`] and hydrates every hit through `get`
//!
//! The engines sit behind [`KeyValueEngine`] and [`SearchEngine`];
//! [`ProductStore`] wires in RocksDB and Tantivy.

pub mod batch;
pub mod dual;
pub mod engine;
pub mod error;
pub mod query;
pub mod store;
pub mod telemetry;

#[cfg(test)]
mod memory;

pub use batch::WriteBatch;
pub use dual::{DualStore, StoreStats};
pub use engine::{KeyValueEngine, SearchEngine};
pub use error::StoreError;
pub use query::{plan_clauses, DEFAULT_SEARCH_LIMIT};
pub use store::{ProductStore, KV_DIR, SEARCH_DIR};
pub use telemetry::{LatencyObserver, NoopObserver, StoreOp};
