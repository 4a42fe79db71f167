//! # food-search
//!
//! Folded product-name search for fastfood using Tantivy.
//!
//! Documents are `{barcode, name_folded}` pairs; callers fold names before
//! they reach this crate. Queries are lists of boosted clauses (phrase,
//! phrase-prefix, fuzzy term) combined as "should" clauses and ranked by
//! combined score.
//!
//! ## Features
//! - Embedded Tantivy index with MmapDirectory for persistence
//! - Upsert-by-barcode indexing with explicit commits
//! - Read-only opening for serving processes

pub mod error;
pub mod index;
pub mod name_index;
pub mod query;
pub mod schema;

pub use error::SearchError;
pub use index::{SearchIndex, SearchIndexConfig};
pub use name_index::{IndexOp, NameHit, NameIndex};
pub use query::{BoostedClause, NameQuery};
pub use schema::{build_name_schema, name_analyzer, NameSchema, NAME_TOKENIZER};
