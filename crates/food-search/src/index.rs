//! On-disk Tantivy index for folded product names.

use std::path::{Path, PathBuf};

use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy};
use tracing::{debug, info};

use crate::error::SearchError;
use crate::schema::{build_name_schema, name_analyzer, NameSchema, NAME_TOKENIZER};

const DEFAULT_WRITER_MEMORY_MB: usize = 50;

/// Present in every directory Tantivy has created an index in.
const META_FILE: &str = "meta.json";

/// Where the name index lives and how much memory its writer may buffer.
#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    pub index_path: PathBuf,
    /// Writer arena in MB, shared by all indexing threads
    pub writer_memory_mb: usize,
}

impl SearchIndexConfig {
    pub fn new(index_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
            writer_memory_mb: DEFAULT_WRITER_MEMORY_MB,
        }
    }

    pub fn with_memory_mb(mut self, mb: usize) -> Self {
        self.writer_memory_mb = mb;
        self
    }

    fn has_index(&self) -> bool {
        self.index_path.join(META_FILE).exists()
    }
}

/// An opened name index together with its resolved schema fields.
pub struct SearchIndex {
    index: Index,
    schema: NameSchema,
    config: SearchIndexConfig,
}

impl SearchIndex {
    /// Open the index at the configured path, creating directory and index
    /// when absent.
    pub fn open_or_create(config: SearchIndexConfig) -> Result<Self, SearchError> {
        if config.has_index() {
            return Self::open_existing(config);
        }

        std::fs::create_dir_all(&config.index_path)?;
        let schema = build_name_schema();
        let index = Index::create_in_dir(&config.index_path, schema.schema().clone())?;
        register_tokenizers(&index);
        info!(path = ?config.index_path, "Created name index");

        Ok(Self {
            index,
            schema,
            config,
        })
    }

    /// Open an index that must already exist; never creates anything on disk.
    pub fn open_existing(config: SearchIndexConfig) -> Result<Self, SearchError> {
        if !config.has_index() {
            return Err(SearchError::IndexNotFound(
                config.index_path.display().to_string(),
            ));
        }

        let index = Index::open_in_dir(&config.index_path)?;
        register_tokenizers(&index);
        let schema = NameSchema::from_schema(index.schema())?;
        debug!(path = ?config.index_path, "Opened name index");

        Ok(Self {
            index,
            schema,
            config,
        })
    }

    pub fn schema(&self) -> &NameSchema {
        &self.schema
    }

    /// Take the index writer lock with the configured arena size.
    pub fn writer(&self) -> Result<IndexWriter, SearchError> {
        let budget_bytes = self.config.writer_memory_mb * 1024 * 1024;
        let writer = self.index.writer(budget_bytes)?;
        debug!(memory_mb = self.config.writer_memory_mb, "Acquired name index writer");
        Ok(writer)
    }

    /// Reader with a manual reload policy; owners call `reload` after commits.
    pub fn reader(&self) -> Result<IndexReader, SearchError> {
        Ok(self
            .index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?)
    }

    pub fn path(&self) -> &Path {
        &self.config.index_path
    }
}

/// Tokenizers live in memory only, so every opened `Index` needs them.
fn register_tokenizers(index: &Index) {
    index.tokenizers().register(NAME_TOKENIZER, name_analyzer());
}
