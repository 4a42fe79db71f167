//! On-disk product store: RocksDB under `kv/`, Tantivy under `search/`.

use std::path::Path;

use food_search::{NameIndex, SearchIndexConfig};
use food_storage::Storage;
use food_types::Settings;
use tracing::info;

use crate::dual::DualStore;
use crate::error::StoreError;

/// Keyed store subdirectory of a data directory
pub const KV_DIR: &str = "kv";
/// Search index subdirectory of a data directory
pub const SEARCH_DIR: &str = "search";

pub type ProductStore = DualStore<Storage, NameIndex>;

impl DualStore<Storage, NameIndex> {
    /// Open a writable store in `dir`, creating both engines if missing.
    pub fn create(dir: &Path, settings: &Settings) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;

        let storage = Storage::open(&dir.join(KV_DIR))?;
        let index = NameIndex::open_or_create(
            SearchIndexConfig::new(dir.join(SEARCH_DIR)).with_memory_mb(settings.writer_memory_mb),
        )?;

        info!(path = ?dir, "Opened product store for writing");
        Ok(DualStore::new(storage, index).with_default_limit(settings.search_limit))
    }

    /// Open an existing store for lookups and search only.
    pub fn open_read_only(dir: &Path) -> Result<Self, StoreError> {
        let storage = Storage::open_read_only(&dir.join(KV_DIR))?;
        let index = NameIndex::open_read_only(&dir.join(SEARCH_DIR))?;

        info!(path = ?dir, "Opened product store read-only");
        Ok(DualStore::new(storage, index))
    }

    pub fn is_read_only(&self) -> bool {
        self.kv.is_read_only()
    }

    /// Flush the keyed store to disk and release both engines.
    pub fn close(self) -> Result<(), StoreError> {
        if !self.kv.is_read_only() {
            self.kv.flush()?;
        }
        info!(path = ?self.search.path().parent(), "Closed product store");
        Ok(())
    }
}
