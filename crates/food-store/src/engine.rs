//! Capability traits for the two engines behind the dual store.
//!
//! The store logic only needs exact get/set with batch commit from the
//! keyed engine and index/remove/search with batch commit from the search
//! engine. `Storage` (RocksDB) and `NameIndex` (Tantivy) are the production
//! implementations.

use food_search::{BoostedClause, IndexOp, NameHit, NameIndex};
use food_storage::{ProductKey, Storage, WriteBatch as RocksBatch};

use crate::error::StoreError;

/// Exact-lookup byte store keyed by barcode.
pub trait KeyValueEngine: Send + Sync {
    /// Pending writes, invisible until committed
    type Batch;

    fn get(&self, barcode: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn set(&self, barcode: &str, payload: &[u8]) -> Result<(), StoreError>;

    fn open_batch(&self) -> Self::Batch;

    fn batch_set(
        &self,
        batch: &mut Self::Batch,
        barcode: &str,
        payload: &[u8],
    ) -> Result<(), StoreError>;

    /// Commit every write in the batch at once.
    fn commit_batch(&self, batch: Self::Batch) -> Result<(), StoreError>;

    /// Number of stored records; may be an estimate.
    fn record_count(&self) -> Result<u64, StoreError>;
}

/// Token-search engine over folded names.
pub trait SearchEngine: Send + Sync {
    /// Pending index changes, invisible until committed
    type Batch;

    /// Index or replace the document for a barcode and make it searchable.
    fn index_document(&self, barcode: &str, name_folded: &str) -> Result<(), StoreError>;

    /// Drop the document for a barcode, if any.
    fn remove_document(&self, barcode: &str) -> Result<(), StoreError>;

    /// Hits ordered by descending combined score, at most `limit`.
    fn search(&self, clauses: &[BoostedClause], limit: usize)
        -> Result<Vec<NameHit>, StoreError>;

    fn open_batch(&self) -> Self::Batch;

    fn batch_index(&self, batch: &mut Self::Batch, barcode: &str, name_folded: &str);

    fn batch_remove(&self, batch: &mut Self::Batch, barcode: &str);

    fn commit_batch(&self, batch: Self::Batch) -> Result<(), StoreError>;

    fn document_count(&self) -> u64;
}

impl KeyValueEngine for Storage {
    type Batch = RocksBatch;

    fn get(&self, barcode: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let key = ProductKey::new(barcode)?;
        Ok(self.get_product(&key)?)
    }

    fn set(&self, barcode: &str, payload: &[u8]) -> Result<(), StoreError> {
        let key = ProductKey::new(barcode)?;
        Ok(self.put_product(&key, payload)?)
    }

    fn open_batch(&self) -> Self::Batch {
        self.new_batch()
    }

    fn batch_set(
        &self,
        batch: &mut Self::Batch,
        barcode: &str,
        payload: &[u8],
    ) -> Result<(), StoreError> {
        let key = ProductKey::new(barcode)?;
        Ok(self.batch_put(batch, &key, payload)?)
    }

    fn commit_batch(&self, batch: Self::Batch) -> Result<(), StoreError> {
        Ok(self.write_batch(batch)?)
    }

    fn record_count(&self) -> Result<u64, StoreError> {
        Ok(self.estimated_products()?)
    }
}

impl SearchEngine for NameIndex {
    type Batch = Vec<IndexOp>;

    fn index_document(&self, barcode: &str, name_folded: &str) -> Result<(), StoreError> {
        Ok(self.upsert(barcode, name_folded)?)
    }

    fn remove_document(&self, barcode: &str) -> Result<(), StoreError> {
        Ok(self.remove(barcode)?)
    }

    fn search(
        &self,
        clauses: &[BoostedClause],
        limit: usize,
    ) -> Result<Vec<NameHit>, StoreError> {
        Ok(NameIndex::search(self, clauses, limit)?)
    }

    fn open_batch(&self) -> Self::Batch {
        Vec::new()
    }

    fn batch_index(&self, batch: &mut Self::Batch, barcode: &str, name_folded: &str) {
        batch.push(IndexOp::Upsert {
            barcode: barcode.to_string(),
            name_folded: name_folded.to_string(),
        });
    }

    fn batch_remove(&self, batch: &mut Self::Batch, barcode: &str) {
        batch.push(IndexOp::Remove {
            barcode: barcode.to_string(),
        });
    }

    fn commit_batch(&self, batch: Self::Batch) -> Result<(), StoreError> {
        Ok(self.commit_ops(&batch)?)
    }

    fn document_count(&self) -> u64 {
        self.num_docs()
    }
}
