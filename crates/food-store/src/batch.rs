//! Batched writes against the dual store.
//!
//! A batch accumulates encoded payloads and index operations, then
//! `flush` commits the keyed-store batch followed by the search batch.
//! Once a flush fails the batch is poisoned: every further call returns
//! [`StoreError::BatchPoisoned`].

use food_types::{fold_name, Product};
use tracing::{debug, error};

use crate::dual::{validate_barcode, DualStore};
use crate::engine::{KeyValueEngine, SearchEngine};
use crate::error::StoreError;

pub struct WriteBatch<'a, K: KeyValueEngine, S: SearchEngine> {
    store: &'a DualStore<K, S>,
    kv_batch: K::Batch,
    search_batch: S::Batch,
    len: usize,
    poisoned: bool,
}

impl<'a, K: KeyValueEngine, S: SearchEngine> WriteBatch<'a, K, S> {
    pub(crate) fn new(store: &'a DualStore<K, S>) -> Self {
        Self {
            kv_batch: store.kv.open_batch(),
            search_batch: store.search.open_batch(),
            store,
            len: 0,
            poisoned: false,
        }
    }

    fn ensure_usable(&self) -> Result<(), StoreError> {
        if self.poisoned {
            return Err(StoreError::BatchPoisoned);
        }
        Ok(())
    }

    /// Stage one product. Nothing is visible until the next flush.
    pub fn put(&mut self, product: &Product) -> Result<(), StoreError> {
        self.ensure_usable()?;
        validate_barcode(&product.barcode)?;

        self.store
            .kv
            .batch_set(&mut self.kv_batch, &product.barcode, &product.encode())?;
        if product.is_indexable() {
            self.store.search.batch_index(
                &mut self.search_batch,
                &product.barcode,
                &fold_name(&product.name),
            );
        } else {
            self.store
                .search
                .batch_remove(&mut self.search_batch, &product.barcode);
        }
        self.len += 1;
        Ok(())
    }

    /// Products staged since the last flush.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Commit staged products: keyed store first, then the search index.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.ensure_usable()?;
        if self.len == 0 {
            return Ok(());
        }

        let kv_batch = std::mem::replace(&mut self.kv_batch, self.store.kv.open_batch());
        let search_batch =
            std::mem::replace(&mut self.search_batch, self.store.search.open_batch());
        let count = self.len;
        self.len = 0;

        if let Err(e) = self.store.kv.commit_batch(kv_batch) {
            self.poisoned = true;
            error!(count, error = %e, "Keyed store batch commit failed");
            return Err(e);
        }
        if let Err(e) = self.store.search.commit_batch(search_batch) {
            self.poisoned = true;
            error!(count, error = %e, "Search batch commit failed; records stored but not searchable");
            return Err(e);
        }

        debug!(count, "Flushed write batch");
        Ok(())
    }

    /// Flush whatever remains and end the batch.
    pub fn close(mut self) -> Result<(), StoreError> {
        self.flush()
    }
}
