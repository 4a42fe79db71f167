//! Dual store: keyed payloads plus a folded-name index kept in step.
//!
//! Writes always land in the keyed engine before the search engine, so a
//! failure between the two leaves a record retrievable but not searchable,
//! never searchable but missing. Every write is an upsert keyed by barcode;
//! replaying the same records converges to the same state.

use std::sync::Arc;
use std::time::Instant;

use food_types::{check_barcode, fold_name, BarcodeError, Product};
use tracing::debug;

use crate::batch::WriteBatch;
use crate::engine::{KeyValueEngine, SearchEngine};
use crate::error::StoreError;
use crate::query::{effective_limit, plan_clauses, DEFAULT_SEARCH_LIMIT};
use crate::telemetry::{LatencyObserver, NoopObserver, StoreOp};

/// Record and document counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Stored products (RocksDB reports an estimate)
    pub records: u64,
    /// Searchable documents
    pub indexed: u64,
}

pub struct DualStore<K, S> {
    pub(crate) kv: K,
    pub(crate) search: S,
    default_limit: usize,
    observer: Arc<dyn LatencyObserver>,
}

pub(crate) fn validate_barcode(barcode: &str) -> Result<(), StoreError> {
    check_barcode(barcode).map_err(|e| match e {
        BarcodeError::Empty => StoreError::EmptyBarcode,
        BarcodeError::TooLong(len) => StoreError::BarcodeTooLong(len),
    })
}

impl<K: KeyValueEngine, S: SearchEngine> DualStore<K, S> {
    pub fn new(kv: K, search: S) -> Self {
        Self {
            kv,
            search,
            default_limit: DEFAULT_SEARCH_LIMIT,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Result count used when `search` is called with a limit of 0.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Install a latency observer for `get` and `search`.
    pub fn with_observer(mut self, observer: Arc<dyn LatencyObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Store one product and update its search document immediately.
    ///
    /// A product without a name is stored but any stale search document
    /// for its barcode is removed.
    pub fn put(&self, product: &Product) -> Result<(), StoreError> {
        validate_barcode(&product.barcode)?;

        self.kv.set(&product.barcode, &product.encode())?;
        if product.is_indexable() {
            self.search
                .index_document(&product.barcode, &fold_name(&product.name))?;
        } else {
            self.search.remove_document(&product.barcode)?;
        }

        debug!(barcode = %product.barcode, "Put product");
        Ok(())
    }

    /// Look up a product by barcode.
    ///
    /// Returns `Ok(None)` when no record exists, including for barcodes that
    /// could never have been stored (empty or over-long).
    pub fn get(&self, barcode: &str) -> Result<Option<Product>, StoreError> {
        let start = Instant::now();
        let result = self.get_inner(barcode);
        self.observer.observe(StoreOp::Get, start.elapsed());
        result
    }

    fn get_inner(&self, barcode: &str) -> Result<Option<Product>, StoreError> {
        if check_barcode(barcode).is_err() {
            return Ok(None);
        }

        let Some(bytes) = self.kv.get(barcode)? else {
            return Ok(None);
        };

        Product::decode(barcode, &bytes)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                barcode: barcode.to_string(),
                source,
            })
    }

    /// Ranked name search, hydrated from the keyed store.
    ///
    /// `limit` of 0 uses the default; anything above the cap is clamped.
    /// Hits whose record is missing or undecodable are dropped, so fewer
    /// than `limit` products may come back.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<Product>, StoreError> {
        let start = Instant::now();
        let result = self.search_inner(query, limit);
        self.observer.observe(StoreOp::Search, start.elapsed());
        result
    }

    fn search_inner(&self, query: &str, limit: usize) -> Result<Vec<Product>, StoreError> {
        let folded = fold_name(query);
        let clauses = plan_clauses(&folded);
        if clauses.is_empty() {
            return Ok(Vec::new());
        }

        let limit = effective_limit(limit, self.default_limit);
        let hits = self.search.search(&clauses, limit)?;

        let mut products = Vec::with_capacity(hits.len());
        for hit in hits {
            match self.get_inner(&hit.barcode) {
                Ok(Some(product)) => products.push(product),
                Ok(None) => {
                    debug!(barcode = %hit.barcode, "Dropping search hit with no stored record");
                }
                Err(e) => {
                    debug!(barcode = %hit.barcode, error = %e, "Dropping search hit that failed hydration");
                }
            }
        }

        debug!(query = %folded, limit, results = products.len(), "Search complete");
        Ok(products)
    }

    /// Start a batched write. Only one batch should be active at a time.
    pub fn write_batch(&self) -> WriteBatch<'_, K, S> {
        WriteBatch::new(self)
    }

    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        Ok(StoreStats {
            records: self.kv.record_count()?,
            indexed: self.search.document_count(),
        })
    }
}
