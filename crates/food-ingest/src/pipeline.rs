//! Streaming ingestion of an Open Food Facts JSONL dump.
//!
//! One line at a time: parse, classify rejects, validate, stage into the
//! write batch, and flush whenever the batch reaches the configured size.
//! Per-record problems are counted and never abort the run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use flate2::read::MultiGzDecoder;
use food_store::{KeyValueEngine, ProductStore, SearchEngine, WriteBatch};
use food_types::{check_barcode, BarcodeError, Manifest, Settings, SCHEMA_VERSION};
use tracing::{debug, info, warn};

use crate::error::IngestError;
use crate::lines::{BoundedLines, Line, MAX_LINE_BYTES};
use crate::raw::RawProduct;
use crate::summary::{RunSummary, SkipReason};
use crate::validate::build_product;

/// Read buffer in front of the gzip decoder.
const READ_BUFFER_BYTES: usize = 4 * 1024 * 1024;

/// Ingestion tuning.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Products staged before a flush
    pub batch_size: usize,
    /// Accepted products between progress lines (verbose only)
    pub progress_interval: u64,
    /// Longest line buffered; longer lines are skipped
    pub max_line_bytes: usize,
    /// Memory budget for the search index writer in MB
    pub writer_memory_mb: usize,
    /// Log progress while importing
    pub verbose: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl ImportOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            batch_size: settings.batch_size,
            progress_interval: settings.progress_interval,
            max_line_bytes: MAX_LINE_BYTES,
            writer_memory_mb: settings.writer_memory_mb,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

/// Drives one ingestion run.
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Ingest every line of `reader` into `batch`, closing it at the end.
    ///
    /// Returns the run summary; fails only on read errors or failed flushes.
    pub fn ingest<R, K, S>(
        &self,
        reader: R,
        mut batch: WriteBatch<'_, K, S>,
    ) -> Result<RunSummary, IngestError>
    where
        R: BufRead,
        K: KeyValueEngine,
        S: SearchEngine,
    {
        let batch_size = self.options.batch_size.max(1);
        let progress_interval = self.options.progress_interval.max(1);
        let start = Instant::now();

        let mut summary = RunSummary::new();
        let mut lines = BoundedLines::new(reader, self.options.max_line_bytes);

        while let Some(line) = lines.next_line()? {
            let bytes = match line {
                Line::Text(bytes) => bytes,
                Line::TooLong(len) => {
                    warn!(bytes = len, "Skipping oversized line");
                    summary.record_skip(SkipReason::LineTooLong);
                    continue;
                }
            };
            if bytes.is_empty() {
                continue;
            }

            let raw: RawProduct = match serde_json::from_slice(bytes) {
                Ok(raw) => raw,
                Err(e) => {
                    debug!(error = %e, "Skipping unparsable line");
                    summary.record_skip(SkipReason::ParseError);
                    continue;
                }
            };

            let barcode = raw.barcode();
            match check_barcode(barcode) {
                Ok(()) => {}
                Err(BarcodeError::Empty) => {
                    summary.record_skip(SkipReason::EmptyBarcode);
                    continue;
                }
                Err(BarcodeError::TooLong(len)) => {
                    debug!(len, "Skipping over-long barcode");
                    summary.record_skip(SkipReason::BarcodeTooLong);
                    continue;
                }
            }

            let product = build_product(barcode, &raw);
            batch.put(&product)?;
            summary.record_product(product.is_indexable());

            if batch.len() >= batch_size {
                batch.flush()?;
            }

            if self.options.verbose && summary.product_count % progress_interval == 0 {
                let elapsed = start.elapsed();
                let rate = summary.product_count as f64 / elapsed.as_secs_f64().max(1e-9);
                info!(
                    products = summary.product_count,
                    indexed = summary.indexed_count,
                    skipped = summary.skipped_count,
                    rate_per_s = rate as u64,
                    elapsed_s = elapsed.as_secs(),
                    "Import progress"
                );
            }
        }

        batch.close()?;

        info!(
            products = summary.product_count,
            indexed = summary.indexed_count,
            skipped = summary.skipped_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Ingestion complete"
        );
        Ok(summary)
    }
}

/// Build a data directory from a gzip-compressed JSONL dump.
///
/// Creates `out_dir` and the store inside it, ingests the dump, closes the
/// store and writes `manifest.json`.
pub fn import_dump(
    dump: &Path,
    out_dir: &Path,
    options: &ImportOptions,
) -> Result<Manifest, IngestError> {
    info!(dump = ?dump, out = ?out_dir, "Starting import");

    let store_settings = Settings {
        writer_memory_mb: options.writer_memory_mb,
        batch_size: options.batch_size,
        ..Settings::default()
    };
    let store = ProductStore::create(out_dir, &store_settings)?;

    let file = File::open(dump).map_err(|source| IngestError::OpenDump {
        path: dump.to_path_buf(),
        source,
    })?;
    let reader = BufReader::with_capacity(READ_BUFFER_BYTES, MultiGzDecoder::new(file));

    let summary = Importer::new(options.clone()).ingest(reader, store.write_batch())?;
    store.close()?;

    let manifest = Manifest {
        build_time: Utc::now(),
        dump_source: dump.display().to_string(),
        product_count: summary.product_count,
        indexed_count: summary.indexed_count,
        skipped_count: summary.skipped_count,
        schema_version: SCHEMA_VERSION,
        skip_reasons: summary.skip_reasons,
    };
    manifest.write(out_dir)?;

    info!(
        products = manifest.product_count,
        indexed = manifest.indexed_count,
        skipped = manifest.skipped_count,
        "Import complete"
    );
    Ok(manifest)
}
