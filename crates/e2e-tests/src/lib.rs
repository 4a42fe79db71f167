//! End-to-end test infrastructure for fastfood.
//!
//! Provides a shared TestHarness and dump builders for tests covering the
//! full gzip dump -> import -> read-only lookup/search path.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;
use rand::Rng;
use serde_json::{json, Value};

use food_ingest::{import_dump, ImportOptions};
use food_store::ProductStore;
use food_types::Manifest;

/// Shared test harness for E2E tests.
///
/// Owns a temp directory holding the dump file and the built data directory.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Location of the gzip dump
    pub dump_path: PathBuf,
    /// Data directory the import writes into
    pub data_dir: PathBuf,
}

impl TestHarness {
    /// Create a new test harness with empty dump and data paths.
    pub fn new() -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let dump_path = temp_dir.path().join("products.jsonl.gz");
        let data_dir = temp_dir.path().join("data");

        Self {
            _temp_dir: temp_dir,
            dump_path,
            data_dir,
        }
    }

    /// Write raw JSONL lines to the dump, gzip-compressed.
    pub fn write_dump(&self, lines: &[String]) {
        let file = File::create(&self.dump_path).expect("Failed to create dump");
        let mut encoder = GzEncoder::new(file, Compression::fast());
        for line in lines {
            encoder
                .write_all(line.as_bytes())
                .expect("Failed to write dump line");
            encoder.write_all(b"\n").expect("Failed to write newline");
        }
        encoder.finish().expect("Failed to finish gzip stream");
    }

    /// Import the dump into the data directory.
    pub fn import(&self, options: &ImportOptions) -> Manifest {
        import_dump(&self.dump_path, &self.data_dir, options).expect("Import failed")
    }

    /// Write the dump, import it with default options, and reopen the data
    /// directory read-only.
    pub fn build(&self, lines: &[String]) -> (Manifest, ProductStore) {
        self.write_dump(lines);
        let manifest = self.import(&ImportOptions::default());
        (manifest, self.open())
    }

    /// Open the built data directory read-only.
    pub fn open(&self) -> ProductStore {
        ProductStore::open_read_only(&self.data_dir).expect("Failed to open data directory")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// One dump line for a named product with the given nutriments object.
pub fn product_line(code: &str, name: &str, nutriments: Value) -> String {
    json!({
        "code": code,
        "product_name": name,
        "nutriments": nutriments,
    })
    .to_string()
}

/// A small realistic catalogue: dairy, bakery and a few awkward records.
pub fn sample_dump() -> Vec<String> {
    vec![
        product_line(
            "3017620422003",
            "Nutella",
            json!({"energy-kcal_100g": 539, "proteins_100g": 6.3, "fat_100g": 30.9, "carbohydrates_100g": 57.5}),
        ),
        product_line(
            "8000500310427",
            "Organic Oat Milk",
            json!({"energy-kj_100g": 192.5, "proteins_100g": "1.0"}),
        ),
        product_line("5411188112709", "Soy Milk", json!({"energy-kcal_100g": 39})),
        product_line("3228857000166", "Crème Brûlée", json!({})),
        product_line("4008400401621", "Weißbier", json!({"energy-kcal_100g": 45})),
        product_line("7622210449283", "Chocolate Chip Cookies", json!({"fat_100g": 24})),
        // Stored, never searchable
        product_line("5000112548167", "", json!({"energy-kcal_100g": 42})),
        // Name from a fallback field
        json!({"code": "0049000028911", "generic_name": "Sparkling Water"}).to_string(),
        // Out-of-range values become unknown
        product_line(
            "0000000000017",
            "Mystery Bar",
            json!({"energy-kcal_100g": 12000, "fat_100g": -3, "carbohydrates_100g": "NaN"}),
        ),
        // Rejects
        "{\"code\": \"truncated".to_string(),
        product_line("", "No Barcode", json!({})),
        product_line(&"9".repeat(101), "Long Barcode", json!({})),
        String::new(),
    ]
}

/// `count` named products with random nutrient values and unique barcodes.
pub fn random_products(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..count)
        .map(|i| {
            let kcal: f64 = rng.random_range(0.0..900.0);
            let fat: f64 = rng.random_range(0.0..100.0);
            product_line(
                &format!("{:013}", 1_000_000 + i),
                &format!("Granola Bar {i}"),
                json!({"energy-kcal_100g": kcal, "fat_100g": fat}),
            )
        })
        .collect()
}
