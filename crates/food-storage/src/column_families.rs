//! Column family definitions for RocksDB.
//!
//! - products: encoded product payloads keyed by barcode (Zstd compressed)

use rocksdb::{ColumnFamilyDescriptor, Options};

/// Column family name for product payloads
pub const CF_PRODUCTS: &str = "products";

/// All column family names
pub const ALL_CF_NAMES: &[&str] = &[CF_PRODUCTS];

/// Create column family options for products (point lookups, compressed)
fn products_options() -> Options {
    let mut opts = Options::default();
    opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
    // Lookups are exact-key only
    opts.optimize_for_point_lookup(64);
    opts
}

/// Build all column family descriptors
pub fn build_cf_descriptors() -> Vec<ColumnFamilyDescriptor> {
    vec![ColumnFamilyDescriptor::new(CF_PRODUCTS, products_options())]
}
