//! # food-types
//!
//! Shared domain types for the fastfood product database.
//!
//! This crate defines the leaf building blocks used by every other crate:
//! - [`Product`]: the persisted per-barcode nutrition record
//! - [`codec`]: the versioned binary payload stored under each barcode
//! - [`fold_name`]: text folding shared by indexing and querying
//! - [`Manifest`]: metadata written next to a built data directory
//! - [`Settings`]: layered configuration
//!
//! ## Usage
//!
//! ```rust
//! use food_types::{fold_name, Product};
//!
//! let product = Product::new("3017620422003", "Crème Brûlée").with_kcal(280.0);
//! let bytes = product.encode();
//! let decoded = Product::decode("3017620422003", &bytes).unwrap();
//! assert_eq!(decoded, product);
//! assert_eq!(fold_name(&decoded.name), "creme brulee");
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod fold;
pub mod manifest;
pub mod product;

pub use codec::SCHEMA_VERSION;
pub use config::Settings;
pub use error::{CodecError, FoodError};
pub use fold::fold_name;
pub use manifest::{Manifest, MANIFEST_FILE};
pub use product::{check_barcode, BarcodeError, Product, MAX_BARCODE_LEN};
