//! Import pipeline E2E tests: gzip dump -> data directory -> lookups.

use pretty_assertions::assert_eq;

use e2e_tests::{random_products, sample_dump, TestHarness};
use food_ingest::ImportOptions;
use food_types::{Manifest, SCHEMA_VERSION};

#[test]
fn test_import_counts_and_manifest() {
    let harness = TestHarness::new();
    let (manifest, _store) = harness.build(&sample_dump());

    assert_eq!(manifest.product_count, 9);
    assert_eq!(manifest.indexed_count, 8);
    assert_eq!(manifest.skipped_count, 3);
    assert_eq!(manifest.schema_version, SCHEMA_VERSION);

    let reasons: Vec<(&str, u64)> = manifest
        .skip_reasons
        .iter()
        .map(|(k, v)| (k.as_str(), *v))
        .collect();
    assert_eq!(
        reasons,
        vec![("barcode_too_long", 1), ("empty_barcode", 1), ("parse_error", 1)]
    );

    assert_eq!(Manifest::read(&harness.data_dir).unwrap(), manifest);
}

#[test]
fn test_lookup_after_reopen() {
    let harness = TestHarness::new();
    let (_, store) = harness.build(&sample_dump());
    assert!(store.is_read_only());

    let nutella = store.get("3017620422003").unwrap().unwrap();
    assert_eq!(nutella.name, "Nutella");
    assert_eq!(nutella.kcal_100g, Some(539.0));
    assert_eq!(nutella.protein_100g, Some(6.3));
    assert_eq!(nutella.fat_100g, Some(30.9));
    assert_eq!(nutella.carbs_100g, Some(57.5));

    let oat = store.get("8000500310427").unwrap().unwrap();
    assert!((oat.kcal_100g.unwrap() - 46.0).abs() < 0.01);
    assert_eq!(oat.protein_100g, Some(1.0));
    assert_eq!(oat.fat_100g, None);

    let water = store.get("0049000028911").unwrap().unwrap();
    assert_eq!(water.name, "Sparkling Water");

    let mystery = store.get("0000000000017").unwrap().unwrap();
    assert_eq!(mystery.kcal_100g, None);
    assert_eq!(mystery.fat_100g, None);
    assert_eq!(mystery.carbs_100g, None);

    assert_eq!(store.get("9999999999999").unwrap(), None);
    assert_eq!(store.get("").unwrap(), None);
}

#[test]
fn test_unnamed_product_is_stored_not_indexed() {
    let harness = TestHarness::new();
    let (_, store) = harness.build(&sample_dump());

    let unnamed = store.get("5000112548167").unwrap().unwrap();
    assert_eq!(unnamed.name, "");
    assert_eq!(unnamed.kcal_100g, Some(42.0));

    for query in ["", "5000112548167", "milk", "a"] {
        assert!(store
            .search(query, 100)
            .unwrap()
            .iter()
            .all(|p| p.barcode != "5000112548167"));
    }
}

#[test]
fn test_many_small_batches() {
    let harness = TestHarness::new();
    harness.write_dump(&random_products(1_234));
    let manifest = harness.import(&ImportOptions::default().with_batch_size(100));
    assert_eq!(manifest.product_count, 1_234);
    assert_eq!(manifest.indexed_count, 1_234);
    assert!(manifest.skip_reasons.is_empty());

    let store = harness.open();
    let stats = store.stats().unwrap();
    assert_eq!(stats.indexed, 1_234);
    assert!(store.get("0000001000000").unwrap().is_some());
    assert!(store.get("0000001001233").unwrap().is_some());
}

#[test]
fn test_reimport_into_same_directory() {
    let harness = TestHarness::new();
    harness.write_dump(&sample_dump());
    harness.import(&ImportOptions::default());
    let manifest = harness.import(&ImportOptions::default().with_batch_size(2));
    assert_eq!(manifest.product_count, 9);

    let store = harness.open();
    assert_eq!(store.stats().unwrap().indexed, 8);
    assert_eq!(store.search("nutella", 0).unwrap().len(), 1);
}
