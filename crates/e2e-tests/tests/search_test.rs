//! Name search E2E tests against an imported data directory.

use pretty_assertions::assert_eq;
use serde_json::json;

use e2e_tests::{product_line, random_products, sample_dump, TestHarness};
use food_store::ProductStore;

fn names(store: &ProductStore, query: &str, limit: usize) -> Vec<String> {
    store
        .search(query, limit)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect()
}

#[test]
fn test_phrase_outranks_scattered_tokens() {
    let harness = TestHarness::new();
    let (_, store) = harness.build(&[
        product_line("100", "Milk with Oat Flakes", json!({})),
        product_line("200", "Oat Milk", json!({})),
        product_line("300", "Oat Cookies", json!({})),
    ]);

    let results = names(&store, "oat milk", 0);
    assert_eq!(results.first().map(String::as_str), Some("Oat Milk"));
    assert!(results.contains(&"Milk with Oat Flakes".to_string()));
    assert!(!results.contains(&"Oat Cookies".to_string()));
}

#[test]
fn test_query_folding_matches_stored_names() {
    let harness = TestHarness::new();
    let (_, store) = harness.build(&sample_dump());

    assert_eq!(names(&store, "creme brulee", 0), vec!["Crème Brûlée"]);
    assert_eq!(names(&store, "CRÈME", 0), vec!["Crème Brûlée"]);
    assert_eq!(names(&store, "weissbier", 0), vec!["Weißbier"]);
    assert_eq!(names(&store, "  NUTELLA!! ", 0), vec!["Nutella"]);
}

#[test]
fn test_long_unspaced_names_are_found() {
    let harness = TestHarness::new();
    let (_, store) = harness.build(&[
        product_line("4901234567894", "北海道産牛乳使用濃厚ミルクプリン", json!({})),
        product_line("4000000000001", "Donaudampfschifffahrtsgesellschaftskapitän-Suppe", json!({})),
        product_line("4000000000002", "H2O² Water ½ Litre", json!({})),
    ]);

    assert_eq!(
        names(&store, "北海道産牛乳使用濃厚ミルクプリン", 0),
        vec!["北海道産牛乳使用濃厚ミルクプリン"]
    );
    assert_eq!(
        names(&store, "donaudampfschifffahrtsgesellschaftskapitan", 0),
        vec!["Donaudampfschifffahrtsgesellschaftskapitän-Suppe"]
    );
    assert_eq!(names(&store, "h2o water litre", 0), vec!["H2O² Water ½ Litre"]);
}

#[test]
fn test_prefix_and_typo_queries() {
    let harness = TestHarness::new();
    let (_, store) = harness.build(&sample_dump());

    assert_eq!(names(&store, "chocolate ch", 0), vec!["Chocolate Chip Cookies"]);
    assert_eq!(names(&store, "nutela", 0), vec!["Nutella"]);
    assert_eq!(names(&store, "sparkling watr", 0), vec!["Sparkling Water"]);
}

#[test]
fn test_hits_are_fully_hydrated() {
    let harness = TestHarness::new();
    let (_, store) = harness.build(&sample_dump());

    let hits = store.search("nutella", 0).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0], store.get("3017620422003").unwrap().unwrap());
}

#[test]
fn test_queries_without_tokens_return_nothing() {
    let harness = TestHarness::new();
    let (_, store) = harness.build(&sample_dump());

    for query in ["", "   ", "!!!", "-/-"] {
        assert!(store.search(query, 0).unwrap().is_empty(), "query {query:?}");
    }
    assert!(store.search("zzzzqqqq", 0).unwrap().is_empty());
}

#[test]
fn test_limit_default_and_cap() {
    let harness = TestHarness::new();
    let (_, store) = harness.build(&random_products(150));

    assert_eq!(store.search("granola", 0).unwrap().len(), 20);
    assert_eq!(store.search("granola", 7).unwrap().len(), 7);
    assert_eq!(store.search("granola", 1_000).unwrap().len(), 100);
}
