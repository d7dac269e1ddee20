//! Catalog endpoint tests: listing, search and filtering.

use serde_json::{Value, json};

use ub_jewellers_core::CollectionName;
use ub_jewellers_integration_tests::{TestContext, TestServer, product_names};

fn catalog() -> Vec<Value> {
    vec![
        json!({ "name": "Gold Ring", "category": "Rings", "price": 120, "size": "M", "carate": 18, "img": "gold.png" }),
        json!({ "name": "Silver Chain", "category": "Chains", "price": 45, "size": "L", "carate": 14 }),
        json!({ "name": "Diamond Ring", "category": "Rings", "price": 900, "size": "S", "carate": 22 }),
        json!({ "name": "Ruby Earrings", "category": "Earrings", "price": 300, "size": "m", "carate": 18 }),
        json!({ "name": "Plain Band", "category": "Rings", "price": 60, "size": "M" }),
    ]
}

async fn server() -> TestContext {
    TestServer::new()
        .with_documents(CollectionName::Products, catalog())
        .spawn()
        .await
}

#[tokio::test]
async fn test_products_lists_everything_in_store_order() {
    let ctx = server().await;
    let (status, body) = ctx.get_json("/products").await;

    assert_eq!(status, 200);
    assert_eq!(
        product_names(&body),
        ["Gold Ring", "Silver Chain", "Diamond Ring", "Ruby Earrings", "Plain Band"]
    );
    // Extra fields pass through untouched
    assert_eq!(body[0]["img"], "gold.png");
    assert!(body[0]["_id"].is_string());
}

#[tokio::test]
async fn test_empty_search_text_yields_no_products() {
    let ctx = server().await;
    let (status, body) = ctx.get_json("/products?searchText=").await;

    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_search_matches_name_or_category_case_insensitively() {
    let ctx = server().await;

    let (_, by_category) = ctx.get_json("/products?searchText=RINGS").await;
    assert_eq!(
        product_names(&by_category),
        ["Gold Ring", "Diamond Ring", "Ruby Earrings", "Plain Band"]
    );

    let (_, by_name) = ctx.get_json("/products?searchText=chain").await;
    assert_eq!(product_names(&by_name), ["Silver Chain"]);
}

#[tokio::test]
async fn test_filter_without_parameters_returns_whole_catalog() {
    let ctx = server().await;
    let (_, body) = ctx.get_json("/products/filter").await;

    assert_eq!(body.as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_filter_price_range_is_inclusive() {
    let ctx = server().await;
    let (_, body) = ctx
        .get_json("/products/filter?minPrice=60&maxPrice=300")
        .await;

    assert_eq!(
        product_names(&body),
        ["Gold Ring", "Ruby Earrings", "Plain Band"]
    );
}

#[tokio::test]
async fn test_filter_inverted_price_range_is_empty() {
    let ctx = server().await;
    let (status, body) = ctx.get_json("/products/filter?minPrice=10&maxPrice=5").await;

    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_filter_sorts_by_price() {
    let ctx = server().await;

    let (_, asc) = ctx.get_json("/products/filter?priceOrder=asc").await;
    let prices: Vec<f64> = asc
        .as_array()
        .unwrap_or(&Vec::new())
        .iter()
        .filter_map(|p| p["price"].as_f64())
        .collect();
    assert_eq!(prices, [45.0, 60.0, 120.0, 300.0, 900.0]);

    let (_, desc) = ctx.get_json("/products/filter?priceOrder=DESC").await;
    assert_eq!(product_names(&desc)[0], "Diamond Ring");
}

#[tokio::test]
async fn test_filter_category_size_and_carate_combine() {
    let ctx = server().await;
    let (_, body) = ctx
        .get_json("/products/filter?category=ring&size=m&carate=18")
        .await;

    // "ring" is a substring of "Earrings" too; size compares case-insensitively
    assert_eq!(product_names(&body), ["Gold Ring", "Ruby Earrings"]);
}

#[tokio::test]
async fn test_filter_category_all_is_a_wildcard() {
    let ctx = server().await;
    let (_, body) = ctx.get_json("/products/filter?category=all").await;

    assert_eq!(body.as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_filter_search_stage_runs_after_other_stages() {
    let ctx = server().await;
    let (_, body) = ctx
        .get_json("/products/filter?category=rings&search=diamond&priceOrder=asc")
        .await;

    assert_eq!(product_names(&body), ["Diamond Ring"]);
}

#[tokio::test]
async fn test_filter_strict_mode_rejects_malformed_numbers() {
    let ctx = TestServer::new()
        .with_documents(CollectionName::Products, catalog())
        .with_env("LENIENT_QUERY_PARSING", "false")
        .spawn()
        .await;

    let (status, body) = ctx.get_json("/products/filter?maxPrice=cheap").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], true);
    assert!(body["message"].as_str().is_some_and(|m| m.contains("maxPrice")));
}

#[tokio::test]
async fn test_reference_collections_are_served_verbatim() {
    let ctx = TestServer::new()
        .with_documents(
            CollectionName::NavNotifications,
            vec![json!({ "text": "Free shipping over $500" })],
        )
        .with_documents(
            CollectionName::Reviews,
            vec![json!({ "author": "Asha", "rating": 5, "body": "Lovely" })],
        )
        .spawn()
        .await;

    let (_, notices) = ctx.get_json("/nav-notifications").await;
    assert_eq!(notices[0]["text"], "Free shipping over $500");

    let (_, reviews) = ctx.get_json("/reviews").await;
    assert_eq!(reviews[0]["rating"], 5);

    let (status, categories) = ctx.get_json("/categories").await;
    assert_eq!(status, 200);
    assert_eq!(categories, json!([]));
}
