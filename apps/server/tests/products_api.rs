mod common;

use common::{app, get_json};

#[tokio::test]
async fn products_default_page() {
    let (status, body) = get_json(app(Vec::new()), "/products").await;

    assert_eq!(status, 200);
    assert_eq!(body["total"], 35);
    assert_eq!(body["products"].as_array().unwrap().len(), 35);
    assert_eq!(body["hasMore"], false);
    assert!(body["products"][0]["productId"].is_string());
}

#[tokio::test]
async fn products_filters_and_paginates() {
    let (status, body) =
        get_json(app(Vec::new()), "/products?category=knives&limit=4&offset=0").await;

    assert_eq!(status, 200);
    assert_eq!(body["total"], 10);
    assert_eq!(body["products"].as_array().unwrap().len(), 4);
    assert_eq!(body["hasMore"], true);

    let (_, last) = get_json(app(Vec::new()), "/products?category=Knives&limit=5&offset=8").await;
    assert_eq!(last["products"].as_array().unwrap().len(), 2);
    assert_eq!(last["hasMore"], false);
}

#[tokio::test]
async fn products_text_query() {
    let (_, body) = get_json(app(Vec::new()), "/products?query=ASIIMOV").await;
    let products = body["products"].as_array().unwrap();
    assert!(!products.is_empty());
    assert!(products
        .iter()
        .all(|p| p["name"].as_str().unwrap().contains("Asiimov")));
}

#[tokio::test]
async fn products_rejects_bad_numbers() {
    let (status, body) = get_json(app(Vec::new()), "/products?limit=ten").await;
    assert_eq!(status, 400);
    assert_eq!(body["schemaVersion"], "1.0");
}
