//! Integration tests for product listing, images and deletion.
//!
//! Run with: `cargo test -p teefinder-integration-tests --test products`

#![allow(clippy::unwrap_used)]

use teefinder_client::ClientError;
use teefinder_core::{CategoryId, CategoryType, PlatformDraft, Price, ProductDraft};
use teefinder_integration_tests::{TestServer, amazon_flipkart_draft, jpeg};

async fn server_with_shirts() -> (TestServer, CategoryId) {
    let server = TestServer::spawn().await;
    let shirts = server.category("Shirts", CategoryType::Mens).await;
    (server, shirts)
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_empty_category_lists_no_products() {
    let (server, shirts) = server_with_shirts().await;

    let products = server.client.list_products(shirts).await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_unknown_category_is_reported_by_id() {
    let server = TestServer::spawn().await;

    let err = server
        .client
        .list_products(CategoryId::new(99))
        .await
        .unwrap_err();
    match err {
        ClientError::Application { message } => assert_eq!(message, "Category 99 not found."),
        other => panic!("expected application error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_listings_round_trip_in_submission_order() {
    let (server, shirts) = server_with_shirts().await;

    let product_id = server
        .client
        .create_product(amazon_flipkart_draft(shirts))
        .await
        .unwrap();

    let products = server.client.list_products(shirts).await.unwrap();
    assert_eq!(products.len(), 1);
    let product = &products[0];
    assert_eq!(product.product_id, product_id);
    assert_eq!(product.category_id, shirts);
    assert_eq!(product.name, "Stylish T-Shirt");
    assert_eq!(product.rate.to_string(), "499");
    assert!(product.image.is_some());

    let names: Vec<_> = product.platforms.iter().map(|p| p.platform_name.as_str()).collect();
    assert_eq!(names, vec!["Amazon", "Flipkart"]);
    assert_eq!(product.platforms[0].price.to_string(), "299");
    assert_eq!(product.platforms[0].product_link, "https://a.example");
    assert_eq!(product.platforms[1].price, Price::OutOfStock);
    assert_eq!(product.platforms[1].product_link, "https://f.example");
}

#[tokio::test]
async fn test_prices_keep_their_literal_wire_form() {
    let (server, shirts) = server_with_shirts().await;
    server
        .client
        .create_product(amazon_flipkart_draft(shirts))
        .await
        .unwrap();

    let body: serde_json::Value = server
        .http
        .get(server.url(&format!("/products?category_id={shirts}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "success");
    let platforms = &body["data"][0]["platforms"];
    assert_eq!(platforms[0]["price"], "299");
    assert_eq!(platforms[1]["price"], "OUT_OF_STOCK");
}

#[tokio::test]
async fn test_repeated_product_reads_are_identical() {
    let (server, shirts) = server_with_shirts().await;
    server
        .client
        .create_product(amazon_flipkart_draft(shirts))
        .await
        .unwrap();

    let first = server.client.list_products(shirts).await.unwrap();
    let second = server.client.list_products(shirts).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_products_stay_in_their_category() {
    let (server, shirts) = server_with_shirts().await;
    let tops = server.category("Tops", CategoryType::Womens).await;
    server
        .client
        .create_product(amazon_flipkart_draft(tops))
        .await
        .unwrap();

    assert!(server.client.list_products(shirts).await.unwrap().is_empty());
    assert_eq!(server.client.list_products(tops).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_filters_by_name_ignoring_case() {
    let (server, shirts) = server_with_shirts().await;
    server
        .client
        .create_product(amazon_flipkart_draft(shirts))
        .await
        .unwrap();
    let plain = ProductDraft::new(shirts, "Plain Polo", "350")
        .with_image(jpeg("polo.jpg"))
        .with_platform(PlatformDraft::new("Myntra", "https://m.example", "320"));
    server.client.create_product(plain).await.unwrap();

    let found = server.client.search_products(shirts, "t-SHIRT").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Stylish T-Shirt");

    let found = server.client.search_products(shirts, "%").await.unwrap();
    assert!(found.is_empty());
}

// =============================================================================
// Images
// =============================================================================

#[tokio::test]
async fn test_product_image_is_served_with_its_content_type() {
    let (server, shirts) = server_with_shirts().await;
    server
        .client
        .create_product(amazon_flipkart_draft(shirts))
        .await
        .unwrap();

    let products = server.client.list_products(shirts).await.unwrap();
    let uri = products[0].image.clone().unwrap();
    let url = server.client.resolve(&uri).unwrap();

    let response = server.http.get(url).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "image/jpeg");
    let bytes = response.bytes().await.unwrap();
    assert_eq!(bytes.as_ref(), jpeg("tee.jpg").bytes.as_slice());
}

#[tokio::test]
async fn test_unknown_image_is_a_plain_404() {
    let server = TestServer::spawn().await;

    let response = server.http.get(server.url("/images/424242")).send().await.unwrap();
    assert_eq!(response.status(), 404);

    let response = server.http.get(server.url("/images/abc")).send().await.unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_card_marks_primary_and_lowest_listing() {
    let (server, shirts) = server_with_shirts().await;
    server
        .client
        .create_product(amazon_flipkart_draft(shirts))
        .await
        .unwrap();

    let products = server.client.list_products(shirts).await.unwrap();
    let card = server.client.card(&products[0]);
    assert_eq!(card.listings.len(), 2);
    assert_eq!(card.listings[0].image, None);
    assert_eq!(
        card.listings[0].deep_link.as_ref().map(url::Url::as_str),
        Some("https://a.example/")
    );
    assert!(card.listings[0].is_primary);
    assert!(card.listings[0].is_lowest);
    assert_eq!(card.listings[1].price_label, "Out of stock");
    assert!(card.image.starts_with(&server.base_url));
    assert_ne!(card.image, teefinder_client::PLACEHOLDER_IMAGE);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_removes_product_listings_and_images() {
    let (server, shirts) = server_with_shirts().await;
    let draft = amazon_flipkart_draft(shirts);
    let product_id = server.client.create_product(draft).await.unwrap();
    let image = server.client.list_products(shirts).await.unwrap()[0]
        .image
        .clone()
        .unwrap();

    server.client.delete_product(product_id).await.unwrap();

    assert!(server.client.list_products(shirts).await.unwrap().is_empty());
    let response = server
        .http
        .get(server.client.resolve(&image).unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let err = server.client.delete_product(product_id).await.unwrap_err();
    assert_eq!(err.to_string(), format!("Product {product_id} not found."));
}
