//! Catalog reads, the in-process cache, and review submission.

#![allow(clippy::unwrap_used)]

use stylehub_core::{AccountRole, ProductId, UserId};

use stylehub_client::ApiError;
use stylehub_client::api::types::ReviewInput;
use stylehub_integration_tests::{MockApi, seed};

#[tokio::test]
async fn test_products_decodes_seeded_catalog() {
    let api = MockApi::spawn().await;
    let (client, _session) = api.client();

    let products = client.products().await.expect("Catalog fetch should succeed");

    assert_eq!(products.len(), 2);
    let shirt = products
        .iter()
        .find(|p| p.id == ProductId::new(seed::SHIRT_ID))
        .expect("Seeded shirt should be listed");
    assert_eq!(shirt.product_name, "Linen Shirt");
    assert_eq!(shirt.seller.display_name(), Some(seed::SELLER_SHOP));
    assert!(shirt.price.is_discounted());
}

#[tokio::test]
async fn test_catalog_reads_are_cached() {
    let api = MockApi::spawn().await;
    let (client, _session) = api.client();

    client.products().await.expect("First fetch should succeed");
    client.products().await.expect("Second fetch should succeed");

    assert_eq!(api.catalog_hits(), 1, "Second read must come from cache");
}

#[tokio::test]
async fn test_product_detail_missing_product_fails() {
    let api = MockApi::spawn().await;
    let (client, _session) = api.client();

    let err = client
        .product_detail(&ProductId::new("p-nope"))
        .await
        .expect_err("Unknown product should fail");
    assert!(matches!(err, ApiError::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_review_requires_authentication() {
    let api = MockApi::spawn().await;
    let (client, _session) = api.client();

    let err = client
        .submit_review(
            &ProductId::new(seed::SHIRT_ID),
            &ReviewInput {
                rating: 5,
                comment: "Great".to_owned(),
                reviewer: UserId::new(seed::CUSTOMER_ID),
            },
        )
        .await
        .expect_err("Anonymous review should be rejected");
    assert!(matches!(err, ApiError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_review_appears_on_detail_view() {
    let api = MockApi::spawn().await;
    let (client, session) = api.client();

    let auth = client
        .login(AccountRole::Customer, &seed::customer_credentials())
        .await
        .expect("Login should succeed");
    let reviewer = auth.user.id.clone();
    session
        .login(auth.user, auth.token, auth.role)
        .expect("Session login should succeed");

    let product_id = ProductId::new(seed::SHIRT_ID);
    let updated = client
        .submit_review(
            &product_id,
            &ReviewInput {
                rating: 4,
                comment: "Fits well".to_owned(),
                reviewer,
            },
        )
        .await
        .expect("Review should succeed");
    assert_eq!(updated.reviews.len(), 1);

    // The detail view serves the refreshed cache entry, not the stale one.
    let detail = client
        .product_detail(&product_id)
        .await
        .expect("Detail fetch should succeed");
    assert_eq!(detail.reviews.len(), 1);
    assert_eq!(detail.reviews.first().unwrap().comment, "Fits well");
}
