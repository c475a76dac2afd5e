//! Seller dashboard operations against the mock API.

#![allow(clippy::unwrap_used)]

use stylehub_core::{AccountRole, Price, ProductId, UserId};

use stylehub_client::ApiError;
use stylehub_client::api::ApiClient;
use stylehub_client::api::types::NewProduct;
use stylehub_client::session::SessionStore;
use stylehub_integration_tests::{MockApi, seed};

async fn signed_in_seller(client: &ApiClient, session: &SessionStore) -> UserId {
    let auth = client
        .login(AccountRole::Seller, &seed::seller_credentials())
        .await
        .expect("Login should succeed");
    let user_id = auth.user.id.clone();
    session
        .login(auth.user, auth.token, auth.role)
        .expect("Session login should succeed");
    user_id
}

fn new_scarf() -> NewProduct {
    NewProduct {
        product_name: "Silk Scarf".to_owned(),
        product_image: "https://img.stylehub.example/scarf.jpg".to_owned(),
        category: "Women".to_owned(),
        subcategory: "Accessories".to_owned(),
        description: "Hand-rolled edges".to_owned(),
        quantity: 20,
        price: Price::new("1299".parse().unwrap(), "999".parse().unwrap()),
    }
}

#[tokio::test]
async fn test_seller_products_lists_own_listings() {
    let api = MockApi::spawn().await;
    let (client, session) = api.client();
    let seller_id = signed_in_seller(&client, &session).await;

    let products = client
        .seller_products(&seller_id)
        .await
        .expect("Listing fetch should succeed");

    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p.seller.id() == &seller_id));
}

#[tokio::test]
async fn test_seller_listing_requires_authentication() {
    let api = MockApi::spawn().await;
    let (client, _session) = api.client();

    let err = client
        .seller_products(&UserId::new(seed::SELLER_ID))
        .await
        .expect_err("Anonymous dashboard fetch should be rejected");
    assert!(matches!(err, ApiError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_create_product_appears_in_catalog() {
    let api = MockApi::spawn().await;
    let (client, session) = api.client();
    let seller_id = signed_in_seller(&client, &session).await;

    // Warm the catalog cache before the write.
    assert_eq!(client.products().await.unwrap().len(), 2);

    let created = client
        .create_product(&seller_id, &new_scarf())
        .await
        .expect("Create should succeed");
    assert_eq!(created.product_name, "Silk Scarf");
    assert_eq!(created.seller.id(), &seller_id);

    // The write invalidates the cached catalog, so the new listing shows up.
    let products = client.products().await.expect("Catalog fetch should succeed");
    assert_eq!(products.len(), 3);
    assert_eq!(api.catalog_hits(), 2);
}

#[tokio::test]
async fn test_delete_product_removes_listing() {
    let api = MockApi::spawn().await;
    let (client, session) = api.client();
    let seller_id = signed_in_seller(&client, &session).await;

    client
        .delete_product(&ProductId::new(seed::KURTA_ID))
        .await
        .expect("Delete should succeed");

    let products = client
        .seller_products(&seller_id)
        .await
        .expect("Listing fetch should succeed");
    assert_eq!(products.len(), 1);
    assert_eq!(products.first().unwrap().id, ProductId::new(seed::SHIRT_ID));
}

#[tokio::test]
async fn test_delete_unknown_product_fails() {
    let api = MockApi::spawn().await;
    let (client, session) = api.client();
    signed_in_seller(&client, &session).await;

    let err = client
        .delete_product(&ProductId::new("p-nope"))
        .await
        .expect_err("Unknown product should fail");
    assert!(matches!(err, ApiError::Api { status: 404, .. }));
}
