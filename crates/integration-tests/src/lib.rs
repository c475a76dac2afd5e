//! Integration test support for the StyleHub client.
//!
//! Provides an in-process mock of the StyleHub API: an `axum` router on a
//! loopback listener speaking the same JSON shapes as the real backend
//! (MongoDB-style `_id` fields, camelCase names, 200-with-`message` auth
//! rejections). Tests drive the real [`stylehub_client::ApiClient`] against
//! it, so token injection, response decoding, and failure handling are
//! exercised end to end.
//!
//! # Example
//!
//! ```rust,ignore
//! let api = MockApi::spawn().await;
//! let (client, session) = api.client();
//!
//! let auth = client.login(AccountRole::Customer, &seed::customer_credentials()).await?;
//! session.login(auth.user, auth.token, auth.role)?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
// Handlers must be async for axum even when they never await.
#![allow(clippy::unused_async)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use stylehub_client::api::ApiClient;
use stylehub_client::config::ClientConfig;
use stylehub_client::session::SessionStore;
use stylehub_client::session::storage::{MemoryStorage, SessionStorage};

pub mod seed;

type JsonReply = (StatusCode, Json<Value>);

/// A user account known to the mock API.
#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub seller: bool,
    pub shop_name: Option<String>,
}

impl MockUser {
    /// The profile fields the API returns for this user.
    fn profile(&self) -> Value {
        let mut profile = json!({
            "_id": self.id,
            "name": self.name,
            "email": self.email,
        });
        if let (Some(fields), Some(shop)) = (profile.as_object_mut(), &self.shop_name) {
            fields.insert("shopName".to_owned(), json!(shop));
        }
        profile
    }
}

/// Mutable state behind the mock API.
pub struct MockState {
    users: Mutex<Vec<MockUser>>,
    products: Mutex<Vec<Value>>,
    carts: Mutex<HashMap<String, Vec<Value>>>,
    orders: Mutex<Vec<Value>>,
    /// token -> user id
    tokens: Mutex<HashMap<String, String>>,
    /// (path, Authorization header) per auth-checked request
    auth_headers: Mutex<Vec<(String, Option<String>)>>,
    catalog_hits: AtomicUsize,
    fail_cart_updates: AtomicBool,
    next_id: AtomicUsize,
}

impl MockState {
    fn seeded() -> Self {
        Self {
            users: Mutex::new(seed::users()),
            products: Mutex::new(seed::products()),
            carts: Mutex::new(HashMap::new()),
            orders: Mutex::new(Vec::new()),
            tokens: Mutex::new(HashMap::new()),
            auth_headers: Mutex::new(Vec::new()),
            catalog_hits: AtomicUsize::new(0),
            fail_cart_updates: AtomicBool::new(false),
            next_id: AtomicUsize::new(1),
        }
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{n:04}")
    }

    fn issue_token(&self, user_id: &str) -> String {
        let token = self.fresh_id(&format!("token-{user_id}"));
        lock(&self.tokens).insert(token.clone(), user_id.to_owned());
        token
    }
}

/// An in-process StyleHub API on a loopback listener.
pub struct MockApi {
    base_url: String,
    state: Arc<MockState>,
    server: tokio::task::JoinHandle<()>,
}

impl MockApi {
    /// Bind a loopback listener and serve the mock API on it.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound (test environment failure).
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::seeded());
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind loopback listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock API server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    /// Base URL of the mock API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client configuration pointing at the mock API.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not parse as a URL.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.base_url.parse().expect("Loopback URL is valid"),
            session_file: std::path::PathBuf::from("unused-session.json"),
            catalog_cache_secs: 300,
        }
    }

    /// A fresh API client with an in-memory (anonymous) session.
    #[must_use]
    pub fn client(&self) -> (ApiClient, SessionStore) {
        self.client_with_storage(MemoryStorage::new())
    }

    /// A fresh API client over a caller-provided storage backend.
    ///
    /// Use with a file backend to simulate restarts across clients.
    #[must_use]
    pub fn client_with_storage(
        &self,
        storage: impl SessionStorage + 'static,
    ) -> (ApiClient, SessionStore) {
        let session = SessionStore::open(storage);
        let client = ApiClient::new(&self.config(), session.clone());
        (client, session)
    }

    /// Stop the server, closing the listener.
    ///
    /// Calls made afterwards fail at the transport layer, which is how tests
    /// simulate network failure.
    pub fn shutdown(&self) {
        self.server.abort();
    }

    /// Number of `GET /getProducts` requests the server has answered.
    #[must_use]
    pub fn catalog_hits(&self) -> usize {
        self.state.catalog_hits.load(Ordering::Relaxed)
    }

    /// Make every cart update answer 500 until turned off again.
    pub fn set_fail_cart_updates(&self, fail: bool) {
        self.state.fail_cart_updates.store(fail, Ordering::Relaxed);
    }

    /// The `(path, Authorization header)` pairs recorded by auth-checked
    /// endpoints, in arrival order.
    #[must_use]
    pub fn recorded_auth_headers(&self) -> Vec<(String, Option<String>)> {
        lock(&self.state.auth_headers).clone()
    }

    /// The server-side cart for a user, as raw JSON lines.
    #[must_use]
    pub fn cart_of(&self, user_id: &str) -> Vec<Value> {
        lock(&self.state.carts).get(user_id).cloned().unwrap_or_default()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/CustomerLogin", post(customer_login))
        .route("/SellerLogin", post(seller_login))
        .route("/CustomerRegister", post(customer_register))
        .route("/SellerRegister", post(seller_register))
        .route("/getProducts", get(get_products))
        .route("/getProductDetail/{id}", get(get_product_detail))
        .route("/getCartDetail/{user_id}", get(get_cart))
        .route("/CustomerUpdate/{user_id}", put(update_cart))
        .route("/newOrder", post(new_order))
        .route("/getSellerProducts/{seller_id}", get(get_seller_products))
        .route("/ProductCreate", post(create_product))
        .route("/DeleteProduct/{id}", delete(delete_product))
        .route("/addReview/{id}", put(add_review))
        .with_state(state)
}

/// Record the Authorization header and resolve it to a user id.
///
/// The real API takes the token string verbatim, no `Bearer` prefix.
fn authorize(state: &MockState, path: &str, headers: &HeaderMap) -> Result<String, JsonReply> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);

    lock(&state.auth_headers).push((path.to_owned(), raw.clone()));

    raw.and_then(|token| lock(&state.tokens).get(&token).cloned())
        .ok_or((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Authentication required"})),
        ))
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

// ============================================================================
// Auth endpoints
// ============================================================================

async fn customer_login(state: State<Arc<MockState>>, body: Json<Value>) -> Json<Value> {
    login(&state, &body, false)
}

async fn seller_login(state: State<Arc<MockState>>, body: Json<Value>) -> Json<Value> {
    login(&state, &body, true)
}

/// Matching the real backend, a rejected login is 200 with only a `message`.
fn login(state: &MockState, body: &Value, seller: bool) -> Json<Value> {
    let email = field(body, "email");
    let password = field(body, "password");

    let user = lock(&state.users)
        .iter()
        .find(|u| u.seller == seller && u.email == email && u.password == password)
        .cloned();

    match user {
        Some(user) => {
            let token = state.issue_token(&user.id);
            let mut response = user.profile();
            if let Some(fields) = response.as_object_mut() {
                fields.insert("token".to_owned(), json!(token));
                if !seller {
                    let cart = lock(&state.carts).get(&user.id).cloned().unwrap_or_default();
                    fields.insert("cartDetails".to_owned(), json!(cart));
                }
            }
            Json(response)
        }
        None => Json(json!({"message": "Invalid email or password"})),
    }
}

async fn customer_register(state: State<Arc<MockState>>, body: Json<Value>) -> Json<Value> {
    register(&state, &body, false)
}

async fn seller_register(state: State<Arc<MockState>>, body: Json<Value>) -> Json<Value> {
    register(&state, &body, true)
}

fn register(state: &MockState, body: &Value, seller: bool) -> Json<Value> {
    let email = field(body, "email");

    let mut users = lock(&state.users);
    if users.iter().any(|u| u.email == email) {
        return Json(json!({"message": "Email is already registered"}));
    }

    let user = MockUser {
        id: state.fresh_id(if seller { "s" } else { "u" }),
        name: field(body, "name").to_owned(),
        email: email.to_owned(),
        password: field(body, "password").to_owned(),
        seller,
        shop_name: seller.then(|| field(body, "shopName").to_owned()),
    };
    users.push(user.clone());
    drop(users);

    let token = state.issue_token(&user.id);
    let mut response = user.profile();
    if let Some(fields) = response.as_object_mut() {
        fields.insert("token".to_owned(), json!(token));
    }
    Json(response)
}

// ============================================================================
// Catalog endpoints
// ============================================================================

async fn get_products(state: State<Arc<MockState>>) -> Json<Value> {
    state.catalog_hits.fetch_add(1, Ordering::Relaxed);
    Json(Value::Array(lock(&state.products).clone()))
}

async fn get_product_detail(state: State<Arc<MockState>>, Path(id): Path<String>) -> JsonReply {
    let product = lock(&state.products)
        .iter()
        .find(|p| field(p, "_id") == id)
        .cloned();

    product.map_or(
        (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Product not found"})),
        ),
        |p| (StatusCode::OK, Json(p)),
    )
}

async fn add_review(
    state: State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Json<Value>,
) -> JsonReply {
    if let Err(reply) = authorize(&state, "/addReview", &headers) {
        return reply;
    }

    let mut products = lock(&state.products);
    let Some(product) = products.iter_mut().find(|p| field(p, "_id") == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Product not found"})),
        );
    };

    if let Some(reviews) = product
        .get_mut("reviews")
        .and_then(Value::as_array_mut)
    {
        reviews.push(body.0);
    }
    (StatusCode::OK, Json(product.clone()))
}

// ============================================================================
// Cart and order endpoints
// ============================================================================

async fn get_cart(
    state: State<Arc<MockState>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> JsonReply {
    if let Err(reply) = authorize(&state, "/getCartDetail", &headers) {
        return reply;
    }

    let cart = lock(&state.carts).get(&user_id).cloned().unwrap_or_default();
    (StatusCode::OK, Json(Value::Array(cart)))
}

async fn update_cart(
    state: State<Arc<MockState>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    body: Json<Value>,
) -> JsonReply {
    if let Err(reply) = authorize(&state, "/CustomerUpdate", &headers) {
        return reply;
    }

    if state.fail_cart_updates.load(Ordering::Relaxed) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Cart update failed"})),
        );
    }

    let lines = body
        .get("cartDetails")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    lock(&state.carts).insert(user_id, lines.clone());
    (StatusCode::OK, Json(Value::Array(lines)))
}

async fn new_order(
    state: State<Arc<MockState>>,
    headers: HeaderMap,
    body: Json<Value>,
) -> JsonReply {
    if let Err(reply) = authorize(&state, "/newOrder", &headers) {
        return reply;
    }

    let buyer = field(&body, "buyer").to_owned();
    let shipping = body.get("shippingData").cloned().unwrap_or(Value::Null);

    let required = ["fullName", "phoneNumber", "pincode", "address"];
    if required.iter().any(|key| field(&shipping, key).is_empty()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Shipping details are incomplete"})),
        );
    }

    // The order captures the server-side cart, which is then emptied.
    let lines = lock(&state.carts).remove(&buyer).unwrap_or_default();
    let order = json!({
        "_id": state.fresh_id("o"),
        "buyer": buyer,
        "shippingData": shipping,
        "orderedProducts": lines,
        "createdAt": "2026-01-15T10:30:00Z",
    });
    lock(&state.orders).push(order.clone());
    (StatusCode::OK, Json(order))
}

// ============================================================================
// Seller endpoints
// ============================================================================

async fn get_seller_products(
    state: State<Arc<MockState>>,
    Path(seller_id): Path<String>,
    headers: HeaderMap,
) -> JsonReply {
    if let Err(reply) = authorize(&state, "/getSellerProducts", &headers) {
        return reply;
    }

    let products: Vec<Value> = lock(&state.products)
        .iter()
        .filter(|p| seller_id_of(p) == seller_id)
        .cloned()
        .collect();
    (StatusCode::OK, Json(Value::Array(products)))
}

async fn create_product(
    state: State<Arc<MockState>>,
    headers: HeaderMap,
    body: Json<Value>,
) -> JsonReply {
    if let Err(reply) = authorize(&state, "/ProductCreate", &headers) {
        return reply;
    }

    let mut product = body.0;
    if let Some(fields) = product.as_object_mut() {
        fields.insert("_id".to_owned(), json!(state.fresh_id("p")));
        fields.entry("reviews").or_insert_with(|| json!([]));
    }
    lock(&state.products).push(product.clone());
    (StatusCode::OK, Json(product))
}

async fn delete_product(
    state: State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> JsonReply {
    if let Err(reply) = authorize(&state, "/DeleteProduct", &headers) {
        return reply;
    }

    let mut products = lock(&state.products);
    let before = products.len();
    products.retain(|p| field(p, "_id") != id);

    if products.len() == before {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Product not found"})),
        )
    } else {
        (StatusCode::OK, Json(json!({"message": "Product deleted"})))
    }
}

/// Seller references appear either as bare ids or populated objects.
fn seller_id_of(product: &Value) -> &str {
    match product.get("seller") {
        Some(Value::String(id)) => id,
        Some(obj) => field(obj, "_id"),
        None => "",
    }
}
