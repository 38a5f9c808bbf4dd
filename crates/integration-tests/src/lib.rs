//! Integration test support for Daisy.
//!
//! Spawns a mock of the external REST backend on an ephemeral local port
//! and records everything the client sends it: listing query parameters,
//! delete calls, bulk-status bodies, multipart uploads, and the
//! authorization headers on profile fetches. Tests drive the real stores
//! and controllers against it and assert on both sides.
//!
//! The mock deliberately responds slowly to product listings filtered by
//! `category=slow`, so tests can arrange a superseded fetch whose response
//! arrives after a newer one.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde_json::{Value, json};

use daisy_client::ClientConfig;
use daisy_core::{Category, Product, ProductId};

/// Token issued by the mock for customer logins.
pub const CUSTOMER_TOKEN: &str = "daisy-test-token";
/// Token issued by the mock for admin logins.
pub const ADMIN_TOKEN: &str = "admin-test-token";
/// The one password the mock accepts.
pub const PASSWORD: &str = "correct-horse";

/// One recorded multipart upload.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    pub method: String,
    pub path: String,
    /// The request's Content-Type header, boundary included.
    pub content_type: String,
    /// The parsed `productData` JSON part.
    pub product_data: Value,
    /// `(file_name, byte_count)` per `images` part, in order.
    pub image_parts: Vec<(String, usize)>,
}

/// Everything the mock backend has observed.
#[derive(Debug, Default)]
pub struct Recorded {
    pub list_requests: Vec<HashMap<String, String>>,
    pub export_requests: Vec<HashMap<String, String>>,
    pub stats_requests: usize,
    pub deleted_ids: Vec<String>,
    pub bulk_status_bodies: Vec<Value>,
    pub uploads: Vec<MultipartUpload>,
    pub profile_auth_headers: Vec<Option<String>>,
}

#[derive(Clone, Default)]
struct BackendState {
    recorded: Arc<Mutex<Recorded>>,
}

/// A running mock backend.
pub struct MockBackend {
    pub base_url: String,
    state: BackendState,
}

/// Install a process-wide test tracing subscriber, once.
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

impl MockBackend {
    /// Spawn the mock on an ephemeral port.
    pub async fn spawn() -> Self {
        init_tracing();

        let state = BackendState::default();
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Missing local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend died");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// A client configuration pointing at this mock.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.base_url.clone(),
            storage_path: std::path::PathBuf::from("unused-in-tests.json"),
        }
    }

    /// Everything observed so far.
    pub fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.state.recorded.lock().expect("Recorder poisoned")
    }
}

/// The storefront catalog the mock serves from `GET /products`: four
/// pieces priced 100 through 400.
#[must_use]
pub fn storefront_products() -> Vec<Product> {
    let categories = [
        Category::Earrings,
        Category::Bracelets,
        Category::Necklaces,
        Category::Rings,
    ];
    (1..=4)
        .map(|i| Product {
            id: ProductId::new(i),
            name: format!("Piece {i}"),
            price: Decimal::from(i * 100),
            original_price: None,
            images: vec![format!("products/piece-{i}.jpg")],
            category: categories[usize::try_from(i).unwrap() - 1],
            collection: "Garden Dreams".to_owned(),
            description: String::new(),
            details: vec![],
            materials: vec![],
            care_instructions: vec![],
            is_new: i % 2 == 1,
            is_bestseller: i == 2,
            rating: 4.0 + f64::from(i) / 10.0,
            reviews: 10,
            in_stock: true,
            colors: None,
            sizes: None,
        })
        .collect()
}

/// An admin product document as the mock serves it.
#[must_use]
pub fn admin_product_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": "Mock product",
        "price": "149.99",
        "category": "necklace",
        "images": ["uploads/mock.jpg"],
        "stock": 15,
        "availability": "in_stock",
        "isActive": true,
        "featured": false,
        "quantity": 15,
        "sku": "NEC-123456-AB12",
        "createdAt": "2026-07-01T10:00:00Z",
        "updatedAt": "2026-07-02T10:00:00Z",
        "pricing": {
            "originalPrice": "199.99",
            "discountPercentage": 25,
            "currency": "USD"
        }
    })
}

fn router(state: BackendState) -> Router {
    Router::new()
        .route("/users/login", post(customer_login))
        .route("/users/register", post(customer_register))
        .route("/users/profile", get(customer_profile))
        .route("/admin/login", post(admin_login))
        .route("/admin/profile", get(admin_profile))
        .route("/admin/products", get(list_products).post(create_product))
        .route(
            "/admin/products/export",
            get(export_products),
        )
        .route(
            "/admin/products/bulk-status",
            patch(bulk_status),
        )
        .route(
            "/admin/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/admin/stats", get(stats))
        .route("/products", get(products))
        .with_state(state)
}

// =============================================================================
// Auth handlers
// =============================================================================

#[derive(serde::Deserialize)]
struct Credentials {
    email: String,
    password: String,
    #[serde(default)]
    name: Option<String>,
}

async fn customer_login(Json(body): Json<Credentials>) -> (StatusCode, Json<Value>) {
    if body.password != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "message": "Login successful",
            "token": CUSTOMER_TOKEN,
            "user": {"id": "u-1", "email": body.email, "name": "Rose"}
        })),
    )
}

async fn customer_register(Json(body): Json<Credentials>) -> (StatusCode, Json<Value>) {
    if body.email.ends_with("@taken.example") {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "Email already registered"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "message": "Account created",
            "token": CUSTOMER_TOKEN,
            "user": {
                "id": "u-2",
                "email": body.email,
                "name": body.name.unwrap_or_default()
            }
        })),
    )
}

async fn customer_profile(
    State(state): State<BackendState>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let auth = auth_header(&headers);
    state
        .recorded
        .lock()
        .unwrap()
        .profile_auth_headers
        .push(auth.clone());

    let expected = format!("Bearer {CUSTOMER_TOKEN}");
    if auth.as_deref() != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"id": "u-1", "email": "rose@daisyatelier.com", "name": "Rose Refreshed"})),
    )
}

async fn admin_login(Json(body): Json<Credentials>) -> (StatusCode, Json<Value>) {
    if body.password != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Admin login failed"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "message": "Login successful",
            "token": ADMIN_TOKEN,
            "user": {
                "id": "a-1",
                "email": body.email,
                "name": "Ops",
                "role": "super_admin"
            }
        })),
    )
}

async fn admin_profile(
    State(state): State<BackendState>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let auth = auth_header(&headers);
    state
        .recorded
        .lock()
        .unwrap()
        .profile_auth_headers
        .push(auth.clone());

    let expected = format!("Bearer {ADMIN_TOKEN}");
    if auth.as_deref() != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "_id": "a-1",
            "email": "ops@daisyatelier.com",
            "name": "Ops Refreshed",
            "role": "super_admin"
        })),
    )
}

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

// =============================================================================
// Admin product handlers
// =============================================================================

async fn list_products(
    State(state): State<BackendState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let label = params
        .get("category")
        .or_else(|| params.get("search"))
        .cloned()
        .unwrap_or_else(|| "all".to_owned());
    let lag = params.get("category").map(String::as_str) == Some("slow");

    state
        .recorded
        .lock()
        .unwrap()
        .list_requests
        .push(params);

    // Listings filtered to the "slow" category lag long enough for a newer
    // fetch to overtake them. Recorded before lagging, so tests can wait
    // until the slow request is observably in flight.
    if lag {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    Json(json!({
        "products": [admin_product_json(&format!("p-{label}"), &format!("Product {label}"))],
        "totalPages": 3,
        "total": 42
    }))
}

async fn get_product(Path(id): Path<String>) -> Json<Value> {
    let mut product = admin_product_json(&id, "Editable Product");
    if let Some(object) = product.as_object_mut() {
        object.insert(
            "images".to_owned(),
            json!(["uploads/a.jpg", "uploads/b.jpg"]),
        );
        object.insert("tags".to_owned(), json!(["gold", "necklace"]));
        object.insert(
            "features".to_owned(),
            json!({
                "returnPolicy": "30 days return policy",
                "shipping": "Free shipping on orders over $100",
                "material": "18K gold plated brass",
                "careInstructions": "Keep dry"
            }),
        );
        object.insert(
            "specifications".to_owned(),
            json!({
                "dimensions": {"length": "45cm", "width": "2cm", "height": "0.5cm", "weight": "25g"},
                "materials": ["Gold plated brass"],
                "origin": "India",
                "warranty": "1 year"
            }),
        );
    }
    Json(json!({"product": product}))
}

async fn delete_product(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Json<Value> {
    state.recorded.lock().unwrap().deleted_ids.push(id);
    Json(json!({"message": "Product deleted"}))
}

async fn bulk_status(
    State(state): State<BackendState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state
        .recorded
        .lock()
        .unwrap()
        .bulk_status_bodies
        .push(body);
    Json(json!({"message": "Status updated"}))
}

async fn stats(State(state): State<BackendState>) -> Json<Value> {
    state.recorded.lock().unwrap().stats_requests += 1;
    Json(json!({
        "stats": {
            "totalProducts": 42,
            "activeProducts": 40,
            "lowStockProducts": 3,
            "outOfStockProducts": 1,
            "categoryStats": [{"_id": "necklace", "count": 12}],
            "availabilityStats": [{"_id": "in_stock", "count": 39}]
        }
    }))
}

async fn export_products(
    State(state): State<BackendState>,
    Query(params): Query<HashMap<String, String>>,
) -> String {
    state
        .recorded
        .lock()
        .unwrap()
        .export_requests
        .push(params);
    "sku,name,price\nNEC-123456-AB12,Elegant Gold Plated Necklace,149.99\n".to_owned()
}

async fn record_upload(
    state: &BackendState,
    method: &str,
    path: String,
    headers: &HeaderMap,
    mut multipart: Multipart,
) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let mut product_data = Value::Null;
    let mut image_parts = Vec::new();

    while let Some(field) = multipart.next_field().await.expect("Bad multipart field") {
        let name = field.name().map(ToOwned::to_owned);
        let file_name = field.file_name().unwrap_or_default().to_owned();
        match name.as_deref() {
            Some("productData") => {
                let text = field.text().await.expect("Unreadable productData");
                product_data = serde_json::from_str(&text).expect("productData is not JSON");
            }
            Some("images") => {
                let bytes = field.bytes().await.expect("Unreadable image part");
                image_parts.push((file_name, bytes.len()));
            }
            _ => {}
        }
    }

    state.recorded.lock().unwrap().uploads.push(MultipartUpload {
        method: method.to_owned(),
        path,
        content_type,
        product_data,
        image_parts,
    });

    Json(json!({"message": "ok"}))
}

async fn create_product(
    State(state): State<BackendState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Json<Value> {
    record_upload(&state, "POST", "/admin/products".to_owned(), &headers, multipart).await
}

async fn update_product(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Json<Value> {
    record_upload(
        &state,
        "PUT",
        format!("/admin/products/{id}"),
        &headers,
        multipart,
    )
    .await
}

// =============================================================================
// Storefront handlers
// =============================================================================

async fn products() -> Json<Vec<Product>> {
    Json(storefront_products())
}
