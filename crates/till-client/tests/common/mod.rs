//! Mock sale-recording backend and test doubles shared by the integration
//! tests.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use till_client::Presenter;
use till_core::{ConfirmationPrompt, Notice};

// =============================================================================
// Mock Backend
// =============================================================================

pub struct MockBackend {
    products: Mutex<Vec<Value>>,
    checkout_status: StatusCode,
    checkout_body: String,
    checkout_delay: Duration,
    received: Mutex<Vec<Value>>,
}

impl MockBackend {
    /// Coaster (id 1, 100.00, stock 5), Keychain (id 2, 50.00, stock 5),
    /// Last Plaque (id 3, stock 1) and Sold Out Tag (id 4, stock 0).
    pub fn new() -> Self {
        MockBackend {
            products: Mutex::new(vec![
                json!({"id": 1, "name": "Coaster", "price": 100.0, "stock": 5, "category": "wood"}),
                json!({"id": 2, "name": "Keychain", "price": 50.0, "stock": 5, "category": "acrylic"}),
                json!({"id": 3, "name": "Last Plaque", "price": 10.0, "stock": 1}),
                json!({"id": 4, "name": "Sold Out Tag", "price": 10.0, "stock": 0}),
            ]),
            checkout_status: StatusCode::OK,
            checkout_body: json!({"status": "success"}).to_string(),
            checkout_delay: Duration::ZERO,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn checkout_reply(mut self, status: StatusCode, body: impl Into<String>) -> Self {
        self.checkout_status = status;
        self.checkout_body = body.into();
        self
    }

    pub fn checkout_delay(mut self, delay: Duration) -> Self {
        self.checkout_delay = delay;
        self
    }

    /// Binds to an ephemeral port and returns the base URL plus a handle to
    /// inspect what the backend received.
    pub async fn spawn(self) -> (String, Arc<MockBackend>) {
        let state = Arc::new(self);
        let app = Router::new()
            .route("/api/products/stock", get(stock))
            .route("/api/product/{id}", get(product))
            .route("/sales/checkout", post(checkout))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), state)
    }

    /// Changes a product's stock as seen by later requests.
    pub fn set_stock(&self, id: u64, stock: i64) {
        let mut products = self.products.lock().unwrap();
        if let Some(product) = products.iter_mut().find(|p| p["id"] == id) {
            product["stock"] = json!(stock);
        }
    }

    /// Checkout bodies received so far.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

async fn stock(State(state): State<Arc<MockBackend>>) -> Json<Value> {
    let levels: Vec<Value> = state
        .products
        .lock()
        .unwrap()
        .iter()
        .map(|p| json!({"id": p["id"], "stock": p["stock"]}))
        .collect();
    Json(Value::Array(levels))
}

async fn product(State(state): State<Arc<MockBackend>>, Path(id): Path<String>) -> Response {
    let found = state
        .products
        .lock()
        .unwrap()
        .iter()
        .find(|p| p["id"].to_string() == id)
        .cloned();

    match found {
        Some(product) => Json(product).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "Product not found"}))).into_response(),
    }
}

async fn checkout(State(state): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Response {
    state.received.lock().unwrap().push(body);
    if !state.checkout_delay.is_zero() {
        tokio::time::sleep(state.checkout_delay).await;
    }
    (state.checkout_status, state.checkout_body.clone()).into_response()
}

// =============================================================================
// Presenter
// =============================================================================

/// Records notices and answers every confirmation with a fixed value.
#[derive(Default)]
pub struct RecordingPresenter {
    accept: bool,
    notices: Mutex<Vec<Notice>>,
    prompts: Mutex<Vec<ConfirmationPrompt>>,
}

impl RecordingPresenter {
    pub fn accepting() -> Self {
        RecordingPresenter {
            accept: true,
            ..Default::default()
        }
    }

    pub fn declining() -> Self {
        RecordingPresenter::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last_notice(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn prompts(&self) -> Vec<ConfirmationPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    async fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        self.prompts.lock().unwrap().push(*prompt);
        self.accept
    }
}
