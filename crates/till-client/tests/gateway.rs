//! HttpGateway against a mock backend.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::MockBackend;
use till_client::{ClientError, HttpGateway, SaleGateway};
use till_core::{Cart, Money, SaleRequest, StockLimit};

fn one_line_request() -> SaleRequest {
    let mut cart = Cart::new();
    cart.add_item("1", "Coaster", Money::from_cents(10_000), StockLimit::Finite(5))
        .unwrap();
    SaleRequest::from_items(cart.items())
}

#[tokio::test]
async fn test_fetch_stock_accepts_numeric_ids() {
    let (url, _backend) = MockBackend::new().spawn().await;
    let gateway = HttpGateway::new(url);

    let levels = gateway.fetch_stock().await.unwrap();

    assert_eq!(levels.len(), 4);
    assert_eq!(levels[0].id, "1");
    assert_eq!(levels[0].stock, 5);
}

#[tokio::test]
async fn test_fetch_product() {
    let (url, _backend) = MockBackend::new().spawn().await;
    let gateway = HttpGateway::new(format!("{url}/"));

    let product = gateway.fetch_product("2").await.unwrap();
    assert_eq!(product.name, "Keychain");
    assert_eq!(product.price, Money::from_cents(5_000));

    let missing = gateway.fetch_product("99").await;
    assert!(matches!(missing, Err(ClientError::ProductNotFound(id)) if id == "99"));
}

#[tokio::test]
async fn test_submit_sale_success() {
    let (url, backend) = MockBackend::new().spawn().await;
    let gateway = HttpGateway::new(url);

    gateway.submit_sale(&one_line_request()).await.unwrap();

    assert_eq!(
        backend.received(),
        vec![json!({"cart": [{"id": "1", "name": "Coaster", "price": 100.0, "qty": 1}]})]
    );
}

#[tokio::test]
async fn test_submit_sale_rejected_with_message() {
    let (url, _backend) = MockBackend::new()
        .checkout_reply(
            StatusCode::BAD_REQUEST,
            json!({"status": "error", "error": "Out of stock"}).to_string(),
        )
        .spawn()
        .await;

    let result = HttpGateway::new(url).submit_sale(&one_line_request()).await;

    match result {
        Err(ClientError::Rejected { message }) => assert_eq!(message.as_deref(), Some("Out of stock")),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_status_field_decides_even_on_http_ok() {
    let (url, _backend) = MockBackend::new()
        .checkout_reply(StatusCode::OK, json!({"status": "failed"}).to_string())
        .spawn()
        .await;

    let result = HttpGateway::new(url).submit_sale(&one_line_request()).await;
    assert!(matches!(result, Err(ClientError::Rejected { message: None })));
}

#[tokio::test]
async fn test_non_json_answer_is_malformed() {
    let (url, _backend) = MockBackend::new()
        .checkout_reply(StatusCode::INTERNAL_SERVER_ERROR, "<html>Internal Server Error</html>")
        .spawn()
        .await;

    let result = HttpGateway::new(url).submit_sale(&one_line_request()).await;
    assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_unreachable_backend_is_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = HttpGateway::new(format!("http://{addr}")).fetch_stock().await;
    assert!(matches!(result, Err(ClientError::Http(_))));
}
