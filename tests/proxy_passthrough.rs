//! Catalog and order pass-through against live mock backends.

use std::time::{Duration, Instant};
use storefront_sdk::StorefrontClient;

mod common;

#[tokio::test]
async fn test_product_list_is_relayed() {
    let backend = common::start_mock_backend(|_| {
        (200, r#"[{"id":1,"name":"Latte","price":500}]"#.to_string())
    })
    .await;
    let edge = common::start_edge(common::config_for(&backend.url())).await;

    let res = common::http_client()
        .get(format!("{}/api/products", edge.url()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!([{"id":1,"name":"Latte","price":500}]));

    let seen = backend.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].path, "/api/products");
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_product_routes_forward_method_path_and_body() {
    let backend = common::start_mock_backend(|_| (200, "{}".to_string())).await;
    let edge = common::start_edge(common::config_for(&backend.url())).await;
    let client = common::http_client();

    let created = r#"{"name":"Flat White","price":450,"stock":20}"#;
    let updated = r#"{"price":475}"#;

    client
        .get(format!("{}/api/products/4", edge.url()))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/api/products", edge.url()))
        .header("content-type", "application/json")
        .body(created)
        .send()
        .await
        .unwrap();
    client
        .put(format!("{}/api/products/4", edge.url()))
        .header("content-type", "application/json")
        .body(updated)
        .send()
        .await
        .unwrap();
    client
        .delete(format!("{}/api/products/4", edge.url()))
        .send()
        .await
        .unwrap();

    let seen: Vec<(String, String, Vec<u8>)> = backend
        .requests()
        .into_iter()
        .map(|r| (r.method.to_string(), r.path, r.body.to_vec()))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("GET".to_string(), "/api/products/4".to_string(), Vec::new()),
            ("POST".to_string(), "/api/products".to_string(), created.as_bytes().to_vec()),
            ("PUT".to_string(), "/api/products/4".to_string(), updated.as_bytes().to_vec()),
            ("DELETE".to_string(), "/api/products/4".to_string(), Vec::new()),
        ]
    );
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_order_by_id_is_not_forwarded() {
    let backend = common::start_mock_backend(|_| (200, "{}".to_string())).await;
    let edge = common::start_edge(common::config_for(&backend.url())).await;

    let res = common::http_client()
        .get(format!("{}/api/orders/17", edge.url()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert!(backend.requests().is_empty());
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_catalog_rejection_passes_through() {
    let backend = common::start_mock_backend(|_| {
        (400, r#"{"detail":"price must be positive"}"#.to_string())
    })
    .await;
    let edge = common::start_edge(common::config_for(&backend.url())).await;

    let res = common::http_client()
        .post(format!("{}/api/products", edge.url()))
        .header("content-type", "application/json")
        .body(r#"{"name":"Mocha","price":-1}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert_eq!(res.text().await.unwrap(), r#"{"detail":"price must be positive"}"#);
    assert_eq!(backend.requests()[0].body, r#"{"name":"Mocha","price":-1}"#.as_bytes());
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_sdk_product_listing() {
    let backend =
        common::start_mock_backend(|_| (200, r#"[{"id":1,"name":"Latte"}]"#.to_string())).await;
    let edge = common::start_edge(common::config_for(&backend.url())).await;

    let res = StorefrontClient::new(&edge.url()).products().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body[0]["name"], "Latte");
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_order_body_forwarded_verbatim() {
    let backend =
        common::start_mock_backend(|_| (201, r#"{"id":9,"status":"pending"}"#.to_string())).await;
    let edge = common::start_edge(common::config_for(&backend.url())).await;

    let payload = r#"{"items":[{"product_id":1,"quantity":2,"price":500}]}"#;
    let res = common::http_client()
        .post(format!("{}/api/orders", edge.url()))
        .header("content-type", "application/json")
        .body(payload)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 201);
    assert_eq!(res.text().await.unwrap(), r#"{"id":9,"status":"pending"}"#);

    let seen = backend.requests();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].body, payload.as_bytes());
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_backend_error_status_passes_through() {
    let backend = common::start_mock_backend(|_| {
        (400, r#"{"detail":"Product 99 not found"}"#.to_string())
    })
    .await;
    let edge = common::start_edge(common::config_for(&backend.url())).await;

    let res = common::http_client()
        .post(format!("{}/api/orders", edge.url()))
        .header("content-type", "application/json")
        .body(r#"{"items":[{"product_id":99,"quantity":1,"price":1}]}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"detail":"Product 99 not found"}));
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_backend_404_passes_through() {
    let backend =
        common::start_mock_backend(|_| (404, r#"{"detail":"Not Found"}"#.to_string())).await;
    let edge = common::start_edge(common::config_for(&backend.url())).await;

    let res = common::http_client()
        .get(format!("{}/api/products/12345", edge.url()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), r#"{"detail":"Not Found"}"#);
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_backend_is_generic_500() {
    let edge = common::start_edge(common::config_for(&common::dead_backend_url())).await;

    let start = Instant::now();
    let res = common::http_client()
        .get(format!("{}/api/products", edge.url()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    assert!(start.elapsed() < Duration::from_secs(2));
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_slow_backend_times_out_as_500() {
    let backend = common::start_programmable_backend(|| async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        (200, "[]".to_string())
    })
    .await;
    let mut config = common::config_for(&format!("http://{backend}"));
    config.backend.request_timeout_ms = 200;
    let edge = common::start_edge(config).await;

    let res = common::http_client()
        .get(format!("{}/api/products", edge.url()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_path_is_local_404() {
    let backend = common::start_mock_backend(|_| (200, "{}".to_string())).await;
    let edge = common::start_edge(common::config_for(&backend.url())).await;

    let res = common::http_client()
        .get(format!("{}/api/unknown", edge.url()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "Not found"}));
    assert!(backend.requests().is_empty());
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let backend = common::start_mock_backend(|_| (200, "[]".to_string())).await;
    let edge = common::start_edge(common::config_for(&backend.url())).await;

    let res = common::http_client()
        .get(format!("{}/api/products", edge.url()))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()["x-request-id"], "trace-me");
    edge.shutdown.trigger();
}

#[tokio::test]
async fn test_config_reload_switches_backend() {
    let first = common::start_mock_backend(|_| (200, r#"["first"]"#.to_string())).await;
    let second = common::start_mock_backend(|_| (200, r#"["second"]"#.to_string())).await;
    let edge = common::start_edge(common::config_for(&first.url())).await;

    edge.state.carts.add(
        "s1",
        storefront_edge::CartLine::new(1, 1, 500, "Latte"),
    );
    edge.config_updates
        .send(common::config_for(&second.url()))
        .unwrap();

    // Reload is applied asynchronously.
    let client = common::http_client();
    let mut body = String::new();
    for _ in 0..50 {
        body = client
            .get(format!("{}/api/products", edge.url()))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        if body == r#"["second"]"# {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(body, r#"["second"]"#);
    assert_eq!(edge.state.carts.get("s1").len(), 1);
    edge.shutdown.trigger();
}
