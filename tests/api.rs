use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use products_api::{build_app, dtos::product::ProductResponse, state::AppState, store::MemoryProductStore};
use serde_json::{json, Value};
use testresult::TestResult;
use tower::ServiceExt;

struct TestApp {
    app: Router,
}

impl TestApp {
    fn new() -> Self {
        Self {
            app: build_app(AppState::new(Arc::new(MemoryProductStore::new()))),
        }
    }

    async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> TestResult<(StatusCode, Value)> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.app.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, body))
    }

    async fn get_text(&self, uri: &str) -> TestResult<(StatusCode, String)> {
        let request = Request::builder().method("GET").uri(uri).body(Body::empty())?;
        let response = self.app.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;

        Ok((status, String::from_utf8(bytes.to_vec())?))
    }

    async fn list(&self) -> TestResult<Vec<ProductResponse>> {
        let (status, body) = self.call("GET", "/products", None).await?;
        assert_eq!(status, StatusCode::OK);
        Ok(serde_json::from_value(body)?)
    }
}

#[tokio::test]
async fn create_then_list_contains_widget() -> TestResult {
    let app = TestApp::new();

    let (status, body) = app
        .call("POST", "/products", Some(json!({"name": "Widget", "price": 9.99, "quantity": 5})))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "Product added"}));

    let products = app.list().await?;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Widget");
    assert_eq!(products[0].price, 9.99);
    assert_eq!(products[0].quantity, 5);
    assert_eq!(products[0].description, None);

    Ok(())
}

#[tokio::test]
async fn list_starts_empty() -> TestResult {
    let app = TestApp::new();

    let (status, body) = app.call("GET", "/products", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    Ok(())
}

#[tokio::test]
async fn client_supplied_id_is_ignored() -> TestResult {
    let app = TestApp::new();

    app.call("POST", "/products", Some(json!({"name": "a", "price": 1, "quantity": 1})))
        .await?;
    let (status, _) = app
        .call("POST", "/products", Some(json!({"id": 1, "name": "b", "price": 2, "quantity": 2})))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let products = app.list().await?;
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let (_, first) = app.call("GET", "/products/1", None).await?;
    assert_eq!(first["name"], "a");

    Ok(())
}

#[tokio::test]
async fn get_by_id_matches_created_entity_until_updated() -> TestResult {
    let app = TestApp::new();
    app.call(
        "POST",
        "/products",
        Some(json!({"name": "Lamp", "description": "desk", "price": 20.5, "quantity": 3})),
    )
    .await?;

    let (status, body) = app.call("GET", "/products/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 1, "name": "Lamp", "description": "desk", "price": 20.5, "quantity": 3})
    );

    let (status, body) = app.call("PUT", "/products/1", Some(json!({"quantity": 4}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Product updated"}));

    let (_, body) = app.call("GET", "/products/1", None).await?;
    assert_eq!(
        body,
        json!({"id": 1, "name": "Lamp", "description": "desk", "price": 20.5, "quantity": 4})
    );

    Ok(())
}

#[tokio::test]
async fn empty_update_changes_nothing() -> TestResult {
    let app = TestApp::new();
    app.call("POST", "/products", Some(json!({"name": "Cup", "price": 2.0, "quantity": 10})))
        .await?;
    let before = app.list().await?;

    let (status, _) = app.call("PUT", "/products/1", Some(json!({}))).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.list().await?, before);

    Ok(())
}

#[tokio::test]
async fn invalid_update_is_all_or_nothing() -> TestResult {
    let app = TestApp::new();
    app.call("POST", "/products", Some(json!({"name": "Cup", "price": 2.0, "quantity": 10})))
        .await?;
    let before = app.list().await?;

    let (status, body) = app
        .call("PUT", "/products/1", Some(json!({"price": 3.0, "name": ""})))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"name": ["Shorter than minimum length 1."]}));
    assert_eq!(app.list().await?, before, "valid price must not be applied");

    Ok(())
}

#[tokio::test]
async fn update_unknown_product_returns_404() -> TestResult {
    let app = TestApp::new();

    let (status, _) = app.call("PUT", "/products/999", Some(json!({"name": "x"}))).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn delete_is_permanent_and_repeat_is_404() -> TestResult {
    let app = TestApp::new();
    app.call("POST", "/products", Some(json!({"name": "Tmp", "price": 1.0, "quantity": 1})))
        .await?;

    let (status, body) = app.call("DELETE", "/products/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Product deleted"}));

    let (status, _) = app.call("GET", "/products/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.call("DELETE", "/products/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn create_rejects_missing_name() -> TestResult {
    let app = TestApp::new();

    let (status, body) = app
        .call("POST", "/products", Some(json!({"price": 1.0, "quantity": 1})))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"name": ["Missing data for required field."]}));
    assert!(app.list().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn health_is_ok() -> TestResult {
    let app = TestApp::new();

    let (status, body) = app.call("GET", "/api/health", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    Ok(())
}

#[tokio::test]
async fn api_document_is_served() -> TestResult {
    let app = TestApp::new();

    let (status, body) = app.call("GET", "/apispec.json", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body["openapi"].as_str().is_some_and(|v| v.starts_with("3.")));
    assert!(body["paths"]["/products/{id}"]["put"].is_object());

    Ok(())
}

#[tokio::test]
async fn interactive_docs_are_served() -> TestResult {
    let app = TestApp::new();

    let (status, _) = app.get_text("/apidocs").await?;
    assert!(status.is_success() || status.is_redirection(), "{status}");

    let (status, page) = app.get_text("/apidocs/").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("swagger-ui"), "{page}");

    Ok(())
}
