//! Shared helpers for the HTTP integration tests
//!
//! Every test gets its own in-memory database and drives the router
//! in-process with `oneshot`.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use superheroes::http_server::{AppState, HttpServer, HttpServerConfig};
use superheroes::store::{Database, NamePolicy};

pub struct TestApp {
    pub db: Database,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_policy(NamePolicy::AllowDuplicates).await
    }

    pub async fn with_policy(policy: NamePolicy) -> Self {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        Self::with_db(db, policy)
    }

    pub fn with_db(db: Database, policy: NamePolicy) -> Self {
        let state = AppState::new(db.clone()).with_name_policy(policy);
        let router = HttpServer::with_config(HttpServerConfig::default(), state).router();
        Self { db, router }
    }

    /// Sends a request and returns the status and the parsed JSON body
    /// (`Value::Null` when the body is empty).
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.dispatch(request).await
    }

    /// Sends `body` verbatim with a JSON content type.
    pub async fn send_raw(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Creates a hero and returns its id
    pub async fn hero(&self, name: &str, super_name: &str) -> i64 {
        let (status, body) = self
            .post("/heroes", serde_json::json!({"name": name, "super_name": super_name}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    /// Creates a power and returns its id
    pub async fn power(&self, name: &str, description: &str) -> i64 {
        let (status, body) = self
            .post("/powers", serde_json::json!({"name": name, "description": description}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    /// Links a hero to a power and returns the link id
    pub async fn link(&self, hero_id: i64, power_id: i64, strength: &str) -> i64 {
        let (status, body) = self
            .post(
                "/hero_powers",
                serde_json::json!({"hero_id": hero_id, "power_id": power_id, "strength": strength}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

/// Error messages of a 400 body
pub fn errors(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .unwrap_or_else(|| panic!("no errors array in {body}"))
        .iter()
        .map(|e| e.as_str().unwrap().to_string())
        .collect()
}
