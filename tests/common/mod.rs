#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use storefront_api::{
    app::build_router,
    config::AppConfig,
    db::run_migrations,
    state::AppState,
};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }
}

/// A fresh application backed by its own in-memory SQLite database.
pub async fn spawn_app() -> anyhow::Result<TestApp> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // Every pooled connection would otherwise get its own empty database.
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;

    let config = AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        token_ttl_secs: 3600,
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
    };
    let state = AppState::new(orm, config);
    let router = build_router(state.clone());
    Ok(TestApp { router, state })
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request(Method::POST, uri, Some(body), token).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, None, token).await
    }

    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.post(
            "/api/admin/register",
            serde_json::json!({ "username": username, "password": password }),
            None,
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post(
            "/api/admin/login",
            serde_json::json!({ "username": username, "password": password }),
            None,
        )
        .await
    }

    /// Register an admin and return a fresh token for it.
    pub async fn admin_token(&self, username: &str, password: &str) -> String {
        let registered = self.register(username, password).await;
        assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.text);
        let logged_in = self.login(username, password).await;
        assert_eq!(logged_in.status, StatusCode::OK, "{}", logged_in.text);
        logged_in.json()["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Create a product and return its id.
    pub async fn create_product(&self, token: &str, name: &str, price: Value) -> String {
        let created = self
            .post(
                "/api/products",
                serde_json::json!({
                    "name": name,
                    "price": price,
                    "imageUrl": format!("http://img.test/{name}.png"),
                }),
                Some(token),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED, "{}", created.text);
        created.json()["id"].as_str().expect("product id").to_string()
    }

    pub async fn add_to_cart(&self, user_id: &str, product_id: &str, quantity: i32) -> TestResponse {
        self.post(
            "/api/cart",
            serde_json::json!({
                "userId": user_id,
                "productId": product_id,
                "quantity": quantity,
            }),
            None,
        )
        .await
    }

    pub async fn cart(&self, user_id: &str) -> Vec<Value> {
        let response = self.get(&format!("/api/cart/{user_id}")).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        response.json().as_array().cloned().expect("cart array")
    }

    pub async fn products(&self) -> Vec<Value> {
        let response = self.get("/api/products").await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        response.json().as_array().cloned().expect("product array")
    }
}
