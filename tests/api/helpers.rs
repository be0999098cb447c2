//! Shared helpers for driving the router in-process.

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use canteen_orderservice::{
    catalog::Catalog,
    common::{
        app_state::AppState,
        config::{AppConfig, CatalogConfig, LoggingConfig, ServerConfig, StorageConfig},
        middleware::SESSION_HEADER,
    },
    routes,
    storage::FileStorage,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub storage_dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

fn test_config(storage_dir: &Path) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        storage: StorageConfig {
            dir: storage_dir.to_path_buf(),
        },
        catalog: CatalogConfig { path: None },
        logging: LoggingConfig {
            level: "debug".into(),
        },
    }
}

impl TestApp {
    pub fn new() -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
        Self::with_storage(storage_dir)
    }

    /// A fresh process over an existing storage directory.
    pub fn with_storage(storage_dir: TempDir) -> Self {
        let storage = FileStorage::new(storage_dir.path()).expect("Failed to open storage");
        let state = AppState::new(
            test_config(storage_dir.path()),
            Catalog::builtin().expect("Failed to load menu"),
            Arc::new(storage),
        );
        Self {
            router: routes::app(state.clone()),
            state,
            storage_dir,
        }
    }

    pub fn restart(self) -> Self {
        Self::with_storage(self.storage_dir)
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        session: Option<Uuid>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(session) = session {
            req = req.header(SESSION_HEADER, session.to_string());
        }
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Request failed");

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            location,
            body,
        }
    }

    pub async fn open_session(&self) -> Uuid {
        let res = self.request("POST", "/sessions", None, None).await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.body["data"]["session_id"]
            .as_str()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .expect("Missing session id")
    }

    pub async fn sign_up(&self, session: Uuid, name: &str, role: &str) -> TestResponse {
        self.request(
            "POST",
            "/auth/sign-up",
            Some(json!({ "name": name, "role": role })),
            Some(session),
        )
        .await
    }

    pub async fn customer(&self, name: &str) -> Uuid {
        let session = self.open_session().await;
        let res = self.sign_up(session, name, "customer").await;
        assert_eq!(res.status, StatusCode::OK);
        session
    }

    pub async fn canteen(&self, name: &str) -> Uuid {
        let session = self.open_session().await;
        let res = self.sign_up(session, name, "canteen").await;
        assert_eq!(res.status, StatusCode::OK);
        session
    }

    pub async fn add_to_cart(&self, session: Uuid, item_id: &str, customization: Option<&str>) -> TestResponse {
        self.request(
            "POST",
            "/cart/lines",
            Some(json!({ "item_id": item_id, "customization": customization })),
            Some(session),
        )
        .await
    }

    pub async fn checkout_upi(&self, session: Uuid, upi_id: &str) -> TestResponse {
        self.request(
            "POST",
            "/checkout",
            Some(json!({ "payment_method": "upi", "upi_id": upi_id })),
            Some(session),
        )
        .await
    }
}
