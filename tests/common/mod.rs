#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
    Router,
};
use foods_api::{config::AppConfig, db, AppState};
use sea_orm::{ConnectionTrait, DatabaseBackend as DbBackend, Statement};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const SCHEMA: [&str; 2] = [
    r#"CREATE TABLE foods (
        ITEM_ID TEXT PRIMARY KEY NOT NULL,
        ITEM_NAME TEXT NOT NULL,
        ITEM_UNIT TEXT NOT NULL,
        COMPANY_ID TEXT NOT NULL
    );"#,
    r#"CREATE TABLE customer (
        CUST_CODE TEXT PRIMARY KEY NOT NULL,
        CUST_NAME TEXT NOT NULL,
        WORKING_AREA TEXT,
        OUTSTANDING_AMT REAL NOT NULL
    );"#,
];

pub fn test_config(database_url: String) -> AppConfig {
    let mut cfg = AppConfig::new(
        database_url,
        "127.0.0.1".to_string(),
        3000,
        "test".to_string(),
    );
    // A single SQLite writer avoids SQLITE_BUSY under concurrent requests
    cfg.db_max_connections = 1;
    cfg.db_acquire_timeout_secs = 5;
    cfg
}

/// The full router backed by a SQLite file in a private temp dir.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _dir: Option<TempDir>,
}

impl TestApp {
    /// Fresh database with empty `foods` and `customer` tables.
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("foods.db");
        let cfg = test_config(format!("sqlite://{}?mode=rwc", path.display()));

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        for sql in SCHEMA {
            pool.execute(Statement::from_string(DbBackend::Sqlite, sql.to_string()))
                .await
                .expect("create test schema");
        }

        let mut app = Self::with_pool(pool, cfg);
        app._dir = Some(dir);
        app
    }

    /// The full router over an arbitrary connection, e.g. a `MockDatabase`.
    pub fn with_pool(pool: db::DbPool, cfg: AppConfig) -> Self {
        let state = AppState::new(pool, cfg);
        let router = foods_api::build_router(state.clone()).expect("build router");
        Self {
            router,
            state,
            _dir: None,
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Send a request with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        self.send(builder.body(body).expect("failed to build request"))
            .await
    }

    /// Send an url-encoded form body.
    pub async fn request_form(&self, method: Method, uri: &str, form: &str) -> Response {
        self.request_raw(method, uri, Some("application/x-www-form-urlencoded"), form.to_string())
            .await
    }

    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: String,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        self.send(builder.body(Body::from(body)).expect("failed to build request"))
            .await
    }

    pub async fn seed_food(&self, id: &str, name: &str, unit: &str, company: &str) {
        self.state
            .db
            .execute(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "INSERT INTO foods (ITEM_ID, ITEM_NAME, ITEM_UNIT, COMPANY_ID) VALUES (?, ?, ?, ?)",
                [id.into(), name.into(), unit.into(), company.into()],
            ))
            .await
            .expect("seed food");
    }

    pub async fn seed_customer(&self, code: &str, name: &str, outstanding: f64) {
        self.state
            .db
            .execute(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "INSERT INTO customer (CUST_CODE, CUST_NAME, WORKING_AREA, OUTSTANDING_AMT) VALUES (?, ?, ?, ?)",
                [code.into(), name.into(), "Bangalore".into(), outstanding.into()],
            ))
            .await
            .expect("seed customer");
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// The row of `rows` whose `key` column equals `value`.
pub fn find_row<'a>(rows: &'a Value, key: &str, value: &str) -> Option<&'a Value> {
    rows.as_array()?
        .iter()
        .find(|row| row[key].as_str() == Some(value))
}
