//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use axum::{body::Body, http::Request, Router};
use meteo_stations::common::AppState;
use meteo_stations::config::Config;
use meteo_stations::entity::{station_inventory, station_status};
use meteo_stations::routes::build_router;
use meteo_stations::services::NewStation;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::Value;
use tower::ServiceExt;

/// Fresh in-memory SQLite database with the real migrations applied.
///
/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn test_router(db: DatabaseConnection) -> Router {
    test_router_with(db, test_config())
}

pub fn test_router_with(db: DatabaseConnection, config: Config) -> Router {
    build_router(AppState::new(db, config))
}

/// Local settings: rate limiting off.
pub fn test_config() -> Config {
    Config::local("sqlite::memory:")
}

pub fn new_station(name: &str, status: i32) -> NewStation {
    NewStation {
        name: name.to_string(),
        idema: "3195".to_string(),
        province: "MADRID".to_string(),
        latitude: 40.4117,
        longitude: -3.6781,
        altitude: 667,
        status,
    }
}

/// Inventory row with an explicit id, bypassing the service.
pub async fn insert_inventory(db: &DatabaseConnection, id: i32, name: &str) {
    station_inventory::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        idema: Set(format!("ID{id}")),
        province: Set("VALENCIA".to_string()),
        latitude: Set(39.48),
        longitude: Set(-0.36),
        altitude: Set(11),
    }
    .insert(db)
    .await
    .expect("insert inventory row");
}

/// Status row with an explicit id, bypassing the service.
pub async fn insert_status(db: &DatabaseConnection, id: i32, status: Option<i32>) {
    station_status::ActiveModel {
        id: Set(id),
        status: Set(status),
    }
    .insert(db)
    .await
    .expect("insert status row");
}

/// Send one request through the router and decode the body (JSON when
/// possible, otherwise the raw text as a JSON string).
pub async fn send(app: &Router, request: Request<Body>) -> (u16, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");

    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}
