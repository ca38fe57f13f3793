//! HTTP contract of the station endpoints, exercised through the real router.
//!
//! Run with: cargo test --test station_routes_test

mod common;

use serde_json::json;

use common::{
    empty_request, insert_inventory, insert_status, json_request, send, test_config, test_db,
    test_router, test_router_with,
};

fn station_body() -> serde_json::Value {
    json!({
        "nombre": "A CORUÑA",
        "idema": "1387",
        "provincia": "A CORUÑA",
        "x": 43.3658,
        "y": -8.4214,
        "altitud": 58,
        "estado": 1,
    })
}

#[tokio::test]
async fn create_then_fetch_round_trip() {
    let app = test_router(test_db().await);

    let (status, created) = send(&app, json_request("POST", "/stations", &station_body())).await;
    assert_eq!(status, 201, "{created}");
    assert_eq!(created["nombre"], "A CORUÑA");
    assert_eq!(created["x"], 43.3658);
    assert_eq!(created["y"], -8.4214);
    assert_eq!(created["estado"], "active");

    let id = created["id"].as_i64().expect("numeric id");
    let uri = format!("/stations/{id}");

    let (status, fetched) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, 200);
    assert_eq!(fetched, created);

    let (status, listed) = send(&app, empty_request("GET", "/stations")).await;
    assert_eq!(status, 200);
    assert_eq!(listed, json!([created]));

    let (status, deleted) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, 200, "{deleted}");
    assert_eq!(deleted["inventory_deleted"], true);
    assert_eq!(deleted["status_deleted"], true);

    let (status, body) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, 404);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_with_invalid_fields_lists_them_all() {
    let app = test_router(test_db().await);
    let body = json!({
        "nombre": "A CORUÑA",
        "x": "north",
        "altitud": 58,
        "estado": 1,
    });

    let (status, error) = send(&app, json_request("POST", "/stations", &body)).await;

    assert_eq!(status, 422);
    assert_eq!(error["error"], "Validation failed");
    assert!(error["message"].is_string());
    let details = error["details"].as_object().expect("details object");
    let mut fields: Vec<&str> = details.keys().map(String::as_str).collect();
    fields.sort_unstable();
    assert_eq!(fields, vec!["idema", "provincia", "x", "y"]);
}

#[tokio::test]
async fn create_with_malformed_json_is_bad_request() {
    let app = test_router(test_db().await);
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/stations")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"nombre\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_ids_are_client_errors() {
    let app = test_router(test_db().await);

    for uri in [
        "/stations/abc",
        "/stations/-1",
        "/stations/0",
        "/stations/1.5",
        "/stations/+5",
        "/stations/05",
    ] {
        let (status, body) = send(&app, empty_request("GET", uri)).await;
        assert_eq!(status, 400, "GET {uri}: {body}");

        let (status, body) = send(&app, empty_request("DELETE", uri)).await;
        assert_eq!(status, 400, "DELETE {uri}: {body}");

        let (status, body) = send(&app, json_request("PUT", uri, &json!({"estado": 1}))).await;
        assert_eq!(status, 400, "PUT {uri}: {body}");
    }
}

#[tokio::test]
async fn missing_station_is_not_found() {
    let app = test_router(test_db().await);

    let (status, _) = send(&app, empty_request("GET", "/stations/12")).await;
    assert_eq!(status, 404);

    let (status, _) = send(&app, empty_request("DELETE", "/stations/12")).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn status_update_reports_change_then_no_op() {
    let db = test_db().await;
    insert_inventory(&db, 3, "OURENSE").await;
    insert_status(&db, 3, Some(0)).await;
    let app = test_router(db);

    let (status, body) = send(&app, json_request("PUT", "/stations/3", &json!({"estado": true}))).await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["changed"], true);
    assert_eq!(body["estado"], "active");

    let (status, body) = send(&app, json_request("PUT", "/stations/3", &json!({"status": 1}))).await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["changed"], false);
    assert_eq!(body["estado"], "active");
}

#[tokio::test]
async fn status_update_rejects_extra_fields() {
    let db = test_db().await;
    insert_inventory(&db, 3, "OURENSE").await;
    insert_status(&db, 3, Some(0)).await;
    let app = test_router(db);

    let (status, body) = send(
        &app,
        json_request("PUT", "/stations/3", &json!({"estado": 1, "nombre": "X"})),
    )
    .await;
    assert_eq!(status, 400, "{body}");

    let (_, station) = send(&app, empty_request("GET", "/stations/3")).await;
    assert_eq!(station["estado"], "inactive");
    assert_eq!(station["nombre"], "OURENSE");
}

#[tokio::test]
async fn status_update_without_status_row_is_not_found() {
    let db = test_db().await;
    insert_inventory(&db, 3, "OURENSE").await;
    let app = test_router(db);

    let (status, body) = send(&app, json_request("PUT", "/stations/3", &json!({"estado": 1}))).await;
    assert_eq!(status, 404, "{body}");
}

#[tokio::test]
async fn delete_with_only_status_row_succeeds() {
    let db = test_db().await;
    insert_status(&db, 8, Some(1)).await;
    let app = test_router(db);

    let (status, body) = send(&app, empty_request("DELETE", "/stations/8")).await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["inventory_deleted"], false);
    assert_eq!(body["status_deleted"], true);

    let (status, _) = send(&app, empty_request("DELETE", "/stations/8")).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn html_list_renders_labels_and_pagination() {
    let db = test_db().await;
    for id in 1..=3 {
        insert_inventory(&db, id, &format!("Station {id}")).await;
    }
    insert_status(&db, 1, Some(1)).await;
    let app = test_router(db);

    let (status, body) = send(&app, empty_request("GET", "/estaciones?page=1&per_page=2")).await;
    assert_eq!(status, 200);
    let html = body.as_str().expect("html body");
    assert!(html.contains("Station 1"));
    assert!(html.contains("Station 2"));
    assert!(!html.contains("Station 3"));
    assert!(html.contains(">active<"));
    assert!(html.contains(">inactive<"));
    assert!(html.contains("Page 1 of 2"));
    assert!(html.contains("page=2"));
}

#[tokio::test]
async fn html_list_of_no_stations_says_so() {
    let app = test_router(test_db().await);

    let (status, body) = send(&app, empty_request("GET", "/estaciones")).await;
    assert_eq!(status, 200);
    assert!(body.as_str().unwrap().contains("No stations available."));
}

#[tokio::test]
async fn html_detail_and_errors() {
    let db = test_db().await;
    insert_inventory(&db, 5, "<Lleida>").await;
    let app = test_router(db);

    let (status, body) = send(&app, empty_request("GET", "/estaciones/5")).await;
    assert_eq!(status, 200);
    let html = body.as_str().unwrap();
    assert!(html.contains("&lt;Lleida&gt;"), "names are escaped");
    assert!(html.contains(">inactive<"));

    let (status, body) = send(&app, empty_request("GET", "/estaciones/6")).await;
    assert_eq!(status, 404);
    assert!(body.as_str().unwrap().contains("404 Not Found"));

    let (status, _) = send(&app, empty_request("GET", "/estaciones/x")).await;
    assert_eq!(status, 400);

    let (status, _) = send(&app, empty_request("GET", "/estaciones?page=0")).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn html_list_rejects_page_past_any_offset() {
    let db = test_db().await;
    insert_inventory(&db, 1, "Zaragoza").await;
    let app = test_router(db);

    let (status, body) = send(
        &app,
        empty_request("GET", "/estaciones?page=18446744073709551615&per_page=200"),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body.as_str().unwrap().contains("out of range"));

    let (status, _) = send(&app, empty_request("GET", "/estaciones?page=2&per_page=200")).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn rate_limited_router_throttles_writes_apart_from_reads() {
    let mut config = test_config();
    config.disable_rate_limiting = false;
    config.rate_limit_read_per_second = 1;
    config.rate_limit_read_burst = 100;
    // One write token every minute, three up front.
    config.rate_limit_write_per_second = 60;
    config.rate_limit_write_burst = 3;
    let app = test_router_with(test_db().await, config);

    let (status, _) = send(&app, empty_request("GET", "/stations")).await;
    assert_eq!(status, 200);

    let (status, created) = send(&app, json_request("POST", "/stations", &station_body())).await;
    assert_eq!(status, 201);
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/stations/{id}");

    let (status, _) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, 200);
    let (status, _) = send(&app, empty_request("GET", &format!("/estaciones/{id}"))).await;
    assert_eq!(status, 200);

    let (status, _) = send(&app, json_request("PUT", &uri, &json!({ "estado": 0 }))).await;
    assert_eq!(status, 200);
    let (status, _) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, 200);

    // Write budget spent.
    let (status, _) = send(&app, json_request("POST", "/stations", &station_body())).await;
    assert_eq!(status, 429);
    let (status, _) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, 429);

    // Reads draw from their own bucket.
    let (status, body) = send(&app, empty_request("GET", "/stations")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
    let (status, _) = send(&app, empty_request("GET", "/estaciones")).await;
    assert_eq!(status, 200);

    let (status, _) = send(&app, empty_request("GET", "/healthz")).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn health_check_is_ok() {
    let app = test_router(test_db().await);

    let (status, _) = send(&app, empty_request("GET", "/healthz")).await;
    assert_eq!(status, 200);
}
