mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::send;
use concierge_app::Service;
use concierge_db::MemoryStore;
use concierge_kernel::Settings;
use serde_json::json;

fn hotel_service() -> (Arc<MemoryStore>, axum::Router) {
    let store = Arc::new(MemoryStore::new());
    let router = Service::hotel(store.clone()).router(&Settings::default());
    (store, router)
}

#[tokio::test]
async fn create_then_fetch_hotel() {
    let (_, router) = hotel_service();

    let created = send(&router, "POST", "/hotels", Some(json!({"name": "H"}))).await;
    assert_eq!(created.status, StatusCode::OK);
    let hotel = created.json();
    assert_eq!(hotel["name"], "H");
    let id = hotel["_id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let fetched = send(&router, "GET", &format!("/hotels/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), hotel);
}

#[tokio::test]
async fn list_returns_every_hotel() {
    let (_, router) = hotel_service();
    for name in ["Alpha", "Beta"] {
        send(&router, "POST", "/hotels", Some(json!({ "name": name }))).await;
    }

    let listed = send(&router, "GET", "/hotels", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let names: Vec<_> = listed
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found_without_body() {
    let (_, router) = hotel_service();

    for uri in ["/hotels/5a1b2c3d4e5f60718293a4b5", "/hotels/UNKNOWN"] {
        let reply = send(&router, "GET", uri, None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{uri}");
        assert!(reply.body.is_empty());
    }
}

#[tokio::test]
async fn non_utf8_id_is_not_found() {
    let (_, router) = hotel_service();

    let reply = send(&router, "GET", "/hotels/%FF", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.is_empty());
}

#[tokio::test]
async fn malformed_id_is_not_found_even_when_store_is_down() {
    let (store, router) = hotel_service();
    store.close();

    let reply = send(&router, "GET", "/hotels/UNKNOWN", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_outage_is_internal_error() {
    let (store, router) = hotel_service();
    store.close();

    let listed = send(&router, "GET", "/hotels", None).await;
    assert_eq!(listed.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(listed.body.is_empty());

    let fetched = send(&router, "GET", "/hotels/5a1b2c3d4e5f60718293a4b5", None).await;
    assert_eq!(fetched.status, StatusCode::INTERNAL_SERVER_ERROR);

    let created = send(&router, "POST", "/hotels", Some(json!({"name": "H"}))).await;
    assert_eq!(created.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn create_without_name_is_bad_request() {
    let (_, router) = hotel_service();

    let reply = send(&router, "POST", "/hotels", Some(json!({"title": "H"}))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["error"]["code"], "invalid_body");
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let (_, router) = hotel_service();

    let health = send(&router, "GET", "/healthz", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(&health.body[..], b"ok");
    assert!(health.headers.get("x-request-id").is_some());

    let docs = send(&router, "GET", "/swagger.json", None).await;
    assert_eq!(docs.status, StatusCode::OK);
    let spec = docs.json();
    assert_eq!(spec["info"]["title"], "Hotel Service API");
    assert!(spec["paths"]["/hotels/{hotelId}"]["get"].is_object());
}
