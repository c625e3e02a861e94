mod common;

use std::sync::Arc;

use axum::{http::StatusCode, Router};
use common::{send, KnownHotels};
use concierge_app::Service;
use concierge_db::MemoryStore;
use concierge_kernel::Settings;
use serde_json::{json, Value};

const HOTEL: &str = "6b2c3d4e5f60718293a4b5c6";

struct Harness {
    store: Arc<MemoryStore>,
    hotels: Arc<KnownHotels>,
    router: Router,
}

impl Harness {
    fn new(hotels: Arc<KnownHotels>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = Service::customer(store.clone(), hotels.clone()).router(&Settings::default());
        Self {
            store,
            hotels,
            router,
        }
    }

    async fn create_customer(&self) -> Value {
        let reply = send(
            &self.router,
            "POST",
            "/customers",
            Some(json!({"firstname": "A", "lastname": "B"})),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        reply.json()
    }

    async fn fetch(&self, id: &str) -> Value {
        let reply = send(&self.router, "GET", &format!("/customers/{id}"), None).await;
        assert_eq!(reply.status, StatusCode::OK);
        reply.json()
    }
}

fn id_of(customer: &Value) -> String {
    customer["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_get_and_list_customers() {
    let harness = Harness::new(KnownHotels::new([HOTEL]));
    let customer = harness.create_customer().await;
    assert_eq!(customer["firstname"], "A");
    assert_eq!(customer["lastname"], "B");
    assert!(customer.get("hotelId").is_none());

    let id = id_of(&customer);
    assert_eq!(harness.fetch(&id).await, customer);

    let listed = send(&harness.router, "GET", "/customers", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.json(), json!([customer]));
}

#[tokio::test]
async fn assignment_sets_hotel_reference() {
    let harness = Harness::new(KnownHotels::new([HOTEL]));
    let id = id_of(&harness.create_customer().await);

    let reply = send(
        &harness.router,
        "PUT",
        &format!("/customers/{id}/hotels/{HOTEL}"),
        None,
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["hotelId"], HOTEL);
    assert_eq!(reply.json()["_id"], id.as_str());
    assert_eq!(harness.fetch(&id).await["hotelId"], HOTEL);
    assert_eq!(harness.hotels.asked(), vec![HOTEL]);
}

#[tokio::test]
async fn unknown_hotel_is_not_found_and_keeps_prior_assignment() {
    let harness = Harness::new(KnownHotels::new([HOTEL]));
    let id = id_of(&harness.create_customer().await);
    send(
        &harness.router,
        "PUT",
        &format!("/customers/{id}/hotels/{HOTEL}"),
        None,
    )
    .await;

    let reply = send(
        &harness.router,
        "PUT",
        &format!("/customers/{id}/hotels/UNKNOWN"),
        None,
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.is_empty());
    assert_eq!(harness.fetch(&id).await["hotelId"], HOTEL);
}

#[tokio::test]
async fn unknown_customer_is_not_found_before_hotel_check() {
    let harness = Harness::new(KnownHotels::new([HOTEL]));

    for customer_id in ["5a1b2c3d4e5f60718293a4b5", "not-an-object-id"] {
        let reply = send(
            &harness.router,
            "PUT",
            &format!("/customers/{customer_id}/hotels/{HOTEL}"),
            None,
        )
        .await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{customer_id}");
    }

    assert!(harness.hotels.asked().is_empty());
    let listed = send(&harness.router, "GET", "/customers", None).await;
    assert_eq!(listed.json(), json!([]));
}

#[tokio::test]
async fn unreachable_hotel_service_is_internal_error() {
    let harness = Harness::new(KnownHotels::unreachable());
    let id = id_of(&harness.create_customer().await);

    let reply = send(
        &harness.router,
        "PUT",
        &format!("/customers/{id}/hotels/{HOTEL}"),
        None,
    )
    .await;

    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(reply.body.is_empty());
    assert!(harness.fetch(&id).await.get("hotelId").is_none());
}

#[tokio::test]
async fn malformed_ids_never_yield_server_errors() {
    let harness = Harness::new(KnownHotels::new([HOTEL]));
    harness.store.close();

    let get = send(&harness.router, "GET", "/customers/xyz", None).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let assign = send(
        &harness.router,
        "PUT",
        &format!("/customers/xyz/hotels/{HOTEL}"),
        None,
    )
    .await;
    assert_eq!(assign.status, StatusCode::NOT_FOUND);

    let delete = send(&harness.router, "DELETE", "/customers/xyz", None).await;
    assert_eq!(delete.status, StatusCode::OK);
}

#[tokio::test]
async fn non_utf8_ids_are_treated_as_malformed() {
    let harness = Harness::new(KnownHotels::new([HOTEL]));
    let id = id_of(&harness.create_customer().await);

    let get = send(&harness.router, "GET", "/customers/%FF", None).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert!(get.body.is_empty());

    for uri in [
        format!("/customers/%FF/hotels/{HOTEL}"),
        format!("/customers/{id}/hotels/%FF"),
    ] {
        let reply = send(&harness.router, "PUT", &uri, None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{uri}");
    }
    assert!(harness.hotels.asked().is_empty());
    assert!(harness.fetch(&id).await.get("hotelId").is_none());

    let delete = send(&harness.router, "DELETE", "/customers/%FF", None).await;
    assert_eq!(delete.status, StatusCode::OK);
    assert!(delete.body.is_empty());
    harness.fetch(&id).await;
}

#[tokio::test]
async fn store_outage_is_internal_error() {
    let harness = Harness::new(KnownHotels::new([HOTEL]));
    let id = id_of(&harness.create_customer().await);
    harness.store.close();

    for (method, uri) in [
        ("GET", "/customers".to_string()),
        ("GET", format!("/customers/{id}")),
        ("DELETE", format!("/customers/{id}")),
        ("PUT", format!("/customers/{id}/hotels/{HOTEL}")),
    ] {
        let reply = send(&harness.router, method, &uri, None).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
    }
    assert!(harness.hotels.asked().is_empty());

    harness.store.reopen();
    assert!(harness.fetch(&id).await.get("hotelId").is_none());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let harness = Harness::new(KnownHotels::new([HOTEL]));
    let id = id_of(&harness.create_customer().await);

    for _ in 0..2 {
        let reply = send(&harness.router, "DELETE", &format!("/customers/{id}"), None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.body.is_empty());
    }

    let fetched = send(&harness.router, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_malformed_body_is_bad_request() {
    let harness = Harness::new(KnownHotels::new([HOTEL]));

    let reply = send(
        &harness.router,
        "POST",
        "/customers",
        Some(json!({"firstname": "A"})),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let body = reply.json();
    assert_eq!(body["error"]["code"], "invalid_body");
    assert_eq!(
        body["error"]["trace_id"],
        reply.headers["x-error-id"].to_str().unwrap()
    );
}

#[tokio::test]
async fn openapi_documents_assignment_route() {
    let harness = Harness::new(KnownHotels::new([HOTEL]));

    let docs = send(&harness.router, "GET", "/swagger.json", None).await;
    assert_eq!(docs.status, StatusCode::OK);
    let spec = docs.json();
    assert_eq!(spec["info"]["title"], "Customer Service API");
    assert!(spec["paths"]["/customers/{customerId}/hotels/{hotelId}"]["put"].is_object());
    assert!(spec["components"]["schemas"]["CustomerResponse"].is_object());
}
