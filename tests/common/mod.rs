#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode},
    Router,
};
use concierge_app::modules::customers::directory::{DirectoryError, HotelDirectory, HotelLookup};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct Reply {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    Reply {
        status,
        headers,
        body,
    }
}

/// Hotel directory answering from a fixed set of ids.
pub struct KnownHotels {
    known: HashSet<String>,
    reachable: bool,
    asked: Mutex<Vec<String>>,
}

impl KnownHotels {
    pub fn new<I, S>(ids: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            known: ids.into_iter().map(Into::into).collect(),
            reachable: true,
            asked: Mutex::new(Vec::new()),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            known: HashSet::new(),
            reachable: false,
            asked: Mutex::new(Vec::new()),
        })
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl HotelDirectory for KnownHotels {
    async fn lookup(&self, hotel_id: &str) -> Result<HotelLookup, DirectoryError> {
        self.asked.lock().unwrap().push(hotel_id.to_string());
        if !self.reachable {
            let source = reqwest::Client::new()
                .get("http://127.0.0.1:0/")
                .send()
                .await
                .unwrap_err();
            return Err(DirectoryError::Unreachable {
                url: "http://127.0.0.1:0/".to_string(),
                source,
            });
        }

        if self.known.contains(hotel_id) {
            Ok(HotelLookup::Found)
        } else {
            Ok(HotelLookup::Missing { status: 404 })
        }
    }
}
