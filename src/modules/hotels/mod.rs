pub mod models;
mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use concierge_db::{Collection, DocumentStore};
use concierge_kernel::{InitCtx, Module};
use serde_json::json;

use models::Hotel;

/// Name of the collection holding hotel records
pub const HOTELS_COLLECTION: &str = "hotels";

/// Hotel management: listing, lookup and creation of hotels.
///
/// `GET /hotels/{hotel_id}` is what the customer service calls to confirm a
/// hotel exists before assigning a customer to it.
pub struct HotelsModule {
    hotels: Collection<Hotel>,
}

impl HotelsModule {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            hotels: Collection::new(store, HOTELS_COLLECTION),
        }
    }
}

#[async_trait]
impl Module for HotelsModule {
    fn name(&self) -> &'static str {
        "hotels"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            service = %ctx.service,
            environment = ?ctx.settings.environment,
            collection = self.hotels.name(),
            "hotels module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(routes::HotelsState {
            hotels: self.hotels.clone(),
        })
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/hotels": {
                    "get": {
                        "summary": "Gets all hotels",
                        "tags": ["Hotel management"],
                        "responses": {
                            "200": {
                                "description": "An array of hotels",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/HotelResponse" }
                                        }
                                    }
                                }
                            },
                            "500": { "description": "Storage failure" }
                        }
                    },
                    "post": {
                        "summary": "Creates a new hotel",
                        "tags": ["Hotel management"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/HotelRequest" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Successfully created",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/HotelResponse" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Malformed hotel representation",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "500": { "description": "Storage failure" }
                        }
                    }
                },
                "/hotels/{hotelId}": {
                    "get": {
                        "summary": "Gets a single hotel for the given hotelId",
                        "tags": ["Hotel management"],
                        "parameters": [{
                            "name": "hotelId",
                            "in": "path",
                            "required": true,
                            "description": "hotel's id",
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "A single hotel",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/HotelResponse" }
                                    }
                                }
                            },
                            "404": { "description": "The hotel was not found" },
                            "500": { "description": "Storage failure" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "HotelRequest": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" }
                        },
                        "required": ["name"]
                    },
                    "HotelResponse": {
                        "type": "object",
                        "properties": {
                            "_id": { "type": "string" },
                            "name": { "type": "string" }
                        },
                        "required": ["_id", "name"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "hotels module stopped");
        Ok(())
    }
}

/// Create a new instance of the hotels module
pub fn create_module(store: Arc<dyn DocumentStore>) -> Arc<dyn Module> {
    Arc::new(HotelsModule::new(store))
}
