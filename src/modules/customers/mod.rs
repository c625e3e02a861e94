pub mod assignment;
pub mod directory;
pub mod models;
mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use concierge_db::{Collection, DocumentStore};
use concierge_kernel::{InitCtx, Module};
use serde_json::json;

use assignment::AssignmentCoordinator;
use directory::HotelDirectory;
use models::Customer;

/// Name of the collection holding customer records
pub const CUSTOMERS_COLLECTION: &str = "customers";

/// Customer management, including assignment of customers to hotels
pub struct CustomersModule {
    customers: Collection<Customer>,
    coordinator: Arc<AssignmentCoordinator>,
}

impl CustomersModule {
    pub fn new(store: Arc<dyn DocumentStore>, hotels: Arc<dyn HotelDirectory>) -> Self {
        let customers = Collection::new(store, CUSTOMERS_COLLECTION);
        let coordinator = Arc::new(AssignmentCoordinator::new(customers.clone(), hotels));
        Self {
            customers,
            coordinator,
        }
    }
}

#[async_trait]
impl Module for CustomersModule {
    fn name(&self) -> &'static str {
        "customers"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            service = %ctx.service,
            environment = ?ctx.settings.environment,
            collection = self.customers.name(),
            hotel_directory = %ctx.settings.hotel_directory.base_url,
            "customers module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(routes::CustomersState {
            customers: self.customers.clone(),
            coordinator: self.coordinator.clone(),
        })
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let customer_id = json!({
            "name": "customerId",
            "in": "path",
            "required": true,
            "description": "customer's id",
            "schema": { "type": "string" }
        });
        let single_customer = json!({
            "application/json": {
                "schema": { "$ref": "#/components/schemas/CustomerResponse" }
            }
        });

        Some(json!({
            "paths": {
                "/customers": {
                    "get": {
                        "summary": "Gets all customers",
                        "tags": ["Customer management"],
                        "responses": {
                            "200": {
                                "description": "An array of customers",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/CustomerResponse" }
                                        }
                                    }
                                }
                            },
                            "500": { "description": "Storage failure" }
                        }
                    },
                    "post": {
                        "summary": "Creates a new customer",
                        "tags": ["Customer management"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CustomerRequest" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Successfully created",
                                "content": single_customer.clone()
                            },
                            "400": {
                                "description": "Malformed customer representation",
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
                "/customers/{customerId}": {
                    "get": {
                        "summary": "Gets a single customer for the given customerId",
                        "tags": ["Customer management"],
                        "parameters": [customer_id.clone()],
                        "responses": {
                            "200": {
                                "description": "A single customer",
                                "content": single_customer.clone()
                            },
                            "404": { "description": "The customer was not found" },
                            "500": { "description": "Storage failure" }
                        }
                    },
                    "delete": {
                        "summary": "Removes a single customer for the given customerId",
                        "tags": ["Customer management"],
                        "parameters": [customer_id.clone()],
                        "responses": {
                            "200": { "description": "The customer was removed" },
                            "500": { "description": "Storage failure" }
                        }
                    }
                },
                "/customers/{customerId}/hotels/{hotelId}": {
                    "put": {
                        "summary": "Assigns a given hotel to the given customer",
                        "tags": ["Customer management"],
                        "parameters": [
                            customer_id,
                            {
                                "name": "hotelId",
                                "in": "path",
                                "required": true,
                                "description": "hotel's id",
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Successfully assigned",
                                "content": single_customer
                            },
                            "404": { "description": "The customer or hotel was not found" },
                            "500": { "description": "Storage failure or hotel service unreachable" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "CustomerRequest": {
                        "type": "object",
                        "properties": {
                            "firstname": { "type": "string" },
                            "lastname": { "type": "string" }
                        },
                        "required": ["firstname", "lastname"]
                    },
                    "CustomerResponse": {
                        "type": "object",
                        "properties": {
                            "_id": { "type": "string" },
                            "firstname": { "type": "string" },
                            "lastname": { "type": "string" },
                            "hotelId": { "type": "string" }
                        },
                        "required": ["_id", "firstname", "lastname"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "customers module stopped");
        Ok(())
    }
}

/// Create a new instance of the customers module
pub fn create_module(
    store: Arc<dyn DocumentStore>,
    hotels: Arc<dyn HotelDirectory>,
) -> Arc<dyn Module> {
    Arc::new(CustomersModule::new(store, hotels))
}
