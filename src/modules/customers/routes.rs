use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use concierge_db::{Collection, ObjectId};
use concierge_http::error::AppError;

use super::{
    assignment::AssignmentCoordinator,
    models::{CreateCustomer, Customer},
};
use crate::modules::{storage_error, undecodable_id};

#[derive(Clone)]
pub(crate) struct CustomersState {
    pub customers: Collection<Customer>,
    pub coordinator: Arc<AssignmentCoordinator>,
}

pub(crate) fn router(state: CustomersState) -> Router {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{customer_id}",
            get(get_customer).delete(delete_customer),
        )
        .route(
            "/customers/{customer_id}/hotels/{hotel_id}",
            put(assign_hotel),
        )
        .with_state(state)
}

async fn list_customers(
    State(state): State<CustomersState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    tracing::info!("handling request: get all customers");

    let customers = state
        .customers
        .find_all()
        .await
        .map_err(|e| storage_error(e, "list customers"))?;

    Ok(Json(customers))
}

async fn get_customer(
    State(state): State<CustomersState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Customer>, AppError> {
    let Path(customer_id) = path.map_err(|e| undecodable_id(e, "customer"))?;
    tracing::info!(customer_id = %customer_id, "handling request: get customer by id");

    let not_found = || AppError::not_found(format!("customer with id [{customer_id}] not found"));

    let Ok(id) = ObjectId::parse(&customer_id) else {
        return Err(not_found());
    };

    state
        .customers
        .find_one(&id)
        .await
        .map_err(|e| storage_error(e, format!("get customer [{customer_id}]")))?
        .map(Json)
        .ok_or_else(not_found)
}

/// Succeeds whether or not the customer existed; malformed ids are a no-op.
async fn delete_customer(
    State(state): State<CustomersState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Ok(Path(customer_id)) = path else {
        tracing::info!("delete with undecodable customer id ignored");
        return Ok(StatusCode::OK);
    };
    tracing::info!(customer_id = %customer_id, "handling request: delete customer by id");

    if let Ok(id) = ObjectId::parse(&customer_id) {
        state
            .customers
            .delete(&id)
            .await
            .map_err(|e| storage_error(e, format!("delete customer [{customer_id}]")))?;
    }

    tracing::info!(customer_id = %customer_id, "customer deleted");
    Ok(StatusCode::OK)
}

async fn create_customer(
    State(state): State<CustomersState>,
    payload: Result<Json<CreateCustomer>, JsonRejection>,
) -> Result<Json<Customer>, AppError> {
    tracing::info!("handling request: create a new customer");
    let Json(new_customer) = payload?;

    let customer = state
        .customers
        .insert(&new_customer)
        .await
        .map_err(|e| storage_error(e, "create customer"))?;

    tracing::info!(customer_id = %customer.id, "customer saved");
    Ok(Json(customer))
}

async fn assign_hotel(
    State(state): State<CustomersState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Customer>, AppError> {
    let Path((customer_id, hotel_id)) =
        path.map_err(|e| undecodable_id(e, "customer or hotel"))?;
    tracing::info!(
        customer_id = %customer_id,
        hotel_id = %hotel_id,
        "handling request: assign customer to hotel"
    );

    let customer = state.coordinator.assign(&customer_id, &hotel_id).await?;
    Ok(Json(customer))
}
