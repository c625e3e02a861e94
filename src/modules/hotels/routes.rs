use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::get,
    Json, Router,
};
use concierge_db::{Collection, ObjectId};
use concierge_http::error::AppError;

use super::models::{CreateHotel, Hotel};
use crate::modules::{storage_error, undecodable_id};

#[derive(Clone)]
pub(crate) struct HotelsState {
    pub hotels: Collection<Hotel>,
}

pub(crate) fn router(state: HotelsState) -> Router {
    Router::new()
        .route("/hotels", get(list_hotels).post(create_hotel))
        .route("/hotels/{hotel_id}", get(get_hotel))
        .with_state(state)
}

async fn list_hotels(State(state): State<HotelsState>) -> Result<Json<Vec<Hotel>>, AppError> {
    tracing::info!("handling request: get all hotels");

    let hotels = state
        .hotels
        .find_all()
        .await
        .map_err(|e| storage_error(e, "list hotels"))?;

    Ok(Json(hotels))
}

/// Doubles as the existence check used by the customer service: any
/// identifier that cannot address a record is reported as absent.
async fn get_hotel(
    State(state): State<HotelsState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Hotel>, AppError> {
    let Path(hotel_id) = path.map_err(|e| undecodable_id(e, "hotel"))?;
    tracing::info!(hotel_id = %hotel_id, "handling request: get hotel by id");

    let not_found = || AppError::not_found(format!("hotel with id [{hotel_id}] not found"));

    let Ok(id) = ObjectId::parse(&hotel_id) else {
        return Err(not_found());
    };

    state
        .hotels
        .find_one(&id)
        .await
        .map_err(|e| storage_error(e, format!("get hotel [{hotel_id}]")))?
        .map(Json)
        .ok_or_else(not_found)
}

async fn create_hotel(
    State(state): State<HotelsState>,
    payload: Result<Json<CreateHotel>, JsonRejection>,
) -> Result<Json<Hotel>, AppError> {
    tracing::info!("handling request: create a new hotel");
    let Json(new_hotel) = payload?;

    let hotel = state
        .hotels
        .insert(&new_hotel)
        .await
        .map_err(|e| storage_error(e, "create hotel"))?;

    tracing::info!(hotel_id = %hotel.id, "hotel saved");
    Ok(Json(hotel))
}
