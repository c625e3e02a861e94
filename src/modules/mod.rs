pub mod customers;
pub mod hotels;

use std::fmt::Display;
use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use concierge_db::{DocumentStore, StoreError};
use concierge_http::error::AppError;
use concierge_kernel::ModuleRegistry;

use customers::directory::HotelDirectory;

/// Register the modules served by the hotel service
pub fn register_hotel_service(registry: &mut ModuleRegistry, store: Arc<dyn DocumentStore>) {
    registry.register(hotels::create_module(store));
}

/// Register the modules served by the customer service
pub fn register_customer_service(
    registry: &mut ModuleRegistry,
    store: Arc<dyn DocumentStore>,
    hotels: Arc<dyn HotelDirectory>,
) {
    registry.register(customers::create_module(store, hotels));
}

/// Map a storage failure to a 500, keeping the operation in the error chain.
pub(crate) fn storage_error(error: StoreError, operation: impl Display) -> AppError {
    AppError::Internal(
        anyhow::Error::new(error).context(format!("storage failure during {operation}")),
    )
}

/// A path segment that does not decode to text cannot name a record, so it is
/// reported as absent like any other malformed id.
pub(crate) fn undecodable_id(rejection: PathRejection, resource: &str) -> AppError {
    tracing::debug!(error = %rejection.body_text(), resource, "undecodable id in path");
    AppError::not_found(format!("{resource} not found"))
}
