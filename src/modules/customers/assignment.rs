//! Assigning a customer to a hotel.
//!
//! The workflow runs as one linear sequence per request: customer lookup,
//! remote existence check, single write. The write is never issued unless the
//! hotel service confirmed the hotel, so the failure paths leave the stored
//! customer untouched and no compensation is needed. Concurrent assignments
//! for the same customer are not serialized; the last write wins.

use std::sync::Arc;

use concierge_db::{Collection, ObjectId, StoreError};
use concierge_http::error::AppError;
use thiserror::Error;

use super::{
    directory::{DirectoryError, HotelDirectory, HotelLookup},
    models::{Customer, HOTEL_ID_FIELD},
};

#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("customer with id [{0}] not found")]
    CustomerNotFound(String),

    #[error("hotel with id [{hotel_id}] not found (hotel service answered {status})")]
    HotelNotFound { hotel_id: String, status: u16 },

    #[error("storage failure during {operation} of customer [{customer_id}]")]
    Storage {
        operation: &'static str,
        customer_id: String,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    HotelServiceUnreachable(#[from] DirectoryError),
}

impl From<AssignmentError> for AppError {
    fn from(error: AssignmentError) -> Self {
        match error {
            AssignmentError::CustomerNotFound(_) => AppError::NotFound {
                message: error.to_string(),
                code: "customer_not_found".to_string(),
            },
            AssignmentError::HotelNotFound { .. } => AppError::NotFound {
                message: error.to_string(),
                code: "hotel_not_found".to_string(),
            },
            AssignmentError::Storage { .. } | AssignmentError::HotelServiceUnreachable(_) => {
                AppError::internal(error)
            }
        }
    }
}

pub struct AssignmentCoordinator {
    customers: Collection<Customer>,
    hotels: Arc<dyn HotelDirectory>,
}

impl AssignmentCoordinator {
    pub fn new(customers: Collection<Customer>, hotels: Arc<dyn HotelDirectory>) -> Self {
        Self { customers, hotels }
    }

    /// Point the customer's hotel reference at `hotel_id` once the hotel
    /// service confirms the hotel exists; returns the updated customer.
    pub async fn assign(&self, customer_id: &str, hotel_id: &str) -> Result<Customer, AssignmentError> {
        let Ok(id) = ObjectId::parse(customer_id) else {
            return Err(AssignmentError::CustomerNotFound(customer_id.to_string()));
        };

        let existing = self
            .customers
            .find_one(&id)
            .await
            .map_err(|source| AssignmentError::Storage {
                operation: "lookup",
                customer_id: customer_id.to_string(),
                source,
            })?;
        if existing.is_none() {
            return Err(AssignmentError::CustomerNotFound(customer_id.to_string()));
        }

        match self.hotels.lookup(hotel_id).await? {
            HotelLookup::Found => {}
            HotelLookup::Missing { status } => {
                return Err(AssignmentError::HotelNotFound {
                    hotel_id: hotel_id.to_string(),
                    status,
                });
            }
        }

        let updated = self
            .customers
            .set(&id, HOTEL_ID_FIELD, hotel_id)
            .await
            .map_err(|source| AssignmentError::Storage {
                operation: "update",
                customer_id: customer_id.to_string(),
                source,
            })?
            // deleted while the hotel check was in flight
            .ok_or_else(|| AssignmentError::CustomerNotFound(customer_id.to_string()))?;

        tracing::info!(customer_id, hotel_id, "customer assigned to hotel");
        Ok(updated)
    }
}
