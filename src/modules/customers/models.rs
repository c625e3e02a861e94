use serde::{Deserialize, Serialize};

/// Document field holding the assigned hotel's id
pub const HOTEL_ID_FIELD: &str = "hotelId";

/// Stored customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Identifier generated by the store
    #[serde(rename = "_id")]
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    /// Hotel the customer is assigned to; absent until the first assignment
    #[serde(rename = "hotelId", default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<String>,
}

/// Request model for creating a new customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomer {
    pub firstname: String,
    pub lastname: String,
}
