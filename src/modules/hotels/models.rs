use serde::{Deserialize, Serialize};

/// Stored hotel record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    /// Identifier generated by the store
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Request model for creating a new hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHotel {
    pub name: String,
}
