//! Response bodies and the fixed status strings clients match on.

use serde::{Deserialize, Serialize};

use reshub_core::types::ResourceItem;
use reshub_worker::queue::QueueStats;

/// Gate closed on the seat path.
pub const RESERVATION_BLOCKED: &str = "Reservation are blocked";
/// A reservation job was accepted.
pub const RESERVATION_IN_PROCESS: &str = "Reservation in process";
/// The queue refused the job.
pub const RESERVATION_FAILED: &str = "Reservation failed";
/// The reservation job completed.
pub const RESERVATION_CONFIRMED: &str = "Reservation confirmed";
/// The seat worker is running.
pub const QUEUE_PROCESSING: &str = "Queue processing";
/// No catalog entry for the requested id.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";
/// The item's stock is drained.
pub const NOT_ENOUGH_STOCK: &str = "Not enough stock available";

/// `{ "status": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Outcome string.
    pub status: String,
}

impl StatusResponse {
    /// Build a status body.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// `{ "status": ..., "itemId": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStatusResponse {
    /// Outcome string.
    pub status: String,
    /// Item the reservation was for.
    pub item_id: u32,
}

impl ProductStatusResponse {
    /// Build a product status body.
    pub fn new(status: impl Into<String>, item_id: u32) -> Self {
        Self {
            status: status.into(),
            item_id,
        }
    }
}

/// Live seat count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatsResponse {
    /// Seats left.
    pub number_of_available_seats: u64,
}

/// Catalog entry with its live stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    /// Catalog fields.
    #[serde(flatten)]
    pub item: ResourceItem,
    /// Stock left in the counter store.
    pub current_quantity: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// `connected` or `unavailable`.
    pub store: String,
    /// Retained job counts by state.
    pub queue: QueueStats,
}
