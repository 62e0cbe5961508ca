//! Initial inventory: the seat count and the product catalog.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::catalog::ResourceItem;

/// Inventory seeded into the counter store at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Number of seats available when the server starts.
    #[serde(default = "default_seats")]
    pub seats: u64,
    /// Product catalog for the stock reservation endpoints.
    #[serde(default = "default_products")]
    pub products: Vec<ResourceItem>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            seats: default_seats(),
            products: default_products(),
        }
    }
}

impl InventoryConfig {
    /// Item ids must be unique, otherwise two catalog entries share a counter.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut seen = HashSet::new();
        for product in &self.products {
            if !seen.insert(product.item_id) {
                return Err(AppError::configuration(format!(
                    "Duplicate itemId {} in inventory.products",
                    product.item_id
                )));
            }
        }
        Ok(())
    }
}

fn default_seats() -> u64 {
    50
}

fn default_products() -> Vec<ResourceItem> {
    vec![
        ResourceItem::new(1, "Suitcase 250", 50, 4),
        ResourceItem::new(2, "Suitcase 450", 100, 10),
        ResourceItem::new(3, "Suitcase 650", 350, 2),
        ResourceItem::new(4, "Suitcase 1050", 550, 5),
    ]
}
