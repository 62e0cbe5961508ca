//! Immutable product catalog for the stock reservation endpoints.

use serde::{Deserialize, Serialize};

/// A catalog entry. Loaded once at startup and never mutated; live stock
/// lives in the counter store under `item.<item_id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceItem {
    /// Catalog identifier.
    pub item_id: u32,
    /// Display name.
    pub item_name: String,
    /// Unit price.
    pub price: u64,
    /// Stock seeded into the counter store at startup.
    pub initial_available_quantity: u64,
}

impl ResourceItem {
    /// Build a catalog entry.
    pub fn new(item_id: u32, item_name: impl Into<String>, price: u64, quantity: u64) -> Self {
        Self {
            item_id,
            item_name: item_name.into(),
            price,
            initial_available_quantity: quantity,
        }
    }
}

/// Read-only product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<ResourceItem>,
}

impl Catalog {
    /// Create a catalog from a list of items.
    pub fn new(items: Vec<ResourceItem>) -> Self {
        Self { items }
    }

    /// All items, in configuration order.
    pub fn items(&self) -> &[ResourceItem] {
        &self.items
    }

    /// Look up an item by id.
    pub fn get(&self, item_id: u32) -> Option<&ResourceItem> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    /// Look up an item from a raw path segment. Anything that is not a
    /// valid id resolves to `None`.
    pub fn lookup(&self, raw_id: &str) -> Option<&ResourceItem> {
        raw_id.trim().parse::<u32>().ok().and_then(|id| self.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            ResourceItem::new(1, "Suitcase 250", 50, 4),
            ResourceItem::new(2, "Suitcase 450", 100, 10),
        ])
    }

    #[test]
    fn test_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("2").map(|i| i.price), Some(100));
        assert!(catalog.lookup("99").is_none());
        assert!(catalog.lookup("abc").is_none());
        assert!(catalog.lookup("-1").is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ResourceItem::new(1, "Suitcase 250", 50, 4)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "itemId": 1,
                "itemName": "Suitcase 250",
                "price": 50,
                "initialAvailableQuantity": 4
            })
        );
    }
}
