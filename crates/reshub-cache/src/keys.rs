//! Counter key builders.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Counter key for the seat family.
pub fn available_seats() -> String {
    "available_seats".to_string()
}

/// Counter key for a catalog item's live stock.
pub fn item(item_id: u32) -> String {
    format!("item.{item_id}")
}
