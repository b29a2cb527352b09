//! Sample item domain model.
//!
//! Sample items are the payload served by the data-access facade. They are
//! owned by the backing store and read-only for the measurement harness.

use serde::{Deserialize, Serialize};

/// A catalogue entry stored in the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
}

/// An item that has not been persisted yet (the store assigns the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSampleItem {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
}

impl NewSampleItem {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            category: category.into(),
        }
    }
}

/// The catalogue inserted into an empty store at startup.
pub fn default_catalogue() -> Vec<NewSampleItem> {
    vec![
        NewSampleItem::new("Product A", "High-quality product A", 100, "Electronics"),
        NewSampleItem::new("Product B", "Premium product B", 200, "Electronics"),
        NewSampleItem::new("Service X", "Professional service X", 150, "Services"),
        NewSampleItem::new("Service Y", "Basic service Y", 75, "Services"),
        NewSampleItem::new("Item 1", "Standard item 1", 50, "General"),
        NewSampleItem::new("Item 2", "Standard item 2", 60, "General"),
        NewSampleItem::new("Premium Product", "Top-tier premium product", 500, "Electronics"),
        NewSampleItem::new("Basic Service", "Essential basic service", 25, "Services"),
    ]
}
