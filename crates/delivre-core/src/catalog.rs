//! Catalog records as returned by the data store.

use serde::{Deserialize, Serialize};

use crate::locale::LocalizedText;

/// A restaurant offering dishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: LocalizedText,
    pub description: Option<String>,
    /// Inactive restaurants are hidden from the public listing.
    pub is_active: bool,
}

/// A dish category (e.g. "Grills", "Desserts").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: LocalizedText,
    /// Upstream sort key; never recomputed here.
    pub display_order: i64,
}

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: LocalizedText,
    pub description: Option<LocalizedText>,
    pub price: f64,
    pub image_url: Option<String>,
    pub available: bool,
    pub restaurant_id: String,
    pub category_id: Option<String>,
}

/// Find a record by id in a fetched snapshot.
pub(crate) fn find_restaurant<'a>(restaurants: &'a [Restaurant], id: &str) -> Option<&'a Restaurant> {
    restaurants.iter().find(|r| r.id == id)
}

pub(crate) fn find_category<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == id)
}
