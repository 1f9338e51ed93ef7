use serde::{Deserialize, Serialize};

use super::rank::Rank;

/// A planned meal that requested this item. Written by the meal planner,
/// read-only on the shopping side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSource {
    pub meal_id: String,
    pub meal_name: String,
    /// Plan date, `YYYY-MM-DD`
    pub date: String,
}

/// A single shopping-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    /// Display name (entry text minus any parsed quantity)
    pub name: String,
    /// Free-text quantity ("2 gallons", "12"); never a typed numeric+unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    /// Category tag ("produce", "dairy")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub checked: bool,
    /// The household wants the organic version
    #[serde(default)]
    pub organic_required: bool,
    /// Destination store; absent (or pointing at a deleted store) means the
    /// item displays under the unassigned group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Which planned meals asked for this item
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meal_sources: Vec<MealSource>,
    /// Position within the bucket's sub-list
    pub rank: Rank,
    /// Date added, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
}

impl Item {
    /// Create an unchecked, unassigned item with the given rank.
    pub fn new(id: impl Into<String>, name: impl Into<String>, rank: Rank) -> Item {
        Item {
            id: id.into(),
            name: name.into(),
            quantity: None,
            category: None,
            checked: false,
            organic_required: false,
            store_id: None,
            meal_sources: Vec::new(),
            rank,
            added: None,
        }
    }
}
