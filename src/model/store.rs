use std::fmt;

use serde::{Deserialize, Serialize};

/// A destination store ("Kroger", "Farmers market").
///
/// The order stores appear in the document is the display order of their
/// sections; the engine never reorders them on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub name: String,
}

/// The group an item displays under: a specific store, or the synthetic
/// unassigned group that always trails the store sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Bucket {
    Store(String),
    Unassigned,
}

impl Bucket {
    /// The store id this bucket names, if any.
    pub fn store_id(&self) -> Option<&str> {
        match self {
            Bucket::Store(id) => Some(id),
            Bucket::Unassigned => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Store(id) => write!(f, "{}", id),
            Bucket::Unassigned => write!(f, "unassigned"),
        }
    }
}
