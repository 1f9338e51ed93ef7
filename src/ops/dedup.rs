use crate::model::Item;
use crate::parse::{format_amount, parse_quantity, units_match};

/// Find an existing item with the same name, ignoring case.
///
/// The scan covers the whole collection, not one bucket: "milk" headed to
/// the farmers market still matches "Milk" at Kroger. Matching is exact
/// string equality after case folding; no fuzzy matching.
pub fn check_duplicate<'a>(items: &'a [Item], name: &str) -> Option<&'a Item> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    items.iter().find(|i| i.name.to_lowercase() == needle)
}

/// What the user chose to do about a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateResolution {
    /// Fold the new quantity into the existing item; insert nothing
    Merge,
    /// Insert an independent second entry with the same name
    AddAnyway,
    /// Discard the candidate; no state change
    Cancel,
}

/// Policy for combining an existing quantity with an incoming one.
///
/// Swappable because there is no one right answer for "2 gallons" plus
/// "a splash"; every policy here refuses to convert between units.
pub trait QuantityMerger {
    fn merge(&self, existing: Option<&str>, incoming: Option<&str>) -> Option<String>;
}

/// Adds the amounts when both sides parse as a number with the same unit
/// word (unitless counts as its own unit); anything else joins the two
/// texts so neither request is lost.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumMerger;

impl QuantityMerger for SumMerger {
    fn merge(&self, existing: Option<&str>, incoming: Option<&str>) -> Option<String> {
        let (existing, incoming) = match (existing, incoming) {
            (e, None) => return e.map(str::to_string),
            (None, i) => return i.map(str::to_string),
            (Some(e), Some(i)) => (e, i),
        };

        if let (Some(a), Some(b)) = (parse_quantity(existing), parse_quantity(incoming))
            && units_match(a.unit.as_deref(), b.unit.as_deref())
        {
            let total = format_amount(a.amount + b.amount);
            return Some(match a.unit {
                // Keep the existing unit spelling
                Some(unit) => format!("{} {}", total, unit),
                None => total,
            });
        }

        Some(format!("{} + {}", existing, incoming))
    }
}

/// Always joins the two texts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatMerger;

impl QuantityMerger for ConcatMerger {
    fn merge(&self, existing: Option<&str>, incoming: Option<&str>) -> Option<String> {
        match (existing, incoming) {
            (Some(e), Some(i)) => Some(format!("{} + {}", e, i)),
            (Some(e), None) => Some(e.to_string()),
            (None, i) => i.map(str::to_string),
        }
    }
}
