use chrono::Local;

use crate::model::{Bucket, Item, Rank, ShoppingList};
use crate::ops::dedup::{self, DuplicateResolution, QuantityMerger};
use crate::parse::parse_entry;

/// Error type for item operations
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("item not found: {0}")]
    NotFound(String),
}

/// Optional fields for a new item. Defaults: unassigned bucket, no
/// quantity, no category, organic not required.
#[derive(Debug, Clone, Default)]
pub struct AddItemOptions {
    pub store_id: Option<String>,
    /// Overrides any quantity parsed out of the entry text
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub organic_required: bool,
}

/// A parsed entry waiting to be inserted.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub quantity: Option<String>,
    pub options: AddItemOptions,
}

/// Outcome of starting an add. Nothing has been inserted in any case.
#[derive(Debug)]
pub enum AddOutcome {
    /// Entry parsed clean; insert it with [`insert_candidate`]
    Clear(Candidate),
    /// Entry was empty after trimming; nothing to do
    Empty,
    /// An item with the same name exists; insertion is paused until the
    /// caller picks a [`DuplicateResolution`]
    Duplicate {
        existing_id: String,
        candidate: Candidate,
    },
}

// ---------------------------------------------------------------------------
// Add pipeline
// ---------------------------------------------------------------------------

/// Parse a raw entry and check it against the current collection.
/// Pure read — every path through here leaves the list untouched.
pub fn begin_add(list: &ShoppingList, raw: &str, options: AddItemOptions) -> AddOutcome {
    let parsed = parse_entry(raw);
    if parsed.name.is_empty() {
        return AddOutcome::Empty;
    }

    let quantity = options.quantity.clone().or(parsed.quantity);
    let candidate = Candidate {
        name: parsed.name,
        quantity,
        options,
    };

    match dedup::check_duplicate(&list.items, &candidate.name) {
        Some(existing) => AddOutcome::Duplicate {
            existing_id: existing.id.clone(),
            candidate,
        },
        None => AddOutcome::Clear(candidate),
    }
}

/// Insert a candidate at the end of its destination bucket's unchecked
/// sub-list. Returns the new item's id.
pub fn insert_candidate(list: &mut ShoppingList, candidate: Candidate) -> String {
    let id = list.next_item_id();
    let bucket = list.resolve_bucket(candidate.options.store_id.as_deref());
    let rank = end_rank(list, &bucket, false);

    let mut item = Item::new(id.clone(), candidate.name, rank);
    item.quantity = candidate.quantity;
    item.category = candidate.options.category;
    item.organic_required = candidate.options.organic_required;
    item.store_id = candidate.options.store_id;
    item.added = Some(today_str());

    list.items.push(item);
    id
}

/// Apply the user's duplicate decision. Merge updates the existing item
/// and inserts nothing; AddAnyway inserts an independent second entry;
/// Cancel discards the candidate. Returns the inserted id, if any.
pub fn resolve_duplicate(
    list: &mut ShoppingList,
    existing_id: &str,
    candidate: Candidate,
    resolution: DuplicateResolution,
    merger: &dyn QuantityMerger,
) -> Result<Option<String>, ItemError> {
    match resolution {
        DuplicateResolution::Merge => {
            merge_quantity(list, existing_id, candidate.quantity.as_deref(), merger)?;
            Ok(None)
        }
        DuplicateResolution::AddAnyway => Ok(Some(insert_candidate(list, candidate))),
        DuplicateResolution::Cancel => Ok(None),
    }
}

/// Fold an incoming quantity request into an existing item.
pub fn merge_quantity(
    list: &mut ShoppingList,
    id: &str,
    incoming: Option<&str>,
    merger: &dyn QuantityMerger,
) -> Result<(), ItemError> {
    let item = list
        .item_mut(id)
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    item.quantity = merger.merge(item.quantity.as_deref(), incoming);
    Ok(())
}

// ---------------------------------------------------------------------------
// Item mutations
// ---------------------------------------------------------------------------

/// Flip an item's checked state. The item joins the end of whichever
/// sub-list it lands in; its old slot is not remembered, so checking and
/// unchecking moves it to the unchecked tail.
pub fn toggle_checked(list: &mut ShoppingList, id: &str) -> Result<(), ItemError> {
    let item = list
        .item(id)
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    let bucket = list.bucket_of(item);
    let now_checked = !item.checked;
    // The destination sub-list cannot contain the item yet, so the last
    // rank in it is a real neighbor.
    let rank = end_rank(list, &bucket, now_checked);

    let item = list.item_mut(id).expect("looked up above");
    item.checked = now_checked;
    item.rank = rank;
    Ok(())
}

/// Optional field updates. `None` fields are left unchanged; an empty
/// quantity or category clears the field.
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub organic_required: Option<bool>,
}

/// Edit an item in place. Renames skip duplicate detection — that is an
/// insertion-time decision point only.
pub fn update_item(list: &mut ShoppingList, id: &str, update: UpdateItem) -> Result<(), ItemError> {
    let item = list
        .item_mut(id)
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    if let Some(name) = update.name {
        let name = name.trim().to_string();
        if !name.is_empty() {
            item.name = name;
        }
    }
    if let Some(quantity) = update.quantity {
        let quantity = quantity.trim();
        item.quantity = (!quantity.is_empty()).then(|| quantity.to_string());
    }
    if let Some(category) = update.category {
        let category = category.trim();
        item.category = (!category.is_empty()).then(|| category.to_string());
    }
    if let Some(organic) = update.organic_required {
        item.organic_required = organic;
    }
    Ok(())
}

/// Remove an item. The removed item is returned so the caller can feed
/// the recall history.
pub fn delete_item(list: &mut ShoppingList, id: &str) -> Result<Item, ItemError> {
    let idx = list
        .items
        .iter()
        .position(|i| i.id == id)
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    Ok(list.items.remove(idx))
}

/// Remove every checked item across all buckets. Returns the removed
/// items for the recall history.
pub fn clear_checked(list: &mut ShoppingList) -> Vec<Item> {
    let (checked, rest): (Vec<Item>, Vec<Item>) =
        list.items.drain(..).partition(|i| i.checked);
    list.items = rest;
    checked
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rank just past the end of a bucket's sub-list.
pub(crate) fn end_rank(list: &ShoppingList, bucket: &Bucket, checked: bool) -> Rank {
    let sub = list.sub_list(bucket, checked);
    Rank::between(sub.last().map(|i| &i.rank), None)
}

fn today_str() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
