use serde::{Deserialize, Serialize};

use super::item::Item;
use super::store::{Bucket, Store};

/// The shared shopping-list document: stores, items, and the recall history.
///
/// This is exactly what the persistence layer hands every viewer; the engine
/// keeps no state of its own and recomputes all views from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    #[serde(default)]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub items: Vec<Item>,
    /// Names of recently removed items, newest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recently_removed: Vec<String>,
}

impl ShoppingList {
    pub fn new() -> ShoppingList {
        ShoppingList::default()
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn store(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    /// Bucket a raw store reference resolves to; a reference to a store
    /// that no longer exists resolves to the unassigned group.
    pub fn resolve_bucket(&self, store_id: Option<&str>) -> Bucket {
        match store_id {
            Some(id) if self.store(id).is_some() => Bucket::Store(id.to_string()),
            _ => Bucket::Unassigned,
        }
    }

    /// Bucket the item currently displays under.
    pub fn bucket_of(&self, item: &Item) -> Bucket {
        self.resolve_bucket(item.store_id.as_deref())
    }

    /// One sub-list of a bucket (checked or unchecked), in display order.
    pub fn sub_list(&self, bucket: &Bucket, checked: bool) -> Vec<&Item> {
        let mut items: Vec<&Item> = self
            .items
            .iter()
            .filter(|i| i.checked == checked && self.bucket_of(i) == *bucket)
            .collect();
        items.sort_by(|a, b| (&a.rank, &a.id).cmp(&(&b.rank, &b.id)));
        items
    }

    pub fn next_item_id(&self) -> String {
        next_id("i", self.items.iter().map(|i| i.id.as_str()))
    }

    pub fn next_store_id(&self) -> String {
        next_id("s", self.stores.iter().map(|s| s.id.as_str()))
    }
}

/// Next sequential id for a prefix: scan for the highest `{prefix}-NNN`
/// already in use and go one past it.
fn next_id<'a>(prefix: &str, ids: impl Iterator<Item = &'a str>) -> String {
    let dash = format!("{}-", prefix);
    let max = ids
        .filter_map(|id| id.strip_prefix(&dash))
        .filter_map(|n| n.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{:03}", prefix, max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rank::Rank;

    fn sample_list() -> ShoppingList {
        let mut list = ShoppingList::new();
        list.stores.push(Store {
            id: "s-001".into(),
            name: "Kroger".into(),
        });
        let r1 = Rank::between(None, None);
        let r2 = Rank::between(Some(&r1), None);
        let mut milk = Item::new("i-001", "Milk", r1);
        milk.store_id = Some("s-001".into());
        let mut bread = Item::new("i-002", "Bread", r2);
        bread.store_id = Some("s-gone".into());
        list.items.push(milk);
        list.items.push(bread);
        list
    }

    #[test]
    fn test_item_lookup() {
        let list = sample_list();
        assert_eq!(list.item("i-001").unwrap().name, "Milk");
        assert!(list.item("i-999").is_none());
    }

    #[test]
    fn test_dangling_store_resolves_unassigned() {
        let list = sample_list();
        let bread = list.item("i-002").unwrap();
        assert_eq!(list.bucket_of(bread), Bucket::Unassigned);
    }

    #[test]
    fn test_sub_list_sorted_by_rank() {
        let mut list = sample_list();
        // Give a third item a rank before the first.
        let first = list.item("i-001").unwrap().rank.clone();
        let early = Rank::between(None, Some(&first));
        let mut eggs = Item::new("i-003", "Eggs", early);
        eggs.store_id = Some("s-001".into());
        list.items.push(eggs);

        let sub = list.sub_list(&Bucket::Store("s-001".into()), false);
        let names: Vec<&str> = sub.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "Milk"]);
    }

    #[test]
    fn test_next_ids_scan_max() {
        let list = sample_list();
        assert_eq!(list.next_item_id(), "i-003");
        assert_eq!(list.next_store_id(), "s-002");

        let empty = ShoppingList::new();
        assert_eq!(empty.next_item_id(), "i-001");
    }
}
