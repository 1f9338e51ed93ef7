use indexmap::IndexMap;

use crate::model::{Bucket, Item, Store};

/// One display group: a store section, or the trailing unassigned group.
#[derive(Debug)]
pub struct Section<'a> {
    pub bucket: Bucket,
    /// The store entity; absent for the unassigned group
    pub store: Option<&'a Store>,
    /// Unchecked items in manual order, then checked items in check order.
    /// The two runs are never interleaved.
    pub items: Vec<&'a Item>,
}

impl<'a> Section<'a> {
    /// Display title: the store name, or "Unassigned".
    pub fn title(&self) -> &'a str {
        self.store.map(|s| s.name.as_str()).unwrap_or("Unassigned")
    }

    pub fn unchecked(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.items.iter().copied().filter(|i| !i.checked)
    }

    pub fn checked(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.items.iter().copied().filter(|i| i.checked)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Partition items into per-store sections.
///
/// The output always has one section per store, in the order the stores
/// were supplied (empty stores render too), followed by exactly one
/// unassigned section, also always present. Items whose store no longer
/// exists land in the unassigned section.
pub fn build_sections<'a>(items: &'a [Item], stores: &'a [Store]) -> Vec<Section<'a>> {
    let mut buckets: IndexMap<Bucket, Vec<&Item>> = IndexMap::new();
    for store in stores {
        buckets.entry(Bucket::Store(store.id.clone())).or_default();
    }
    buckets.insert(Bucket::Unassigned, Vec::new());

    for item in items {
        let key = match &item.store_id {
            Some(sid) if stores.iter().any(|s| s.id == *sid) => Bucket::Store(sid.clone()),
            _ => Bucket::Unassigned,
        };
        buckets.entry(key).or_default().push(item);
    }

    buckets
        .into_iter()
        .map(|(bucket, mut items)| {
            items.sort_by(|a, b| {
                (a.checked, &a.rank, &a.id).cmp(&(b.checked, &b.rank, &b.id))
            });
            let store = bucket
                .store_id()
                .and_then(|sid| stores.iter().find(|s| s.id == sid));
            Section {
                bucket,
                store,
                items,
            }
        })
        .collect()
}
