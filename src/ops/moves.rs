use crate::model::{Bucket, Item, Rank, ShoppingList};
use crate::ops::item_ops::{ItemError, end_rank};

/// Where a move lands. Defaults: keep the current bucket, append at the
/// end of the unchecked sub-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveDestination {
    /// New bucket; `None` keeps the item's current bucket
    pub bucket: Option<Bucket>,
    /// Unchecked item to land immediately before; `None`, or an id that is
    /// not in the destination's unchecked sub-list, means "end of list"
    pub before_id: Option<String>,
}

/// Move an item. One primitive covers same-bucket reorders and
/// cross-bucket transfers: the bucket change (if any) applies first, then
/// the item is positioned against the destination bucket's unchecked
/// sub-list. Checked items only ever change bucket — they append to the
/// destination's checked sub-list and `before_id` is ignored.
pub fn move_item(
    list: &mut ShoppingList,
    id: &str,
    dest: MoveDestination,
) -> Result<(), ItemError> {
    let item = list
        .item(id)
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    let checked = item.checked;
    let current_bucket = list.bucket_of(item);

    // The stored reference keeps whatever the caller asked for; the
    // resolved bucket folds a dangling store id into Unassigned.
    let (store_id, bucket) = match &dest.bucket {
        Some(Bucket::Store(sid)) => (Some(sid.clone()), list.resolve_bucket(Some(sid))),
        Some(Bucket::Unassigned) => (None, Bucket::Unassigned),
        None => (item.store_id.clone(), current_bucket.clone()),
    };

    if checked {
        if bucket == current_bucket {
            // Checked items hold their slot; nothing to reposition.
            return Ok(());
        }
        let rank = end_rank(list, &bucket, true);
        let item = list.item_mut(id).expect("looked up above");
        item.store_id = store_id;
        item.rank = rank;
        return Ok(());
    }

    let rank = position_rank(list, &bucket, dest.before_id.as_deref(), id);
    let item = list.item_mut(id).expect("looked up above");
    item.store_id = store_id;
    item.rank = rank;
    Ok(())
}

/// Keyboard reorder: land before the previous unchecked sibling.
/// The anchor is derived from the live list on every call, never queued.
pub fn move_up(list: &mut ShoppingList, id: &str) -> Result<(), ItemError> {
    let Some((sub, idx)) = unchecked_siblings(list, id)? else {
        return Ok(());
    };
    if idx == 0 {
        return Ok(());
    }
    let before_id = Some(sub[idx - 1].clone());
    move_item(list, id, MoveDestination {
        bucket: None,
        before_id,
    })
}

/// Keyboard reorder: land past the next unchecked sibling. The anchor is
/// the sibling two slots ahead — the item just after the one being
/// swapped — or the end of the list when there is none.
pub fn move_down(list: &mut ShoppingList, id: &str) -> Result<(), ItemError> {
    let Some((sub, idx)) = unchecked_siblings(list, id)? else {
        return Ok(());
    };
    if idx + 1 >= sub.len() {
        return Ok(());
    }
    let before_id = sub.get(idx + 2).cloned();
    move_item(list, id, MoveDestination {
        bucket: None,
        before_id,
    })
}

/// Ids of the item's unchecked sub-list and its index in it.
/// `None` for checked items, which keyboard reordering skips.
fn unchecked_siblings(
    list: &ShoppingList,
    id: &str,
) -> Result<Option<(Vec<String>, usize)>, ItemError> {
    let item = list
        .item(id)
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    if item.checked {
        return Ok(None);
    }
    let bucket = list.bucket_of(item);
    let sub: Vec<String> = list
        .sub_list(&bucket, false)
        .into_iter()
        .map(|i| i.id.clone())
        .collect();
    let idx = sub
        .iter()
        .position(|i| i.as_str() == id)
        .expect("item is in its own sub-list");
    Ok(Some((sub, idx)))
}

/// Rank landing immediately before `before_id` in the bucket's unchecked
/// sub-list, or at the end when the anchor is absent, checked, or in a
/// different bucket. The moving item itself never counts as a neighbor.
fn position_rank(
    list: &ShoppingList,
    bucket: &Bucket,
    before_id: Option<&str>,
    moving_id: &str,
) -> Rank {
    let sub: Vec<&Item> = list
        .sub_list(bucket, false)
        .into_iter()
        .filter(|i| i.id != moving_id)
        .collect();

    match before_id.and_then(|b| sub.iter().position(|i| i.id == b)) {
        Some(idx) => {
            let lo = if idx == 0 { None } else { Some(&sub[idx - 1].rank) };
            Rank::between(lo, Some(&sub[idx].rank))
        }
        None => Rank::between(sub.last().map(|i| &i.rank), None),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Store;
    use crate::ops::item_ops::{AddItemOptions, Candidate, insert_candidate, toggle_checked};

    fn sample_list() -> ShoppingList {
        let mut list = ShoppingList::new();
        for (id, name) in [("s-001", "Kroger"), ("s-002", "Farmers market")] {
            list.stores.push(Store {
                id: id.into(),
                name: name.into(),
            });
        }
        for (name, store) in [
            ("Milk", Some("s-001")),
            ("Bread", Some("s-001")),
            ("Eggs", Some("s-001")),
            ("Peaches", Some("s-002")),
            ("Batteries", None),
        ] {
            insert_candidate(&mut list, Candidate {
                name: name.into(),
                quantity: None,
                options: AddItemOptions {
                    store_id: store.map(str::to_string),
                    ..Default::default()
                },
            });
        }
        list
    }

    fn names(list: &ShoppingList, bucket: &Bucket, checked: bool) -> Vec<String> {
        list.sub_list(bucket, checked)
            .iter()
            .map(|i| i.name.clone())
            .collect()
    }

    fn kroger() -> Bucket {
        Bucket::Store("s-001".into())
    }

    // --- move_item ---

    #[test]
    fn test_move_before_anchor() {
        let mut list = sample_list();
        // Eggs before Milk: Eggs, Milk, Bread
        move_item(&mut list, "i-003", MoveDestination {
            bucket: None,
            before_id: Some("i-001".into()),
        })
        .unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Eggs", "Milk", "Bread"]);
    }

    #[test]
    fn test_move_to_end_with_none_anchor() {
        let mut list = sample_list();
        move_item(&mut list, "i-001", MoveDestination::default()).unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Bread", "Eggs", "Milk"]);
    }

    #[test]
    fn test_move_with_unknown_anchor_appends() {
        let mut list = sample_list();
        move_item(&mut list, "i-001", MoveDestination {
            bucket: None,
            before_id: Some("i-999".into()),
        })
        .unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Bread", "Eggs", "Milk"]);
    }

    #[test]
    fn test_cross_bucket_move_with_anchor() {
        let mut list = sample_list();
        // Batteries to Kroger, before Bread.
        move_item(&mut list, "i-005", MoveDestination {
            bucket: Some(kroger()),
            before_id: Some("i-002".into()),
        })
        .unwrap();
        assert_eq!(
            names(&list, &kroger(), false),
            vec!["Milk", "Batteries", "Bread", "Eggs"]
        );
        assert_eq!(names(&list, &Bucket::Unassigned, false), Vec::<String>::new());
        assert_eq!(list.item("i-005").unwrap().store_id.as_deref(), Some("s-001"));
    }

    #[test]
    fn test_move_to_unassigned() {
        let mut list = sample_list();
        move_item(&mut list, "i-001", MoveDestination {
            bucket: Some(Bucket::Unassigned),
            before_id: None,
        })
        .unwrap();
        assert_eq!(
            names(&list, &Bucket::Unassigned, false),
            vec!["Batteries", "Milk"]
        );
        assert_eq!(list.item("i-001").unwrap().store_id, None);
    }

    #[test]
    fn test_anchor_in_other_bucket_appends() {
        let mut list = sample_list();
        // Anchor lives at the farmers market; moving within Kroger.
        move_item(&mut list, "i-001", MoveDestination {
            bucket: None,
            before_id: Some("i-004".into()),
        })
        .unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Bread", "Eggs", "Milk"]);
    }

    #[test]
    fn test_checked_anchor_is_ignored() {
        let mut list = sample_list();
        toggle_checked(&mut list, "i-002").unwrap();
        // Bread is checked now; using it as an anchor falls back to append.
        move_item(&mut list, "i-001", MoveDestination {
            bucket: None,
            before_id: Some("i-002".into()),
        })
        .unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Eggs", "Milk"]);
    }

    #[test]
    fn test_checked_item_changes_bucket_only() {
        let mut list = sample_list();
        toggle_checked(&mut list, "i-004").unwrap();
        move_item(&mut list, "i-004", MoveDestination {
            bucket: Some(kroger()),
            before_id: Some("i-001".into()),
        })
        .unwrap();
        // Landed in Kroger's checked sub-list; the anchor did nothing.
        assert_eq!(names(&list, &kroger(), true), vec!["Peaches"]);
        assert_eq!(names(&list, &kroger(), false), vec!["Milk", "Bread", "Eggs"]);
    }

    #[test]
    fn test_checked_item_same_bucket_holds_slot() {
        let mut list = sample_list();
        toggle_checked(&mut list, "i-001").unwrap();
        toggle_checked(&mut list, "i-002").unwrap();
        let before = list.clone();
        move_item(&mut list, "i-001", MoveDestination::default()).unwrap();
        assert_eq!(list, before);
    }

    #[test]
    fn test_move_to_dangling_store_displays_unassigned() {
        let mut list = sample_list();
        move_item(&mut list, "i-001", MoveDestination {
            bucket: Some(Bucket::Store("s-404".into())),
            before_id: None,
        })
        .unwrap();
        let item = list.item("i-001").unwrap();
        assert_eq!(item.store_id.as_deref(), Some("s-404"));
        assert_eq!(
            names(&list, &Bucket::Unassigned, false),
            vec!["Batteries", "Milk"]
        );
    }

    #[test]
    fn test_move_missing_item() {
        let mut list = sample_list();
        let result = move_item(&mut list, "i-999", MoveDestination::default());
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[test]
    fn test_swap_pair_terminates_and_orders() {
        let mut list = sample_list();
        // A before B, then B before A: each call reads a fresh order, so
        // the pair just swaps twice.
        move_item(&mut list, "i-001", MoveDestination {
            bucket: None,
            before_id: Some("i-002".into()),
        })
        .unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Milk", "Bread", "Eggs"]);
        move_item(&mut list, "i-002", MoveDestination {
            bucket: None,
            before_id: Some("i-001".into()),
        })
        .unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Bread", "Milk", "Eggs"]);
    }

    // --- keyboard moves ---

    #[test]
    fn test_move_up() {
        let mut list = sample_list();
        move_up(&mut list, "i-002").unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Bread", "Milk", "Eggs"]);
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let mut list = sample_list();
        move_up(&mut list, "i-001").unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Milk", "Bread", "Eggs"]);
    }

    #[test]
    fn test_move_down() {
        let mut list = sample_list();
        move_down(&mut list, "i-001").unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Bread", "Milk", "Eggs"]);
    }

    #[test]
    fn test_move_down_to_end() {
        let mut list = sample_list();
        // Bread is second of three; two slots ahead is past the end.
        move_down(&mut list, "i-002").unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Milk", "Eggs", "Bread"]);
    }

    #[test]
    fn test_move_down_at_bottom_is_noop() {
        let mut list = sample_list();
        move_down(&mut list, "i-003").unwrap();
        assert_eq!(names(&list, &kroger(), false), vec!["Milk", "Bread", "Eggs"]);
    }

    #[test]
    fn test_keyboard_move_skips_checked() {
        let mut list = sample_list();
        toggle_checked(&mut list, "i-001").unwrap();
        let before = list.clone();
        move_up(&mut list, "i-001").unwrap();
        move_down(&mut list, "i-001").unwrap();
        assert_eq!(list, before);
    }

    #[test]
    fn test_repeated_moves_stay_consistent() {
        let mut list = sample_list();
        for _ in 0..20 {
            move_up(&mut list, "i-003").unwrap();
            move_up(&mut list, "i-003").unwrap();
            move_down(&mut list, "i-003").unwrap();
            move_down(&mut list, "i-003").unwrap();
        }
        assert_eq!(names(&list, &kroger(), false), vec!["Milk", "Bread", "Eggs"]);
    }
}
