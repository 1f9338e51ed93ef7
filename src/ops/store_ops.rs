use crate::model::{ShoppingList, Store};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store not found: {0}")]
    NotFound(String),
}

/// Add a store at the end of the display order. Returns its id.
pub fn add_store(list: &mut ShoppingList, name: impl Into<String>) -> String {
    let id = list.next_store_id();
    list.stores.push(Store {
        id: id.clone(),
        name: name.into(),
    });
    id
}

pub fn rename_store(list: &mut ShoppingList, id: &str, name: String) -> Result<(), StoreError> {
    let store = list
        .stores
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
    store.name = name;
    Ok(())
}

/// Remove a store. Its items are left in place; with the store gone their
/// reference dangles and they display under the unassigned group.
pub fn delete_store(list: &mut ShoppingList, id: &str) -> Result<Store, StoreError> {
    let idx = list
        .stores
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
    Ok(list.stores.remove(idx))
}
