use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::model::{Item, MealSource, ShoppingList, Store};
use crate::ops::sections::Section;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemJson {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub checked: bool,
    pub organic_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meal_sources: Vec<MealSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    pub title: String,
    pub items: Vec<ItemJson>,
}

#[derive(Serialize)]
pub struct StoreJson {
    pub id: String,
    pub name: String,
}

pub fn item_to_json(item: &Item) -> ItemJson {
    ItemJson {
        id: item.id.clone(),
        name: item.name.clone(),
        quantity: item.quantity.clone(),
        category: item.category.clone(),
        checked: item.checked,
        organic_required: item.organic_required,
        store_id: item.store_id.clone(),
        meal_sources: item.meal_sources.clone(),
        added: item.added.clone(),
    }
}

pub fn section_to_json(section: &Section) -> SectionJson {
    SectionJson {
        store_id: section.bucket.store_id().map(str::to_string),
        title: section.title().to_string(),
        items: section.items.iter().map(|i| item_to_json(i)).collect(),
    }
}

pub fn store_to_json(store: &Store) -> StoreJson {
    StoreJson {
        id: store.id.clone(),
        name: store.name.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format one item as a one-line summary.
/// `name_width` aligns the quantity column across a whole listing.
pub fn format_item_line(item: &Item, name_width: usize) -> String {
    let check = if item.checked { 'x' } else { ' ' };
    let mut line = format!("[{}] {}  {}", check, item.id, pad(&item.name, name_width));

    if let Some(qty) = &item.quantity {
        line.push_str(&format!("  {}", qty));
    }
    if item.organic_required {
        line.push_str(" [org]");
    }
    match item.meal_sources.len() {
        0 => {}
        1 => line.push_str(&format!("  ({})", item.meal_sources[0].meal_name)),
        n => line.push_str(&format!("  ({} meals)", n)),
    }
    line.trim_end().to_string()
}

/// Format a whole section: header, unchecked run, checked run.
pub fn format_section(section: &Section, name_width: usize) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", section.title())];
    if section.is_empty() {
        lines.push("  (empty)".to_string());
        return lines;
    }
    for item in &section.items {
        lines.push(format!("  {}", format_item_line(item, name_width)));
    }
    lines
}

/// Format the full grouped listing.
pub fn format_sections(sections: &[Section]) -> Vec<String> {
    let name_width = sections
        .iter()
        .flat_map(|s| s.items.iter())
        .map(|i| i.name.width())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (n, section) in sections.iter().enumerate() {
        if n > 0 {
            lines.push(String::new());
        }
        lines.extend(format_section(section, name_width));
    }
    lines
}

/// Format the detailed single-item view.
pub fn format_item_detail(item: &Item, list: &ShoppingList) -> Vec<String> {
    let check = if item.checked { 'x' } else { ' ' };
    let mut lines = vec![format!("[{}] {} {}", check, item.id, item.name)];

    if let Some(qty) = &item.quantity {
        lines.push(format!("quantity: {}", qty));
    }
    if let Some(category) = &item.category {
        lines.push(format!("category: {}", category));
    }
    match item.store_id.as_deref().and_then(|sid| list.store(sid)) {
        Some(store) => lines.push(format!("store: {} ({})", store.name, store.id)),
        None => lines.push("store: unassigned".to_string()),
    }
    if item.organic_required {
        lines.push("organic: required".to_string());
    }
    if let Some(added) = &item.added {
        lines.push(format!("added: {}", added));
    }
    if !item.meal_sources.is_empty() {
        lines.push("meals:".to_string());
        for source in &item.meal_sources {
            lines.push(format!("  {} — {}", source.meal_name, source.date));
        }
    }
    lines
}

/// Pad a name to `width` display columns.
fn pad(name: &str, width: usize) -> String {
    let padding = width.saturating_sub(name.width());
    format!("{}{}", name, " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rank;

    fn item(name: &str, quantity: Option<&str>) -> Item {
        let mut item = Item::new("i-001", name, Rank::between(None, None));
        item.quantity = quantity.map(str::to_string);
        item
    }

    #[test]
    fn test_item_line_basic() {
        let line = format_item_line(&item("Milk", Some("2 gallons")), 4);
        assert_eq!(line, "[ ] i-001  Milk  2 gallons");
    }

    #[test]
    fn test_item_line_checked_and_organic() {
        let mut it = item("Milk", None);
        it.checked = true;
        it.organic_required = true;
        let line = format_item_line(&it, 4);
        assert_eq!(line, "[x] i-001  Milk [org]");
    }

    #[test]
    fn test_item_line_meal_sources() {
        let mut it = item("Tortillas", None);
        it.meal_sources.push(MealSource {
            meal_id: "m-001".into(),
            meal_name: "Tacos".into(),
            date: "2026-08-04".into(),
        });
        let line = format_item_line(&it, 9);
        assert_eq!(line, "[ ] i-001  Tortillas  (Tacos)");
    }

    #[test]
    fn test_padding_aligns_quantities() {
        let line = format_item_line(&item("Jam", Some("1 jar")), 9);
        assert_eq!(line, "[ ] i-001  Jam        1 jar");
    }
}
