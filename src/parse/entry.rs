use std::sync::LazyLock;

use regex::Regex;

/// A raw text entry split into a display name and an optional quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub name: String,
    pub quantity: Option<String>,
}

/// Unit words accepted after a trailing number. Longer spellings come
/// first so the whole word is consumed.
const TRAILING_UNITS: &str = "lbs|lb|oz|g|kg|cups|cup|gallons|gallon|liters|liter|pints|pint|\
quarts|quart|dozen|pack|bunch|bag|box|can|jar|bottle|ct|count|pcs|pc|pieces|piece|\
slices|slice|servings|serving";

/// Count words accepted after a leading number.
const LEADING_UNITS: &str = "dozen|pack|bunch|bag|box|can|jar|bottle|ct|count";

/// `Milk (2 gallons)`
static PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?<name>.*\S)\s*\((?<qty>[^()]*)\)$").expect("valid regex"));

/// `Eggs x12`, `Eggs x 12`
static X_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?<name>.*\S)\s+x\s?(?<qty>\d+(?:\.\d+)?)$").expect("valid regex")
});

/// `Apples 2 lbs`, `Apples 2`
static TRAILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?<name>.*\S)\s+(?<qty>\d+(?:\.\d+)?(?:\s*(?:{TRAILING_UNITS}))?)$"
    ))
    .expect("valid regex")
});

/// `3 onions`, `2 dozen eggs`
static LEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?<qty>\d+(?:\.\d+)?(?:\s+(?:{LEADING_UNITS}))?)\s+(?<name>.+)$"
    ))
    .expect("valid regex")
});

/// Split a raw entry into name and quantity.
///
/// Patterns are tried in a fixed priority order — parenthetical suffix,
/// `x`-count suffix, trailing number with optional unit, leading number
/// with optional count word — so ambiguous input resolves the same way
/// every time. Anything that matches nothing is all name. Empty input
/// yields an empty name; callers treat that as "nothing to add".
pub fn parse_entry(input: &str) -> ParsedEntry {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ParsedEntry {
            name: String::new(),
            quantity: None,
        };
    }

    if let Some(caps) = PAREN.captures(trimmed) {
        let qty = caps["qty"].trim();
        if !qty.is_empty() {
            return entry(caps["name"].trim(), qty);
        }
    }

    if let Some(caps) = X_COUNT.captures(trimmed) {
        return entry(caps["name"].trim(), &caps["qty"]);
    }

    if let Some(caps) = TRAILING.captures(trimmed) {
        return entry(caps["name"].trim(), &caps["qty"]);
    }

    if let Some(caps) = LEADING.captures(trimmed) {
        return entry(caps["name"].trim(), &caps["qty"]);
    }

    ParsedEntry {
        name: trimmed.to_string(),
        quantity: None,
    }
}

fn entry(name: &str, quantity: &str) -> ParsedEntry {
    ParsedEntry {
        name: name.to_string(),
        quantity: Some(quantity.to_string()),
    }
}
