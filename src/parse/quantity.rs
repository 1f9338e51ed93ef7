use std::sync::LazyLock;

use regex::Regex;

/// A quantity text split into an amount and an optional unit word.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    pub amount: f64,
    pub unit: Option<String>,
}

static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?<amount>\d+(?:\.\d+)?)\s*(?<unit>[a-z]+)?$").expect("valid regex")
});

/// Best-effort split of a free-text quantity into number + unit word.
///
/// Returns `None` for anything that is not a single number optionally
/// followed by a single word ("a few", "2 large cans"). Quantities stay
/// free text everywhere; this exists only so the merge policy can add
/// matching requests together.
pub fn parse_quantity(text: &str) -> Option<ParsedQuantity> {
    let caps = QUANTITY.captures(text.trim())?;
    let amount: f64 = caps["amount"].parse().ok()?;
    let unit = caps.name("unit").map(|m| m.as_str().to_string());
    Some(ParsedQuantity { amount, unit })
}

/// Do two unit words name the same unit? Case is ignored and a plural `s`
/// is folded ("lb" == "LBS"); nothing is ever converted between units.
pub fn units_match(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => unit_key(a) == unit_key(b),
        _ => false,
    }
}

fn unit_key(unit: &str) -> String {
    let lower = unit.to_lowercase();
    match lower.strip_suffix('s') {
        // "lbs" folds to "lb", but bare "s" stays itself
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => lower,
    }
}

/// Format an amount without a trailing `.0`.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}
