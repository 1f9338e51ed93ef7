use serde::{Deserialize, Serialize};

/// Digits used in rank keys, in sort order.
const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Lexicographic rank key ordering items within a bucket's sub-list.
///
/// Keys are strings over `[0-9a-z]` that never end in `0`. Between any two
/// keys a new key can be generated that sorts strictly between them, so a
/// move writes only the moved item — neighbors are never renumbered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(String);

impl Rank {
    /// Generate a key strictly between `lo` and `hi`.
    ///
    /// `None` bounds are open: `(None, None)` seeds an empty sub-list,
    /// `(Some(last), None)` appends, `(None, Some(first))` prepends.
    /// If `lo` equals `hi` (possible when concurrent writers mint the same
    /// key) the result sorts immediately after both; the `(rank, id)` sort
    /// used everywhere keeps display order total either way.
    pub fn between(lo: Option<&Rank>, hi: Option<&Rank>) -> Rank {
        let lo = lo.map(|r| r.0.as_str()).unwrap_or("");
        let hi = hi.map(|r| r.0.as_str());
        Rank(midpoint(lo, hi))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn digit_value(c: u8) -> usize {
    DIGITS.iter().position(|&d| d == c).unwrap_or(0)
}

/// Key strictly between `lo` and `hi`, where `None` is an open upper bound.
fn midpoint(lo: &str, hi: Option<&str>) -> String {
    // A shared prefix is carried over verbatim.
    if let Some(hi_s) = hi {
        let common = lo
            .bytes()
            .zip(hi_s.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        if common > 0 {
            return format!(
                "{}{}",
                &hi_s[..common],
                midpoint(&lo[common..], Some(&hi_s[common..]))
            );
        }
    }

    let d_lo = lo.bytes().next().map(digit_value).unwrap_or(0);
    let d_hi = hi
        .and_then(|h| h.bytes().next())
        .map(digit_value)
        .unwrap_or(DIGITS.len());

    if d_hi > d_lo + 1 {
        let mid = (d_lo + d_hi) / 2;
        return (DIGITS[mid] as char).to_string();
    }

    if d_hi == d_lo {
        // Only reachable with an empty `lo` against a `hi` starting in '0':
        // pin the digit and descend into `hi`.
        let rest = hi.map(|h| &h[1..]).unwrap_or("");
        return format!("0{}", midpoint("", Some(rest)));
    }

    // Consecutive digits: keep lo's digit and go deeper with an open top.
    let rest = if lo.is_empty() { "" } else { &lo[1..] };
    format!("{}{}", DIGITS[d_lo] as char, midpoint(rest, None))
}
