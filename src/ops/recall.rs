use std::collections::VecDeque;

/// How many recently removed names are offered for re-add.
pub const RECALL_LIMIT: usize = 8;

/// Bounded history of recently removed item names, newest first.
///
/// Re-adding a name goes back through the normal parse → duplicate →
/// insert pipeline; nothing here bypasses those checks.
#[derive(Debug, Clone, Default)]
pub struct RecallBuffer {
    names: VecDeque<String>,
}

impl RecallBuffer {
    pub fn new() -> RecallBuffer {
        RecallBuffer::default()
    }

    /// Build from a stored history, consuming at most the first
    /// [`RECALL_LIMIT`] names.
    pub fn from_names<I, S>(names: I) -> RecallBuffer
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecallBuffer {
            names: names
                .into_iter()
                .take(RECALL_LIMIT)
                .map(Into::into)
                .collect(),
        }
    }

    /// Record a removal. Newest first; an existing entry with the same
    /// name (ignoring case) moves to the front instead of duplicating.
    pub fn record(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let lower = name.to_lowercase();
        self.names.retain(|n| n.to_lowercase() != lower);
        self.names.push_front(name.to_string());
        self.names.truncate(RECALL_LIMIT);
    }

    /// Remove and return a name for re-add.
    pub fn take(&mut self, name: &str) -> Option<String> {
        let lower = name.trim().to_lowercase();
        let idx = self.names.iter().position(|n| n.to_lowercase() == lower)?;
        self.names.remove(idx)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Snapshot for persisting back into the document.
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut buf = RecallBuffer::new();
        buf.record("Milk");
        buf.record("Bread");
        let names: Vec<&str> = buf.names().collect();
        assert_eq!(names, vec!["Bread", "Milk"]);
    }

    #[test]
    fn test_bounded_at_limit() {
        let mut buf = RecallBuffer::new();
        for n in 0..20 {
            buf.record(&format!("item {}", n));
        }
        assert_eq!(buf.len(), RECALL_LIMIT);
        // Oldest entries fell off the end.
        assert_eq!(buf.names().next(), Some("item 19"));
        assert!(buf.names().all(|n| n != "item 0"));
    }

    #[test]
    fn test_from_names_takes_first_eight() {
        let stored: Vec<String> = (0..12).map(|n| format!("item {}", n)).collect();
        let buf = RecallBuffer::from_names(stored);
        assert_eq!(buf.len(), RECALL_LIMIT);
        assert_eq!(buf.names().last(), Some("item 7"));
    }

    #[test]
    fn test_record_dedups_ignoring_case() {
        let mut buf = RecallBuffer::new();
        buf.record("Milk");
        buf.record("Bread");
        buf.record("milk");
        let names: Vec<&str> = buf.names().collect();
        assert_eq!(names, vec!["milk", "Bread"]);
    }

    #[test]
    fn test_take_removes_entry() {
        let mut buf = RecallBuffer::new();
        buf.record("Milk");
        buf.record("Bread");
        assert_eq!(buf.take("MILK").as_deref(), Some("Milk"));
        assert_eq!(buf.take("Milk"), None);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn test_blank_names_ignored() {
        let mut buf = RecallBuffer::new();
        buf.record("   ");
        assert!(buf.is_empty());
    }
}
