use crate::localities::locality_table::LocalityRecord;
use crate::types::coordinate::CoordinatePair;
use std::collections::HashMap;

/// Name returned for a coordinate that is not in the index.
pub const UNKNOWN_LOCALITY: &str = "N/A";

/// Maps the exact coordinate tokens of the selected localities to their names.
///
/// Keys are the string tokens, not parsed numbers: `("3.8480", "11.5021")` and
/// `("3.848", "11.5021")` are different keys. When two records share a
/// coordinate, the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalityIndex {
    names: HashMap<CoordinatePair, String>,
}

impl LocalityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a LocalityRecord>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.insert(record.coordinate(), record.name.clone());
        }
        index
    }

    pub fn insert(&mut self, pair: CoordinatePair, name: impl Into<String>) {
        self.names.insert(pair, name.into());
    }

    /// Returns the locality name for `pair`, or [`UNKNOWN_LOCALITY`].
    pub fn lookup(&self, pair: &CoordinatePair) -> &str {
        self.names
            .get(pair)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LOCALITY)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit_and_miss() {
        let mut index = LocalityIndex::new();
        index.insert(CoordinatePair::new("3.8480", "11.5021"), "Yaoundé");

        assert_eq!(
            index.lookup(&CoordinatePair::new("3.8480", "11.5021")),
            "Yaoundé"
        );
        assert_eq!(index.lookup(&CoordinatePair::new("4.0511", "9.7679")), "N/A");
        // Token text must match exactly.
        assert_eq!(index.lookup(&CoordinatePair::new("3.848", "11.5021")), "N/A");
    }

    #[test]
    fn test_later_record_wins() {
        let mut index = LocalityIndex::new();
        index.insert(CoordinatePair::new("1", "2"), "First");
        index.insert(CoordinatePair::new("1", "2"), "Second");
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup(&CoordinatePair::new("1", "2")), "Second");
    }
}
