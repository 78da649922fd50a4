//! Per-user dashboard state between two interactions.

use crate::localities::locality_index::LocalityIndex;
use crate::localities::locality_table::{LocalityRecord, LocalitySelection};

/// The coordinate text and locality selection of one dashboard session.
///
/// Values are immutable: every update returns a new state with the version
/// incremented, so the UI layer can tell stale state apart. A failed
/// submission never touches the state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    version: u64,
    coordinates: String,
    selection: LocalitySelection,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Current coordinate text, as shown in the input box.
    pub fn coordinates(&self) -> &str {
        &self.coordinates
    }

    pub fn selection(&self) -> &LocalitySelection {
        &self.selection
    }

    /// Locality names of the current selection.
    pub fn index(&self) -> LocalityIndex {
        self.selection.index()
    }

    /// Replaces the coordinate text, keeping the selection.
    pub fn with_coordinates(&self, text: impl Into<String>) -> Self {
        Self {
            version: self.version + 1,
            coordinates: text.into(),
            selection: self.selection.clone(),
        }
    }

    /// Replaces the selection and regenerates the coordinate text from it.
    pub fn with_selection(&self, records: Vec<LocalityRecord>) -> Self {
        let selection = LocalitySelection::new(records);
        Self {
            version: self.version + 1,
            coordinates: selection.coordinate_text(),
            selection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::coordinate::CoordinatePair;

    fn record(name: &str, lat: &str, lon: &str) -> LocalityRecord {
        LocalityRecord {
            name: name.to_string(),
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            region: Some("Centre".to_string()),
            country: Some("Cameroun".to_string()),
            altitude: None,
        }
    }

    #[test]
    fn test_updates_bump_version() {
        let initial = SessionState::new();
        let typed = initial.with_coordinates("6.8399,13.2509");
        assert_eq!(initial.version(), 0);
        assert_eq!(initial.coordinates(), "");
        assert_eq!(typed.version(), 1);
        assert_eq!(typed.coordinates(), "6.8399,13.2509");
    }

    #[test]
    fn test_selection_regenerates_text() {
        let state = SessionState::new()
            .with_coordinates("1,2")
            .with_selection(vec![
                record("Yaoundé", "3.8480", "11.5021"),
                record("Vide", "", "9.0"),
                record("Bafia", "4.7500", "11.2333"),
            ]);
        assert_eq!(state.version(), 2);
        assert_eq!(state.coordinates(), "3.8480,11.5021, 4.7500,11.2333");
        assert_eq!(state.selection().records().len(), 2);
        assert_eq!(
            state.index().lookup(&CoordinatePair::new("4.7500", "11.2333")),
            "Bafia"
        );

        // Editing the text afterwards keeps the selection.
        let edited = state.with_coordinates("4.7500,11.2333");
        assert_eq!(edited.selection(), state.selection());
    }
}
