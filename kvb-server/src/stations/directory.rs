//! Station name → id directory.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::error::StationError;

/// KVB station id, as used in the operator's timetable URLs.
pub type StationId = u32;

/// Immutable station name ↔ id lookup.
///
/// Loaded once at startup from a JSON object of the form
/// `{"Drehbrücke": 46, ...}` and never mutated afterwards; if the
/// upstream adds stations, a restart is required. Safe to share across
/// request handlers behind an `Arc`.
#[derive(Debug)]
pub struct StationDirectory {
    /// Original-case names, in deterministic (sorted) iteration order.
    stations: BTreeMap<String, StationId>,
    /// Lowercased names for case-insensitive lookup.
    by_lower: HashMap<String, StationId>,
    /// Inverse mapping, id → original-case name.
    by_id: HashMap<StationId, String>,
}

impl StationDirectory {
    /// Load the directory from a JSON file.
    ///
    /// Any IO or JSON failure is an unrecoverable startup error, not a
    /// per-request error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let contents = std::fs::read_to_string(path)?;
        let stations: BTreeMap<String, StationId> =
            serde_json::from_str(&contents).map_err(|e| StationError::Json {
                message: e.to_string(),
            })?;
        Ok(Self::from_map(stations))
    }

    /// Build a directory from an in-memory table.
    pub fn from_map(stations: BTreeMap<String, StationId>) -> Self {
        let by_lower = stations
            .iter()
            .map(|(name, &id)| (name.to_lowercase(), id))
            .collect();
        let by_id = stations
            .iter()
            .map(|(name, &id)| (id, name.clone()))
            .collect();
        Self {
            stations,
            by_lower,
            by_id,
        }
    }

    /// Look up a station id by name, case-insensitively.
    pub fn by_name(&self, name: &str) -> Option<StationId> {
        self.by_lower.get(&name.to_lowercase()).copied()
    }

    /// Look up the canonical station name for an id.
    pub fn by_id(&self, id: StationId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// The full name → id table, original-case keys, sorted by name.
    pub fn all(&self) -> &BTreeMap<String, StationId> {
        &self.stations
    }

    /// Number of stations in the directory.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the directory holds no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn directory() -> StationDirectory {
        StationDirectory::from_map(BTreeMap::from([
            ("Drehbrücke".to_string(), 46),
            ("Neumarkt".to_string(), 2),
            ("Porz Markt".to_string(), 177),
        ]))
    }

    #[test]
    fn by_name_is_case_insensitive() {
        let dir = directory();
        assert_eq!(dir.by_name("neumarkt"), Some(2));
        assert_eq!(dir.by_name("NEUMARKT"), Some(2));
        assert_eq!(dir.by_name("drehbrücke"), Some(46));
    }

    #[test]
    fn by_name_unknown_is_none() {
        assert_eq!(directory().by_name("atlantis"), None);
    }

    #[test]
    fn by_id_returns_original_case() {
        let dir = directory();
        assert_eq!(dir.by_id(46), Some("Drehbrücke"));
        assert_eq!(dir.by_id(999), None);
    }

    #[test]
    fn all_keeps_original_case_and_sorted_order() {
        let dir = directory();
        let names: Vec<&str> = dir.all().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Drehbrücke", "Neumarkt", "Porz Markt"]);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Drehbrücke": 46, "Neumarkt": 2}}"#).unwrap();

        let dir = StationDirectory::load(file.path()).unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.by_name("drehbrücke"), Some(46));
    }

    #[test]
    fn load_missing_file_fails() {
        let err = StationDirectory::load("/nonexistent/stations.json").unwrap_err();
        assert!(matches!(err, StationError::Io(_)));
    }

    #[test]
    fn load_malformed_json_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Drehbrücke": "not a number"}}"#).unwrap();

        let err = StationDirectory::load(file.path()).unwrap_err();
        assert!(matches!(err, StationError::Json { .. }));
    }
}
