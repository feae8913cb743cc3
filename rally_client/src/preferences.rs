//! Locally remembered setup choices

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Somewhere to keep one JSON document between sessions
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, json: String);
}

/// Store that lives as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.json.clone()
    }

    fn save(&mut self, json: String) {
        self.json = Some(json);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub player_name: Option<String>,
    pub difficulty: Option<String>,
}

impl Preferences {
    /// Read preferences, treating unreadable data as empty
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let Some(json) = store.load() else {
            return Self::default();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable preferences: {e}");
            Self::default()
        })
    }

    pub fn save(&self, store: &mut dyn PreferenceStore) -> Result<(), ClientError> {
        store.save(serde_json::to_string(self)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_gives_defaults() {
        assert_eq!(Preferences::load(&MemoryStore::new()), Preferences::default());
    }

    #[test]
    fn test_saved_preferences_load_back() {
        let mut store = MemoryStore::new();
        let prefs = Preferences {
            player_name: Some("Ana".to_string()),
            difficulty: Some("hard".to_string()),
        };
        prefs.save(&mut store).unwrap();
        assert_eq!(Preferences::load(&store), prefs);
    }

    #[test]
    fn test_corrupt_store_gives_defaults() {
        let mut store = MemoryStore::new();
        store.save("{not json".to_string());
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn test_missing_fields_default() {
        let mut store = MemoryStore::new();
        store.save(r#"{"difficulty":"easy"}"#.to_string());
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.player_name, None);
        assert_eq!(prefs.difficulty.as_deref(), Some("easy"));
    }
}
