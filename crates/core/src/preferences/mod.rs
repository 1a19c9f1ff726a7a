//! Persisted board preferences.
//!
//! The grouping and sorting options are kept as two string values in a
//! key-value store. They are read once at startup and written back whenever
//! they change. Values that no longer parse fall back to the defaults.

mod sqlite_store;

pub use sqlite_store::SqlitePreferenceStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::board::{GroupKey, SortKey};

/// Store key for the grouping option.
pub const GROUPING_KEY: &str = "groupingOption";

/// Store key for the sorting option.
pub const SORTING_KEY: &str = "sortingOption";

/// Error type for preference storage.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for PreferenceError {
    fn from(e: rusqlite::Error) -> Self {
        PreferenceError::Database(e.to_string())
    }
}

/// Trait for key-value preference storage backends.
pub trait PreferenceStore: Send + Sync {
    /// Read a stored value.
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// The user's current board selections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub grouping: GroupKey,
    pub sorting: SortKey,
}

/// Partial change to [`Preferences`]; absent fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    #[serde(default)]
    pub grouping: Option<GroupKey>,
    #[serde(default)]
    pub sorting: Option<SortKey>,
}

impl Preferences {
    pub fn new(grouping: GroupKey, sorting: SortKey) -> Self {
        Self { grouping, sorting }
    }

    /// Read preferences from `store`, using defaults for missing or
    /// unrecognized values.
    pub fn load(store: &dyn PreferenceStore) -> Result<Self, PreferenceError> {
        let defaults = Self::default();

        let grouping = match store.get(GROUPING_KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored {}: {}", GROUPING_KEY, e);
                defaults.grouping
            }),
            None => defaults.grouping,
        };

        let sorting = match store.get(SORTING_KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored {}: {}", SORTING_KEY, e);
                defaults.sorting
            }),
            None => defaults.sorting,
        };

        Ok(Self { grouping, sorting })
    }

    /// Write both values to `store`.
    pub fn save(&self, store: &dyn PreferenceStore) -> Result<(), PreferenceError> {
        store.set(GROUPING_KEY, self.grouping.as_str())?;
        store.set(SORTING_KEY, self.sorting.as_str())?;
        Ok(())
    }

    /// Return a copy with `update` applied.
    pub fn with_update(self, update: PreferencesUpdate) -> Self {
        Self {
            grouping: update.grouping.unwrap_or(self.grouping),
            sorting: update.sorting.unwrap_or(self.sorting),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_status_and_priority() {
        let prefs = Preferences::default();
        assert_eq!(prefs.grouping, GroupKey::Status);
        assert_eq!(prefs.sorting, SortKey::Priority);
    }

    #[test]
    fn test_load_from_empty_store_uses_defaults() {
        let store = SqlitePreferenceStore::in_memory().unwrap();
        let prefs = Preferences::load(&store).unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let store = SqlitePreferenceStore::in_memory().unwrap();
        let prefs = Preferences::new(GroupKey::User, SortKey::Title);

        prefs.save(&store).unwrap();

        assert_eq!(store.get(GROUPING_KEY).unwrap().as_deref(), Some("user"));
        assert_eq!(store.get(SORTING_KEY).unwrap().as_deref(), Some("title"));
        assert_eq!(Preferences::load(&store).unwrap(), prefs);
    }

    #[test]
    fn test_unrecognized_stored_values_fall_back() {
        let store = SqlitePreferenceStore::in_memory().unwrap();
        store.set(GROUPING_KEY, "assignee").unwrap();
        store.set(SORTING_KEY, "title").unwrap();

        let prefs = Preferences::load(&store).unwrap();

        assert_eq!(prefs.grouping, GroupKey::Status);
        assert_eq!(prefs.sorting, SortKey::Title);
    }

    #[test]
    fn test_with_update_only_touches_given_fields() {
        let prefs = Preferences::new(GroupKey::Priority, SortKey::Title);

        let updated = prefs.with_update(PreferencesUpdate {
            grouping: Some(GroupKey::User),
            sorting: None,
        });

        assert_eq!(updated, Preferences::new(GroupKey::User, SortKey::Title));
        assert_eq!(prefs.with_update(PreferencesUpdate::default()), prefs);
    }

    #[test]
    fn test_update_deserializes_lowercase_names() {
        let update: PreferencesUpdate = serde_json::from_str(r#"{"sorting":"title"}"#).unwrap();
        assert_eq!(update.sorting, Some(SortKey::Title));
        assert!(update.grouping.is_none());

        let bad: Result<PreferencesUpdate, _> = serde_json::from_str(r#"{"grouping":"team"}"#);
        assert!(bad.is_err());
    }
}
