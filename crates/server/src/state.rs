use std::sync::Arc;

use kanban_core::{
    BoardSession, Config, PreferenceError, PreferenceStore, Preferences, PreferencesUpdate,
};
use tokio::sync::RwLock;

/// Shared application state
pub struct AppState {
    config: Config,
    session: Arc<BoardSession>,
    preference_store: Arc<dyn PreferenceStore>,
    preferences: RwLock<Preferences>,
}

impl AppState {
    pub fn new(
        config: Config,
        session: Arc<BoardSession>,
        preference_store: Arc<dyn PreferenceStore>,
        preferences: Preferences,
    ) -> Self {
        Self {
            config,
            session,
            preference_store,
            preferences: RwLock::new(preferences),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &BoardSession {
        self.session.as_ref()
    }

    /// Current board preferences.
    pub async fn preferences(&self) -> Preferences {
        *self.preferences.read().await
    }

    /// Apply a change and persist the result.
    pub async fn update_preferences(
        &self,
        update: PreferencesUpdate,
    ) -> Result<Preferences, PreferenceError> {
        let mut current = self.preferences.write().await;
        let updated = current.with_update(update);
        updated.save(self.preference_store.as_ref())?;
        *current = updated;
        Ok(updated)
    }
}
