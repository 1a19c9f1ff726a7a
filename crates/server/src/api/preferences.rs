//! Preference API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use kanban_core::{Preferences, PreferencesUpdate};
use tracing::{error, info};

use super::board::ErrorResponse;
use crate::state::AppState;

/// GET /api/v1/preferences
pub async fn get_preferences(State(state): State<Arc<AppState>>) -> Json<Preferences> {
    Json(state.preferences().await)
}

/// PUT /api/v1/preferences
///
/// Change the grouping and/or sorting option and persist the result.
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Json(update): Json<PreferencesUpdate>,
) -> Result<Json<Preferences>, (StatusCode, Json<ErrorResponse>)> {
    match state.update_preferences(update).await {
        Ok(preferences) => {
            info!(
                "Preferences updated: grouping={}, sorting={}",
                preferences.grouping, preferences.sorting
            );
            Ok(Json(preferences))
        }
        Err(e) => {
            error!("Failed to persist preferences: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
