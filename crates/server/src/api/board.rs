//! Board API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use kanban_core::{
    BoardData, BoardStatus, BoardView, GroupKey, GroupedBuckets, KeyParseError, Preferences,
    SessionError, SortKey,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Query parameters for reading the board.
///
/// Absent values fall back to the stored preferences; overrides are not
/// persisted.
#[derive(Debug, Default, Deserialize)]
pub struct BoardQueryParams {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response for a refresh that failed.
#[derive(Debug, Serialize)]
pub struct RefreshErrorResponse {
    pub error: String,
    pub status: BoardStatus,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn bad_request(e: KeyParseError) -> ApiError {
    error(StatusCode::BAD_REQUEST, e.to_string())
}

fn session_error(e: SessionError) -> ApiError {
    let status = match &e {
        SessionError::NotLoaded | SessionError::LoadFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        SessionError::Load(_) => StatusCode::BAD_GATEWAY,
    };
    error(status, e.to_string())
}

/// Resolve the effective preferences for a request.
async fn resolve_preferences(
    state: &AppState,
    params: &BoardQueryParams,
) -> Result<Preferences, ApiError> {
    let mut preferences = state.preferences().await;
    if let Some(group) = params.group.as_deref() {
        preferences.grouping = group.parse::<GroupKey>().map_err(bad_request)?;
    }
    if let Some(sort) = params.sort.as_deref() {
        preferences.sorting = sort.parse::<SortKey>().map_err(bad_request)?;
    }
    Ok(preferences)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/board
///
/// Grouped columns with each column sorted.
pub async fn get_board(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BoardQueryParams>,
) -> Result<Json<BoardView>, ApiError> {
    let preferences = resolve_preferences(&state, &params).await?;

    state
        .session()
        .view(preferences)
        .await
        .map(Json)
        .map_err(session_error)
}

/// GET /api/v1/board/groups
///
/// Raw buckets in arrival order, without sorting.
pub async fn get_groups(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BoardQueryParams>,
) -> Result<Json<GroupedBuckets>, ApiError> {
    let preferences = resolve_preferences(&state, &params).await?;

    state
        .session()
        .group(preferences.grouping)
        .await
        .map(Json)
        .map_err(session_error)
}

/// GET /api/v1/board/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<BoardStatus> {
    Json(state.session().status().await)
}

/// POST /api/v1/board/refresh
///
/// Re-fetch the payload from the source.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BoardStatus>, (StatusCode, Json<RefreshErrorResponse>)> {
    match state.session().refresh().await {
        Ok(status) => Ok(Json(status)),
        Err(e) => {
            warn!("Refresh failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(RefreshErrorResponse {
                    error: e.to_string(),
                    status: state.session().status().await,
                }),
            ))
        }
    }
}

/// GET /api/v1/data
///
/// The cached tickets and users as loaded.
pub async fn get_data(State(state): State<Arc<AppState>>) -> Result<Json<BoardData>, ApiError> {
    let data = state.session().data().await.map_err(session_error)?;
    Ok(Json(BoardData::clone(&data)))
}
