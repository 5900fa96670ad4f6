use axum::{extract::State, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::schemas::dashboard::DashboardResponse;
use crate::services::dashboards::DashboardContext;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// One endpoint for all roles; the registry picks the provider that matches
/// the session's role.
async fn dashboard(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let provider = state.dashboards().provider(user.role).ok_or_else(|| {
        ApiError::NotFound(format!("No dashboard for role: {}", user.role.as_str()))
    })?;

    let ctx = DashboardContext {
        user: &user,
        appeals: state.appeals(),
        papers: state.papers(),
        settings: state.settings(),
    };

    let response = provider
        .build(&ctx)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to build dashboard"))?;

    Ok(Json(response))
}
