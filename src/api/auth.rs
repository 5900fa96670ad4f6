use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::security;
use crate::core::state::AppState;
use crate::domain::models::SessionUser;
use crate::schemas::auth::{
    role_catalog, DemoSessionRequest, RoleCatalogEntry, SessionUserResponse, TokenResponse,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/demo-session", post(demo_session))
        .route("/roles", get(roles))
        .route("/me", get(me))
}

/// Credential-less entry point: pick a role, get a signed session token.
/// Every role maps to a stable demo subject id so seeded records line up.
async fn demo_session(
    State(state): State<AppState>,
    Json(payload): Json<DemoSessionRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    payload.validate().map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let full_name = payload.full_name.as_ref().map(|name| name.trim().to_string());
    let full_name = full_name.filter(|name| !name.is_empty());
    let user = SessionUser::demo(payload.role, full_name);

    let token = security::create_session_token(&user, state.settings(), None)
        .map_err(|e| ApiError::internal(e, "Failed to create session token"))?;

    metrics::counter!("demo_sessions_total", "role" => user.role.as_str()).increment(1);

    let response = TokenResponse {
        access_token: token,
        token_type: "bearer",
        expires_in_minutes: state.settings().security().access_token_expire_minutes,
        user: SessionUserResponse::from(&user),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<SessionUserResponse> {
    Json(SessionUserResponse::from(&user))
}

async fn roles() -> Json<Vec<RoleCatalogEntry>> {
    Json(role_catalog())
}
