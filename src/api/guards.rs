use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState};
use crate::domain::models::SessionUser;
use crate::domain::types::Permission;

/// The demo session token is self-contained: the claims carry the subject,
/// display name and role, and there is no user table to consult.
pub(crate) struct CurrentUser(pub(crate) SessionUser);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;

        let claims = security::verify_token(token, app_state.settings())
            .map_err(|_| ApiError::Unauthorized("Invalid authentication credentials"))?;

        Ok(CurrentUser(SessionUser {
            id: claims.sub,
            full_name: claims.name,
            role: claims.role,
        }))
    }
}

pub(crate) fn require_permission(
    user: &SessionUser,
    permission: Permission,
) -> Result<(), ApiError> {
    if user.role.has_permission(permission) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Not enough permissions"))
    }
}
