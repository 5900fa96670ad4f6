use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::SessionUser;
use crate::domain::types::UserRole;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct DemoSessionRequest {
    pub(crate) role: UserRole,
    #[validate(length(min = 1, max = 120))]
    pub(crate) full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    pub(crate) token_type: &'static str,
    pub(crate) expires_in_minutes: u64,
    pub(crate) user: SessionUserResponse,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionUserResponse {
    pub(crate) id: String,
    pub(crate) full_name: String,
    pub(crate) role: &'static str,
    pub(crate) permissions: Vec<&'static str>,
}

impl From<&SessionUser> for SessionUserResponse {
    fn from(user: &SessionUser) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            role: user.role.as_str(),
            permissions: user
                .role
                .permissions()
                .iter()
                .map(|permission| permission.as_str())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RoleCatalogEntry {
    pub(crate) role: &'static str,
    pub(crate) display_name: &'static str,
}

pub(crate) fn role_catalog() -> Vec<RoleCatalogEntry> {
    UserRole::ALL
        .iter()
        .map(|role| RoleCatalogEntry { role: role.as_str(), display_name: role_display(*role) })
        .collect()
}

fn role_display(role: UserRole) -> &'static str {
    match role {
        UserRole::TeacherExaminer => "Teacher / Examiner",
        UserRole::Student => "Student",
        UserRole::ReviewerModerator => "Reviewer / Moderator",
        UserRole::SecAdministrator => "SEC Administrator",
        UserRole::SchoolAdministrator => "School Administrator",
        UserRole::Parent => "Parent / Guardian",
        UserRole::PolicyMaker => "Policy Maker",
    }
}
