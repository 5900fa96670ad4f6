pub(crate) mod appeal;
pub(crate) mod auth;
pub(crate) mod dashboard;
pub(crate) mod paper;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) docs: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) environment: &'static str,
    pub(crate) version: String,
}
