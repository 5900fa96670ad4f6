pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod domain;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use crate::core::{config::Settings, state::AppState, telemetry};
use crate::repositories::appeals::MemoryAppealRepository;
use crate::repositories::drafts::MemoryDraftRepository;
use crate::repositories::papers::MemoryPaperRepository;
use crate::services::dashboards::DashboardRegistry;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let state = AppState::new(
        settings,
        Arc::new(MemoryAppealRepository::new()),
        Arc::new(MemoryDraftRepository::new()),
        Arc::new(MemoryPaperRepository::new()),
        DashboardRegistry::with_default_providers(),
    );

    if state.settings().demo().seed_demo_data {
        core::bootstrap::seed_demo_data(&state).await?;
    }

    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        "Secmark Appeals API listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await?;

    Ok(())
}
