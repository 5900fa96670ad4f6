use std::sync::Arc;

use crate::core::config::Settings;
use crate::repositories::appeals::AppealRepository;
use crate::repositories::drafts::DraftRepository;
use crate::repositories::papers::PaperRepository;
use crate::services::dashboards::DashboardRegistry;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    appeals: Arc<dyn AppealRepository>,
    drafts: Arc<dyn DraftRepository>,
    papers: Arc<dyn PaperRepository>,
    dashboards: DashboardRegistry,
}

impl AppState {
    pub(crate) fn new(
        settings: Settings,
        appeals: Arc<dyn AppealRepository>,
        drafts: Arc<dyn DraftRepository>,
        papers: Arc<dyn PaperRepository>,
        dashboards: DashboardRegistry,
    ) -> Self {
        Self { inner: Arc::new(InnerState { settings, appeals, drafts, papers, dashboards }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn appeals(&self) -> &dyn AppealRepository {
        self.inner.appeals.as_ref()
    }

    pub(crate) fn drafts(&self) -> &dyn DraftRepository {
        self.inner.drafts.as_ref()
    }

    pub(crate) fn papers(&self) -> &dyn PaperRepository {
        self.inner.papers.as_ref()
    }

    pub(crate) fn dashboards(&self) -> &DashboardRegistry {
        &self.inner.dashboards
    }
}
