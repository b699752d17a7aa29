use api::config::DashboardInfo;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub struct AppStateData {
    pub info: DashboardInfo,
}

/// Stable, non-reactive state loaded once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState(Arc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new(info: DashboardInfo) -> Self {
        Self(Arc::new(AppStateData { info }))
    }
}
