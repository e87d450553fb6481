use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use visascope::error::AppError;
use visascope::scoring::draws::{import::DrawHistoryImporter, DrawRecord};
use visascope::scoring::portugal::PortugalPolicy;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Policy baseline applied when a request does not override it.
pub(crate) fn default_portugal_policy() -> PortugalPolicy {
    PortugalPolicy::default()
}

pub(crate) fn load_draw_history(path: PathBuf) -> Result<Vec<DrawRecord>, AppError> {
    DrawHistoryImporter::from_path(path).map_err(AppError::from)
}
