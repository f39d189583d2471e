//! Shared state for axum handlers.

use std::sync::Arc;

use focus_db::service::FocusService;

/// Cheap-to-clone handle to the task service.
#[derive(Clone)]
pub struct AppState {
    service: Arc<FocusService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: FocusService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    #[must_use]
    pub fn service(&self) -> &FocusService {
        &self.service
    }
}
