//! Shared state injected into every handler.

use crate::application::services::ContactService;
use crate::domain::OriginPolicy;
use std::sync::Arc;

/// Built once per process in [`crate::server::run`] and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub origin_policy: Arc<OriginPolicy>,
    pub contact_service: Arc<ContactService>,
}

impl AppState {
    pub fn new(origin_policy: Arc<OriginPolicy>, contact_service: Arc<ContactService>) -> Self {
        Self {
            origin_policy,
            contact_service,
        }
    }
}
