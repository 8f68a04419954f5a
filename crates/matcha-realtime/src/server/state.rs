//! Realtime router state

use matcha_service::ServiceContext;
use std::sync::Arc;

use crate::hub::RealtimeHub;

/// Shared by every socket handler
#[derive(Clone)]
pub struct RealtimeState {
    hub: Arc<RealtimeHub>,
    service_context: Arc<ServiceContext>,
}

impl RealtimeState {
    /// `service_context` must publish through `hub`, or socket-originated
    /// writes would not reach other sockets.
    pub fn new(hub: Arc<RealtimeHub>, service_context: Arc<ServiceContext>) -> Self {
        Self {
            hub,
            service_context,
        }
    }

    pub fn hub(&self) -> &Arc<RealtimeHub> {
        &self.hub
    }

    pub fn service_context(&self) -> &Arc<ServiceContext> {
        &self.service_context
    }
}

impl std::fmt::Debug for RealtimeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeState")
            .field("hub", &self.hub)
            .finish_non_exhaustive()
    }
}
