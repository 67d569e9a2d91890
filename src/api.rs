//! HTTP webhook transport
//!
//! A thin edge: the webhook accepts an activity, hands it to the runtime,
//! and acknowledges immediately. All conversation work happens on the
//! per-conversation workers.

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::InboundMessage;

use crate::runtime::RuntimeManager;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<RuntimeManager>,
}

impl AppState {
    pub fn new(runtime: Arc<RuntimeManager>) -> Self {
        Self { runtime }
    }
}
