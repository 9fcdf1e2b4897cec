use glochat_providers::ChatProvider;
use std::sync::Arc;

/// Shared state for the relay's request handlers
///
/// `provider` is `None` when the API key was absent at startup; the chat
/// handler then answers with the generic failure.
#[derive(Clone)]
pub struct AppState {
    pub provider: Option<Arc<dyn ChatProvider>>,
}

impl AppState {
    pub fn new(provider: Option<Arc<dyn ChatProvider>>) -> Self {
        Self { provider }
    }
}
