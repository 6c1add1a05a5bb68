//! Application state for the web layer.

use std::sync::Arc;

use crate::requests::RequestHandler;

/// Shared application state.
///
/// The network is frozen before the server starts, so handlers only ever
/// read it.
#[derive(Clone)]
pub struct AppState {
    /// Catalogue and router built from the startup document
    pub handler: Arc<RequestHandler>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(handler: RequestHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}
