use std::sync::Arc;

use crate::pipeline::Pipeline;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The relay pipeline, shared by every session
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
