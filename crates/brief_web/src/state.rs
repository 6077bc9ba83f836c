use std::sync::Arc;
use brief_core::Summarizer;

pub struct AppState {
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self { summarizer }
    }
}
