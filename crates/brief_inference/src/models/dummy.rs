use std::fmt;
use brief_core::{LengthBounds, Result, Summarizer};
use crate::Config;

/// Keeps the first `max_length` words. Used when no model should be
/// downloaded, e.g. in tests.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub async fn new(_config: Option<Config>) -> Result<Self> {
        Ok(Self)
    }
}

#[async_trait::async_trait]
impl Summarizer for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    fn device(&self) -> &str {
        "CPU"
    }

    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        let words: Vec<&str> = text.split_whitespace().take(bounds.max_length()).collect();
        tracing::debug!("Dummy summary kept {} words", words.len());
        Ok(words.join(" "))
    }
}
