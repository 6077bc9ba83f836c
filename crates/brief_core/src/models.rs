use async_trait::async_trait;
use std::fmt;
use crate::types::LengthBounds;
use crate::Result;

#[async_trait]
pub trait Summarizer: Send + Sync + fmt::Debug {
    /// Short backend name shown in the page footer and logs
    fn name(&self) -> &str;

    /// Where generation runs, e.g. "CPU"
    fn device(&self) -> &str;

    /// Produce a single abstractive summary of `text` whose length in
    /// tokens falls inside `bounds`. Must be deterministic.
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String>;
}
