use std::sync::Arc;
use brief_core::{Error, Result, Summarizer};
use crate::{Config, ModelKind};

pub mod dummy;
pub mod t5;

use dummy::DummyModel;
use t5::T5Summarizer;

/// Builds the process-wide summarizer. Loading T5 may download weights, so
/// it runs on the blocking pool.
pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn Summarizer>> {
    let config = config.unwrap_or_default();
    match config.model_kind {
        ModelKind::Dummy => Ok(Arc::new(DummyModel::new(Some(config)).await?)),
        ModelKind::T5 => {
            let model = tokio::task::spawn_blocking(move || T5Summarizer::load(&config))
                .await
                .map_err(|e| Error::Inference(format!("model loading task failed: {}", e)))??;
            Ok(Arc::new(model))
        }
    }
}
