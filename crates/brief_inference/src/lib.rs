use brief_core::{Error, Result};

pub mod generation;
pub mod models;

pub const DEFAULT_MODEL_ID: &str = "google-t5/t5-small";
pub const DEFAULT_REVISION: &str = "main";
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ModelKind {
    /// Pretrained T5 checkpoint from the Hugging Face hub
    #[default]
    T5,
    /// Offline stand-in that echoes the leading words
    Dummy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub model_kind: ModelKind,
    pub model_id: String,
    pub revision: String,
    pub max_input_tokens: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_kind: ModelKind::default(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            revision: DEFAULT_REVISION.to_string(),
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
        }
    }
}

/// Maps candle failures into the workspace error type.
pub(crate) trait CandleResultExt<T> {
    fn inference(self) -> Result<T>;
}

impl<T> CandleResultExt<T> for candle_core::Result<T> {
    fn inference(self) -> Result<T> {
        self.map_err(|e| Error::Inference(e.to_string()))
    }
}

pub use models::create_model;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model_kind, ModelKind::T5);
        assert_eq!(config.model_id, "google-t5/t5-small");
        assert_eq!(config.revision, "main");
        assert_eq!(config.max_input_tokens, 512);
    }

    #[test]
    fn test_candle_error_maps_to_inference() {
        let failed: candle_core::Result<()> = Err(candle_core::Error::Msg("shape mismatch".to_string()));
        let err = failed.inference().unwrap_err();
        assert!(matches!(err, Error::Inference(msg) if msg.contains("shape mismatch")));
    }
}
