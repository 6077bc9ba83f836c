use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5::{self, T5ForConditionalGeneration};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use serde::Deserialize;
use tokenizers::Tokenizer;
use tracing::{info, warn};

use brief_core::{Error, LengthBounds, Result, Summarizer};
use crate::generation::{greedy_decode, GenerationConfig};
use crate::{CandleResultExt, Config};

const DEFAULT_NO_REPEAT_NGRAM_SIZE: usize = 3;

/// Summarization settings published in a checkpoint's `config.json` under
/// `task_specific_params.summarization`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskParams {
    pub prefix: String,
    pub no_repeat_ngram_size: usize,
}

impl Default for TaskParams {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            no_repeat_ngram_size: DEFAULT_NO_REPEAT_NGRAM_SIZE,
        }
    }
}

#[derive(Deserialize)]
struct RawModelConfig {
    #[serde(default)]
    task_specific_params: Option<RawTaskParams>,
}

#[derive(Deserialize)]
struct RawTaskParams {
    #[serde(default)]
    summarization: Option<RawSummarizationParams>,
}

#[derive(Deserialize)]
struct RawSummarizationParams {
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    no_repeat_ngram_size: Option<usize>,
}

impl TaskParams {
    pub fn from_config_json(raw: &str) -> Result<Self> {
        let parsed: RawModelConfig = serde_json::from_str(raw)?;
        let defaults = Self::default();
        let Some(params) = parsed.task_specific_params.and_then(|p| p.summarization) else {
            return Ok(defaults);
        };
        Ok(Self {
            prefix: params.prefix.unwrap_or(defaults.prefix),
            no_repeat_ngram_size: params.no_repeat_ngram_size.unwrap_or(defaults.no_repeat_ngram_size),
        })
    }
}

struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

/// Resolves the checkpoint files through the hub cache, downloading what is
/// missing.
fn fetch_files(model_id: &str, revision: &str) -> Result<ModelFiles> {
    let api = Api::new().map_err(anyhow::Error::from)?;
    let repo = api.repo(Repo::with_revision(
        model_id.to_string(),
        RepoType::Model,
        revision.to_string(),
    ));
    let fetch = |name: &str| -> Result<PathBuf> {
        repo.get(name)
            .map_err(|e| Error::External(anyhow::anyhow!("failed to fetch {} from {}: {}", name, model_id, e)))
    };
    Ok(ModelFiles {
        config: fetch("config.json")?,
        tokenizer: fetch("tokenizer.json")?,
        weights: fetch("model.safetensors")?,
    })
}

struct Inner {
    model: T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
    task: TaskParams,
    generation: GenerationConfig,
    use_cache: bool,
    max_input_tokens: usize,
}

/// T5 checkpoint running on the CPU through candle. The loaded weights are
/// never mutated; each request decodes with its own clone of the model so
/// the key/value cache stays private to that request.
pub struct T5Summarizer {
    model_id: String,
    inner: Arc<Inner>,
}

impl fmt::Debug for T5Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("T5Summarizer")
            .field("model_id", &self.model_id)
            .field("task", &self.inner.task)
            .field("max_input_tokens", &self.inner.max_input_tokens)
            .finish()
    }
}

impl T5Summarizer {
    pub fn load(config: &Config) -> Result<Self> {
        info!("Loading model: {} ({})...", config.model_id, config.revision);
        let device = Device::Cpu;
        let files = fetch_files(&config.model_id, &config.revision)?;

        let raw_config = std::fs::read_to_string(&files.config)?;
        let model_config: t5::Config = serde_json::from_str(&raw_config)?;
        let task = TaskParams::from_config_json(&raw_config)?;

        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| Error::Tokenizer(e.to_string()))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], DType::F32, &device).inference()?
        };
        let model = T5ForConditionalGeneration::load(vb, &model_config).inference()?;

        let generation = GenerationConfig {
            decoder_start_token_id: model_config
                .decoder_start_token_id
                .unwrap_or(model_config.pad_token_id) as u32,
            eos_token_id: model_config.eos_token_id as u32,
            no_repeat_ngram_size: task.no_repeat_ngram_size,
        };
        info!("Model loaded successfully.");

        Ok(Self {
            model_id: config.model_id.clone(),
            inner: Arc::new(Inner {
                model,
                tokenizer,
                device,
                task,
                generation,
                use_cache: model_config.use_cache,
                max_input_tokens: config.max_input_tokens,
            }),
        })
    }
}

impl Inner {
    fn encode_input(&self, text: &str) -> Result<Vec<u32>> {
        let prompt = format!("{}{}", self.task.prefix, text);
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| Error::Tokenizer(e.to_string()))?;
        Ok(truncate_input(
            encoding.get_ids().to_vec(),
            self.max_input_tokens,
            self.generation.eos_token_id,
        ))
    }

    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        let input_ids = self.encode_input(text)?;
        let mut model = self.model.clone();
        model.clear_kv_cache();

        let input = Tensor::new(input_ids.as_slice(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .inference()?;
        let encoder_output = model.encode(&input).inference()?;

        let tokens = greedy_decode(&self.generation, bounds, |sequence| {
            next_token_logits(&mut model, sequence, &encoder_output, &self.device, self.use_cache)
                .inference()
        })?;

        let summary = self
            .tokenizer
            .decode(&tokens, true)
            .map_err(|e| Error::Tokenizer(e.to_string()))?;
        Ok(summary.trim().to_string())
    }
}

/// Cuts encoder input down to `max_tokens` (at least 2), keeping EOS as
/// the final token.
fn truncate_input(mut ids: Vec<u32>, max_tokens: usize, eos_token_id: u32) -> Vec<u32> {
    let max_tokens = max_tokens.max(2);
    if ids.len() > max_tokens {
        warn!("Input has {} tokens, truncating to {}", ids.len(), max_tokens);
        ids.truncate(max_tokens - 1);
        ids.push(eos_token_id);
    }
    ids
}

/// With the cache enabled only the newest token is fed after the first
/// step; the attention layers keep the rest.
fn next_token_logits(
    model: &mut T5ForConditionalGeneration,
    sequence: &[u32],
    encoder_output: &Tensor,
    device: &Device,
    use_cache: bool,
) -> candle_core::Result<Vec<f32>> {
    let decoder_ids = match sequence {
        [.., last] if use_cache && sequence.len() > 1 => Tensor::new(&[*last], device)?,
        _ => Tensor::new(sequence, device)?,
    };
    let logits = model.decode(&decoder_ids.unsqueeze(0)?, encoder_output)?;
    logits.squeeze(0)?.to_dtype(DType::F32)?.to_vec1::<f32>()
}

#[async_trait::async_trait]
impl Summarizer for T5Summarizer {
    fn name(&self) -> &str {
        &self.model_id
    }

    fn device(&self) -> &str {
        "CPU"
    }

    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();
        tokio::task::spawn_blocking(move || inner.summarize(&text, bounds))
            .await
            .map_err(|e| Error::Inference(format!("generation task failed: {}", e)))?
    }
}
