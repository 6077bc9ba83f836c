use clap::Parser;
use brief_core::Result;
use brief_inference::{Config, ModelKind, DEFAULT_MAX_INPUT_TOKENS, DEFAULT_MODEL_ID, DEFAULT_REVISION};
use brief_web::{AppState, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use tracing::{info, Level};

/// Local web UI for abstractive text summarization
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    #[arg(long, value_enum, default_value_t = ModelKind::T5, help = "Summarization backend")]
    model: ModelKind,
    #[arg(long, default_value = DEFAULT_MODEL_ID, help = "Hugging Face repository of the T5 checkpoint")]
    model_id: String,
    #[arg(long, default_value = DEFAULT_REVISION)]
    revision: String,
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_TOKENS, help = "Longer inputs are truncated before encoding")]
    max_input_tokens: usize,
}

impl Cli {
    fn inference_config(&self) -> Config {
        Config {
            model_kind: self.model,
            model_id: self.model_id.clone(),
            revision: self.revision.clone(),
            max_input_tokens: self.max_input_tokens,
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    let cli = Cli::parse();

    let summarizer = brief_inference::create_model(Some(cli.inference_config())).await?;
    info!("🧠 Summarizer initialized successfully (using {} on {})", summarizer.name(), summarizer.device());

    brief_web::serve(&cli.server_config(), AppState::new(summarizer)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_uses_defaults() {
        let cli = Cli::parse_from(["brief"]);
        assert_eq!(cli.server_config().addr(), "127.0.0.1:7860");

        let config = cli.inference_config();
        assert_eq!(config.model_kind, ModelKind::T5);
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.revision, DEFAULT_REVISION);
        assert_eq!(config.max_input_tokens, DEFAULT_MAX_INPUT_TOKENS);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["brief", "--port", "8080", "--model", "dummy", "--max-input-tokens", "256"]);
        assert_eq!(cli.server_config().addr(), "127.0.0.1:8080");
        assert_eq!(cli.inference_config().model_kind, ModelKind::Dummy);
        assert_eq!(cli.inference_config().max_input_tokens, 256);
    }
}
