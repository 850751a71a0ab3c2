//! Command-line and environment configuration for the HTTP service.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::builder::TypedValueParser;
use clap::Parser;

use crate::loaders::{FileSource, ModelSource, DEFAULT_BASE_MODEL};
use crate::sentiment::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LENGTH};

/// Settings for `emoticart`. Every flag can also be set through its `EMOTICART_*`
/// environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "emoticart")]
#[command(about = "Sentiment and topic tagging for product reviews")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "EMOTICART_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "EMOTICART_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Fine-tuned classifier weights (.pth or .safetensors), local path or Hub repo.
    #[arg(long, env = "EMOTICART_WEIGHTS", default_value = "custom_xlm_roberta_model.pth")]
    pub weights: String,

    /// Directory or Hub repo holding tokenizer.json.
    #[arg(long, env = "EMOTICART_TOKENIZER", default_value = "./model")]
    pub tokenizer: String,

    /// Directory or Hub repo holding the encoder's config.json.
    #[arg(long, env = "EMOTICART_BASE_MODEL", default_value = DEFAULT_BASE_MODEL)]
    pub base_model: String,

    /// Texts scored per chunk.
    #[arg(long, env = "EMOTICART_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE,
          value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
    pub chunk_size: usize,

    /// Tokens kept per text.
    #[arg(long, env = "EMOTICART_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Inference time budget per request, in seconds (0 disables it).
    #[arg(long, env = "EMOTICART_REQUEST_TIMEOUT", default_value_t = 120)]
    pub request_timeout_secs: u64,

    /// Largest accepted upload, in bytes.
    #[arg(long, env = "EMOTICART_MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Run on this CUDA device instead of the CPU.
    #[arg(long, env = "EMOTICART_CUDA")]
    pub cuda: Option<usize>,
}

impl ServerConfig {
    /// Address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Where to find the model files.
    pub fn model_source(&self) -> ModelSource {
        ModelSource {
            encoder_config: FileSource::from_location(&self.base_model, "config.json"),
            weights: FileSource::from_location(&self.weights, "model.safetensors"),
            tokenizer: FileSource::from_location(&self.tokenizer, "tokenizer.json"),
        }
    }

    /// Per-request inference budget, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_service() {
        let config = ServerConfig::parse_from(["emoticart"]);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
        assert_eq!(config.chunk_size, 32);
        assert_eq!(config.max_length, 512);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn zero_timeout_disables_deadline() {
        let config = ServerConfig::parse_from(["emoticart", "--request-timeout-secs", "0"]);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        assert!(ServerConfig::try_parse_from(["emoticart", "--chunk-size", "0"]).is_err());
    }

    #[test]
    fn base_model_defaults_to_hub_repo() {
        let config = ServerConfig::parse_from(["emoticart"]);
        assert_eq!(
            config.model_source().encoder_config,
            FileSource::Hub {
                repo: DEFAULT_BASE_MODEL.into(),
                filename: "config.json".into()
            }
        );
    }
}
