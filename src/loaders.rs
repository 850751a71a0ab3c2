//! Locating model files on disk or on the Hugging Face Hub.
//!
//! The sentiment model is assembled from three files that may live in different places:
//! the encoder's `config.json` (usually the public base model on the Hub), the
//! fine-tuned classifier weights (usually a local `.pth` or `.safetensors` file) and the
//! `tokenizer.json` (usually a local directory saved next to the weights).

use std::path::{Path, PathBuf};
use std::time::Duration;

use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::{Tokenizer, TruncationParams};

use crate::error::{PipelineError, Result};
use crate::pipelines::cache::ModelOptions;

/// Base encoder the classifier head was fine-tuned on.
pub const DEFAULT_BASE_MODEL: &str = "symanto/xlm-roberta-base-snli-mnli-anli-xnli";

/// Downloads a single file from a Hub model repo into the local HF cache.
#[derive(Debug, Clone)]
pub struct HfLoader {
    /// Repo id, e.g. `org/model`.
    pub repo: String,
    /// File inside the repo.
    pub filename: String,
}

impl HfLoader {
    /// Loader for `filename` in `repo`.
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
        }
    }

    /// Fetch the file (or reuse the cached copy) and return its local path.
    pub fn load(&self) -> Result<PathBuf> {
        let api = Api::new()?;
        let repo = api.repo(Repo::new(self.repo.clone(), RepoType::Model));

        let max_retries = 3;
        for attempt in 0..max_retries {
            match repo.get(&self.filename) {
                Ok(path) => return Ok(path),
                Err(e) => {
                    let error_msg = e.to_string();
                    // Concurrent processes can race on the cache lock.
                    if error_msg.contains("Lock acquisition failed") && attempt < max_retries - 1 {
                        std::thread::sleep(Duration::from_millis(100 * (1 << attempt)));
                        continue;
                    }
                    return Err(PipelineError::Download(format!(
                        "Failed to download '{}' from '{}': {}",
                        self.filename, self.repo, error_msg
                    )));
                }
            }
        }

        Err(PipelineError::Download(format!(
            "Download timed out for '{}' from '{}' after {} attempt(s)",
            self.filename, self.repo, max_retries
        )))
    }
}

/// Where one model file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// A file in a Hugging Face Hub model repo.
    Hub {
        /// Repo id.
        repo: String,
        /// File inside the repo.
        filename: String,
    },
}

impl FileSource {
    /// Interpret a user-supplied location.
    ///
    /// An existing directory resolves to `dir/filename`, an existing file to itself, and
    /// anything else is treated as a Hub repo id.
    pub fn from_location(location: &str, filename: &str) -> Self {
        let path = Path::new(location);
        if path.is_dir() {
            FileSource::Local(path.join(filename))
        } else if path.is_file() {
            FileSource::Local(path.to_path_buf())
        } else {
            FileSource::Hub {
                repo: location.to_string(),
                filename: filename.to_string(),
            }
        }
    }

    /// Local path of the file, downloading it first if needed.
    pub fn resolve(&self) -> Result<PathBuf> {
        match self {
            FileSource::Local(path) if path.is_file() => Ok(path.clone()),
            FileSource::Local(path) => Err(PipelineError::Unexpected(format!(
                "Model file not found: {}",
                path.display()
            ))),
            FileSource::Hub { repo, filename } => HfLoader::new(repo, filename).load(),
        }
    }
}

impl std::fmt::Display for FileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileSource::Local(path) => write!(f, "{}", path.display()),
            FileSource::Hub { repo, filename } => write!(f, "hf://{repo}/{filename}"),
        }
    }
}

/// All files needed to build the sentiment model and its tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    /// Encoder `config.json`.
    pub encoder_config: FileSource,
    /// Fine-tuned weights (`.safetensors` or PyTorch `.pth`/`.bin`).
    pub weights: FileSource,
    /// `tokenizer.json`.
    pub tokenizer: FileSource,
}

impl ModelSource {
    /// Base encoder config from the Hub, local weights and a local tokenizer directory.
    pub fn local(weights: impl Into<PathBuf>, tokenizer_dir: impl AsRef<Path>) -> Self {
        Self {
            encoder_config: FileSource::Hub {
                repo: DEFAULT_BASE_MODEL.to_string(),
                filename: "config.json".to_string(),
            },
            weights: FileSource::Local(weights.into()),
            tokenizer: FileSource::Local(tokenizer_dir.as_ref().join("tokenizer.json")),
        }
    }

    /// Load the tokenizer, truncating every encoding to `max_length` tokens.
    pub fn load_tokenizer(&self, max_length: usize) -> Result<Tokenizer> {
        let path = self.tokenizer.resolve()?;
        let path_str = path.display().to_string();

        let mut tokenizer = Tokenizer::from_file(&path).map_err(|e| {
            PipelineError::Tokenization(format!(
                "Failed to load tokenizer from '{}': {}",
                path_str, e
            ))
        })?;

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| {
                PipelineError::Tokenization(format!("Invalid truncation for '{path_str}': {e}"))
            })?;

        Ok(tokenizer)
    }
}

impl ModelOptions for ModelSource {
    fn cache_key(&self) -> String {
        format!("{}|{}", self.encoder_config, self.weights)
    }
}
