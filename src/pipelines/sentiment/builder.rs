use std::time::Duration;

use tokenizers::Tokenizer;
use tracing::info;

use super::pipeline::{InferenceOptions, SentimentAnalysisPipeline};
use crate::error::Result;
use crate::loaders::ModelSource;
use crate::models::ReviewSentimentModel;
use crate::pipelines::cache::global_cache;
use crate::pipelines::utils::{build_cache_key, DeviceRequest};

/// Default maximum number of tokens kept per text.
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Builder for creating [`SentimentAnalysisPipeline`] instances backed by the
/// XLM-RoBERTa review classifier.
///
/// # Examples
///
/// ```rust,no_run
/// # use emoticart::loaders::ModelSource;
/// # use emoticart::sentiment::SentimentAnalysisPipelineBuilder;
/// # fn main() -> emoticart::error::Result<()> {
/// let source = ModelSource::local("custom_xlm_roberta_model.pth", "./model");
/// let pipeline = SentimentAnalysisPipelineBuilder::xlm_roberta(source)
///     .chunk_size(16)
///     .build()?;
/// let labels = pipeline.classify(&["Sulit na sulit!", "Broke after a week"])?;
/// # Ok(())
/// # }
/// ```
pub struct SentimentAnalysisPipelineBuilder {
    source: ModelSource,
    device_request: DeviceRequest,
    options: InferenceOptions,
    max_length: usize,
}

impl SentimentAnalysisPipelineBuilder {
    /// Creates a builder for the XLM-RoBERTa review classifier stored at `source`.
    pub fn xlm_roberta(source: ModelSource) -> Self {
        Self {
            source,
            device_request: DeviceRequest::Cpu,
            options: InferenceOptions::default(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Use CPU for inference (default).
    pub fn cpu(mut self) -> Self {
        self.device_request = DeviceRequest::Cpu;
        self
    }

    /// Use a specific CUDA GPU for inference.
    pub fn cuda(mut self, index: usize) -> Self {
        self.device_request = DeviceRequest::Cuda(index);
        self
    }

    /// Texts scored per chunk (default 32).
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.options.chunk_size = chunk_size;
        self
    }

    /// Tokens kept per text before truncation (default 512).
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Wall-clock budget for one `classify`/`run`/`predict` call.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.options.deadline = Some(deadline);
        self
    }

    /// Builds the pipeline with configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if model loading, tokenizer loading or device initialization fails.
    pub fn build(self) -> Result<SentimentAnalysisPipeline<ReviewSentimentModel, Tokenizer>> {
        let device = self.device_request.resolve()?;
        let key = build_cache_key(&self.source, &device);

        let model = global_cache().get_or_create(&key, || {
            ReviewSentimentModel::load(&self.source, &device)
        })?;
        let tokenizer = self.source.load_tokenizer(self.max_length)?;

        info!(
            device = ?device.location(),
            chunk_size = self.options.chunk_size,
            max_length = self.max_length,
            "sentiment pipeline ready"
        );

        SentimentAnalysisPipeline::new(model, tokenizer, self.options)
    }
}
