//! Batch sentiment inference.
//!
//! Classify review text as `Negative` or `Positive`. Inputs of any length are split into
//! fixed-size chunks that are tokenized, padded and scored one after another, so peak
//! memory follows the chunk size rather than the input size. Labels come back in input
//! order and never depend on which chunk a text landed in.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use emoticart::loaders::ModelSource;
//! use emoticart::sentiment::SentimentAnalysisPipelineBuilder;
//!
//! # fn main() -> emoticart::error::Result<()> {
//! let source = ModelSource::local("custom_xlm_roberta_model.pth", "./model");
//! let pipeline = SentimentAnalysisPipelineBuilder::xlm_roberta(source).build()?;
//!
//! // Single text: raw class index (0 = Negative, 1 = Positive)
//! let class = pipeline.predict("Gumagana nang maayos, salamat!")?;
//!
//! // Batch: labels with probabilities
//! let output = pipeline.run(&["works great", "overpriced junk"])?;
//! for p in output.predictions {
//!     println!("{} ({:.2})", p.label, p.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Custom models
//!
//! Anything implementing [`SequenceClassifier`] and [`TextEncoder`] can drive the
//! pipeline through [`SentimentAnalysisPipeline::new`].

// ============ Internal API ============

pub(crate) mod batch;
pub(crate) mod builder;
pub(crate) mod label;
pub(crate) mod pipeline;

// ============ Public API ============

pub use crate::models::{EncodedText, ReviewSentimentModel, SequenceClassifier, TextEncoder};
pub use crate::pipelines::stats::PipelineStats;
pub use batch::{token_batches, TokenBatch};
pub use builder::{SentimentAnalysisPipelineBuilder, DEFAULT_MAX_LENGTH};
pub use label::SentimentLabel;
pub use pipeline::{
    BatchOutput, InferenceOptions, Prediction, SentimentAnalysisPipeline, DEFAULT_CHUNK_SIZE,
};
