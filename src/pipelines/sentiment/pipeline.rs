use std::sync::Arc;
use std::time::Duration;

use candle_core::{DType, D};
use candle_nn::ops::softmax;
use tokenizers::Tokenizer;
use tracing::{debug, warn};

use super::batch::{token_batches, TokenBatch};
use super::label::SentimentLabel;
use crate::error::{PipelineError, Result};
use crate::models::capabilities::{SequenceClassifier, TextEncoder};
use crate::pipelines::stats::PipelineStats;

/// Default number of texts scored together.
pub const DEFAULT_CHUNK_SIZE: usize = 32;

// ============ Options ============

/// Knobs for batch inference.
#[derive(Debug, Clone)]
pub struct InferenceOptions {
    /// Texts per chunk. Bounds peak memory; never changes a label.
    pub chunk_size: usize,
    /// Wall-clock budget for one call, checked before each chunk.
    pub deadline: Option<Duration>,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            deadline: None,
        }
    }
}

// ============ Output types ============

/// A sentiment prediction with label and probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Arg-max label.
    pub label: SentimentLabel,
    /// Softmax probability of `label` (0.0 to 1.0).
    pub score: f32,
}

/// Batch output from [`SentimentAnalysisPipeline::run`].
#[derive(Debug)]
pub struct BatchOutput {
    /// One prediction per input text, in input order.
    pub predictions: Vec<Prediction>,
    /// Execution statistics.
    pub stats: PipelineStats,
}

// ============ Pipeline ============

/// Classifies review sentiment in fixed-size chunks.
///
/// Construct with [`SentimentAnalysisPipelineBuilder`](super::SentimentAnalysisPipelineBuilder)
/// for the real model, or [`SentimentAnalysisPipeline::new`] with any
/// [`SequenceClassifier`] / [`TextEncoder`] pair.
///
/// A row's label depends only on that row's text. Chunk boundaries and chunk-mates
/// only affect how much memory one call needs.
pub struct SentimentAnalysisPipeline<M: SequenceClassifier, E: TextEncoder = Tokenizer> {
    model: Arc<M>,
    encoder: E,
    options: InferenceOptions,
}

impl<M: SequenceClassifier, E: TextEncoder> SentimentAnalysisPipeline<M, E> {
    /// Wire a model and an encoder together.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InputValidation`] if `chunk_size` is zero, or
    /// [`PipelineError::Unexpected`] if the model does not score exactly two classes.
    pub fn new(model: impl Into<Arc<M>>, encoder: E, options: InferenceOptions) -> Result<Self> {
        if options.chunk_size == 0 {
            return Err(PipelineError::InputValidation(
                "chunk_size must be at least 1".to_string(),
            ));
        }

        let model = model.into();
        if model.num_labels() != SentimentLabel::COUNT {
            return Err(PipelineError::Unexpected(format!(
                "Sentiment model scores {} classes, expected {}",
                model.num_labels(),
                SentimentLabel::COUNT
            )));
        }

        Ok(Self {
            model,
            encoder,
            options,
        })
    }

    /// Sentiment label for every text, in input order.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any chunk fails; no partial results are returned.
    pub fn classify(&self, texts: &[&str]) -> Result<Vec<SentimentLabel>> {
        Ok(self
            .run(texts)?
            .predictions
            .into_iter()
            .map(|p| p.label)
            .collect())
    }

    /// Like [`classify`](Self::classify), with probabilities and timing.
    pub fn run(&self, texts: &[&str]) -> Result<BatchOutput> {
        self.run_chunked(texts, self.options.chunk_size)
    }

    /// Class index (0 = Negative, 1 = Positive) for a single text.
    ///
    /// This is the one-element case of [`run`](Self::run) with a chunk size of 1, so a
    /// text gets the same label here as anywhere inside a larger batch.
    pub fn predict(&self, text: &str) -> Result<u32> {
        let output = self.run_chunked(&[text], 1)?;
        output
            .predictions
            .first()
            .map(|p| p.label.index())
            .ok_or_else(|| PipelineError::Unexpected("No predictions returned".into()))
    }

    /// Options this pipeline was built with.
    pub fn options(&self) -> &InferenceOptions {
        &self.options
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }

    fn run_chunked(&self, texts: &[&str], chunk_size: usize) -> Result<BatchOutput> {
        let chunk_size = chunk_size.max(1);
        let stats = PipelineStats::start();
        let mut predictions = Vec::with_capacity(texts.len());
        let mut chunks = 0;

        let chunk_count = texts.len().div_ceil(chunk_size);
        let mut batches = token_batches(&self.encoder, texts, chunk_size);

        for chunk in 0..chunk_count {
            // Checked before the chunk is tokenized.
            if let Some(deadline) = self.options.deadline {
                let elapsed = stats.elapsed();
                if elapsed > deadline {
                    warn!(chunk, ?elapsed, "inference deadline exceeded");
                    return Err(PipelineError::DeadlineExceeded { chunk, elapsed });
                }
            }

            let Some(batch) = batches.next() else {
                break;
            };
            let batch = batch?;
            predictions.extend(self.infer_chunk(chunk, &batch)?);
            chunks += 1;
        }

        Ok(BatchOutput {
            predictions,
            stats: stats.finish(texts.len(), chunks),
        })
    }

    /// Score one chunk and decode it. The batch and its scores are dropped on return.
    fn infer_chunk(&self, chunk: usize, batch: &TokenBatch) -> Result<Vec<Prediction>> {
        let inference_error = |message: String| {
            warn!(chunk, %message, "chunk failed");
            PipelineError::Inference { chunk, message }
        };

        // Scores come back detached: nothing downstream may build a graph on them.
        let scores = self
            .model
            .score(batch)
            .map_err(|e| inference_error(e.to_string()))?
            .detach();

        let (rows, classes) = scores.dims2().map_err(|e| inference_error(e.to_string()))?;
        if rows != batch.rows() || classes != SentimentLabel::COUNT {
            return Err(inference_error(format!(
                "expected scores of shape ({}, {}), got ({rows}, {classes})",
                batch.rows(),
                SentimentLabel::COUNT
            )));
        }

        let probabilities = scores
            .to_dtype(DType::F32)
            .and_then(|s| softmax(&s, D::Minus1))
            .and_then(|p| p.to_vec2::<f32>())
            .map_err(|e| inference_error(e.to_string()))?;

        debug!(
            chunk,
            rows = batch.rows(),
            seq_len = batch.seq_len(),
            "scored chunk"
        );

        probabilities
            .iter()
            .map(|row| {
                let index = argmax_first(row);
                let label = SentimentLabel::from_index(index as u32)
                    .map_err(|e| inference_error(e.to_string()))?;
                Ok(Prediction {
                    label,
                    score: row[index],
                })
            })
            .collect()
    }
}

/// Index of the largest value; ties go to the lowest index.
///
/// NaN never wins, whatever its position. A row that is all NaN decodes to index 0.
pub(crate) fn argmax_first(row: &[f32]) -> usize {
    let mut best: Option<usize> = None;
    for (i, &value) in row.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some(b) if value <= row[b] => {}
            _ => best = Some(i),
        }
    }
    best.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax_first(&[0.5, 0.5]), 0);
        assert_eq!(argmax_first(&[0.2, 0.8]), 1);
        assert_eq!(argmax_first(&[0.9, 0.1]), 0);
    }

    #[test]
    fn argmax_skips_nan_in_any_position() {
        assert_eq!(argmax_first(&[0.3, f32::NAN]), 0);
        assert_eq!(argmax_first(&[f32::NAN, 0.3]), 1);
        assert_eq!(argmax_first(&[f32::NAN, f32::NAN]), 0);
    }

    #[test]
    fn default_chunk_size_is_32() {
        assert_eq!(InferenceOptions::default().chunk_size, 32);
    }
}
