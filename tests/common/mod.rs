//! Deterministic stand-ins for the tokenizer and the classifier.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use candle_core::{Device, Tensor};
use emoticart::error::{PipelineError, Result};
use emoticart::sentiment::{
    EncodedText, InferenceOptions, SentimentAnalysisPipeline, SequenceClassifier, TextEncoder,
    TokenBatch,
};

/// One token per byte. A NUL byte is refused.
pub struct ByteEncoder;

impl TextEncoder for ByteEncoder {
    fn encode_text(&self, text: &str) -> Result<EncodedText> {
        if text.contains('\u{0}') {
            return Err(PipelineError::Tokenization("nul byte in input".into()));
        }
        let ids: Vec<u32> = text.bytes().map(u32::from).collect();
        let attention_mask = vec![1; ids.len()];
        Ok(EncodedText {
            ids,
            attention_mask,
        })
    }

    fn pad_id(&self) -> u32 {
        0
    }
}

/// [`ByteEncoder`] that counts the texts it has encoded.
#[derive(Default)]
pub struct CountingEncoder {
    pub encoded: Arc<AtomicUsize>,
}

impl TextEncoder for CountingEncoder {
    fn encode_text(&self, text: &str) -> Result<EncodedText> {
        self.encoded.fetch_add(1, Ordering::SeqCst);
        ByteEncoder.encode_text(text)
    }

    fn pad_id(&self) -> u32 {
        ByteEncoder.pad_id()
    }
}

/// Scores `[count of '-', count of '+']` over the unmasked tokens of each row.
///
/// Rows with equal counts tie, which decodes to `Negative`. A row containing `!` makes
/// its whole chunk fail.
pub struct MarkCounter {
    device: Device,
    calls: AtomicUsize,
    delay: Duration,
}

impl MarkCounter {
    pub fn new() -> Self {
        Self {
            device: Device::Cpu,
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Sleep this long inside every `score` call.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    /// Number of chunks scored so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SequenceClassifier for MarkCounter {
    fn num_labels(&self) -> usize {
        2
    }

    fn score(&self, batch: &TokenBatch) -> Result<Tensor> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let mut scores = Vec::with_capacity(batch.rows() * 2);
        for row in 0..batch.rows() {
            let tokens = batch
                .row_ids(row)
                .iter()
                .zip(batch.row_mask(row))
                .filter(|(_, &mask)| mask == 1)
                .map(|(&id, _)| id);

            let (mut negative, mut positive) = (0f32, 0f32);
            for id in tokens {
                match id {
                    id if id == u32::from(b'-') => negative += 1.0,
                    id if id == u32::from(b'+') => positive += 1.0,
                    id if id == u32::from(b'!') => {
                        return Err(PipelineError::Unexpected("device lost".into()))
                    }
                    _ => {}
                }
            }
            scores.push(negative);
            scores.push(positive);
        }

        Ok(Tensor::from_vec(scores, (batch.rows(), 2), &self.device)?)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

pub fn pipeline(chunk_size: usize) -> SentimentAnalysisPipeline<MarkCounter, ByteEncoder> {
    pipeline_with(MarkCounter::new(), chunk_size, None)
}

pub fn pipeline_with(
    model: impl Into<Arc<MarkCounter>>,
    chunk_size: usize,
    deadline: Option<Duration>,
) -> SentimentAnalysisPipeline<MarkCounter, ByteEncoder> {
    SentimentAnalysisPipeline::new(
        model,
        ByteEncoder,
        InferenceOptions {
            chunk_size,
            deadline,
        },
    )
    .expect("valid pipeline")
}
