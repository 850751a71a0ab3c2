//! Model capability traits.
//!
//! The sentiment pipeline only needs two things from the outside world: something
//! that turns text into token ids, and something that turns a padded batch of ids into
//! per-class scores. Both sit behind traits so the orchestration can be driven by a
//! deterministic stub in tests.

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};
use crate::pipelines::sentiment::TokenBatch;

// ============ Tokenization ============

/// Token ids and attention mask for one text, before padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    /// Token ids, already truncated to the encoder's maximum length.
    pub ids: Vec<u32>,
    /// 1 for real tokens, same length as `ids`.
    pub attention_mask: Vec<u32>,
}

/// Turns raw text into token ids.
///
/// Implementations own the truncation policy; padding is applied afterwards by
/// [`TokenBatch`].
pub trait TextEncoder {
    /// Encode one text, adding special tokens.
    fn encode_text(&self, text: &str) -> Result<EncodedText>;

    /// Id used to pad shorter rows in a batch.
    fn pad_id(&self) -> u32;
}

impl TextEncoder for Tokenizer {
    fn encode_text(&self, text: &str) -> Result<EncodedText> {
        let encoding = self
            .encode(text, true)
            .map_err(|e| PipelineError::Tokenization(e.to_string()))?;

        Ok(EncodedText {
            ids: encoding.get_ids().to_vec(),
            attention_mask: encoding.get_attention_mask().to_vec(),
        })
    }

    fn pad_id(&self) -> u32 {
        self.get_padding()
            .map(|p| p.pad_id)
            .or_else(|| self.token_to_id("<pad>"))
            .or_else(|| self.token_to_id("[PAD]"))
            .unwrap_or(0)
    }
}

// ============ Sequence classification ============

/// A sequence classifier with frozen weights.
///
/// Scoring takes `&self`: no call may mutate weights or keep gradient state, so a
/// single instance can be shared by every request.
pub trait SequenceClassifier {
    /// Number of classes in each score row.
    fn num_labels(&self) -> usize;

    /// Raw (pre-softmax) class scores with shape `(batch.rows(), num_labels())`.
    fn score(&self, batch: &TokenBatch) -> Result<Tensor>;

    /// Device the weights live on.
    fn device(&self) -> &Device;
}
