use candle_core::{Device, Tensor};

use crate::error::{PipelineError, Result};
use crate::models::capabilities::TextEncoder;

/// A padded, rectangular encoding of one chunk of texts.
///
/// Every row has the length of the longest encoding in the chunk. Padding positions
/// carry the encoder's pad id and a mask of 0.
#[derive(Debug, Clone)]
pub struct TokenBatch {
    ids: Vec<u32>,
    attention_mask: Vec<u32>,
    rows: usize,
    seq_len: usize,
}

impl TokenBatch {
    /// Encode `texts` and pad them to the longest row.
    ///
    /// `first_row` is the position of `texts[0]` in the full input and is only used to
    /// name the offending row when the encoder rejects a text.
    pub fn encode<E: TextEncoder + ?Sized>(
        encoder: &E,
        texts: &[&str],
        first_row: usize,
    ) -> Result<Self> {
        if texts.is_empty() {
            return Err(PipelineError::InputValidation(
                "Cannot build a token batch from zero texts".to_string(),
            ));
        }

        let encodings = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                encoder.encode_text(text).map_err(|e| {
                    PipelineError::Tokenization(format!(
                        "Tokenization failed on row {} ('{}'): {}",
                        first_row + i,
                        text.chars().take(50).collect::<String>(),
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let pad_id = encoder.pad_id();
        let seq_len = encodings.iter().map(|e| e.ids.len()).max().unwrap_or(0);

        let mut ids = Vec::with_capacity(texts.len() * seq_len);
        let mut attention_mask = Vec::with_capacity(texts.len() * seq_len);

        for encoding in encodings {
            let mut row_ids = encoding.ids;
            let mut row_mask = encoding.attention_mask;
            row_ids.resize(seq_len, pad_id);
            row_mask.resize(seq_len, 0);
            ids.extend(row_ids);
            attention_mask.extend(row_mask);
        }

        Ok(Self {
            ids,
            attention_mask,
            rows: texts.len(),
            seq_len,
        })
    }

    /// Number of texts in the batch.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Padded length shared by every row.
    pub fn seq_len(&self) -> usize {
        self.seq_len
    }

    /// Token ids of one row, padding included.
    pub fn row_ids(&self, row: usize) -> &[u32] {
        &self.ids[row * self.seq_len..(row + 1) * self.seq_len]
    }

    /// Attention mask of one row.
    pub fn row_mask(&self, row: usize) -> &[u32] {
        &self.attention_mask[row * self.seq_len..(row + 1) * self.seq_len]
    }

    /// `(input_ids, attention_mask)` tensors of shape `(rows, seq_len)`.
    pub fn to_tensors(&self, device: &Device) -> Result<(Tensor, Tensor)> {
        let shape = (self.rows, self.seq_len);
        let input_ids = Tensor::from_slice(&self.ids, shape, device)?;
        let attention_mask = Tensor::from_slice(&self.attention_mask, shape, device)?;
        Ok((input_ids, attention_mask))
    }
}

/// Lazily split `texts` into contiguous chunks of `chunk_size` and encode each one.
///
/// Batches are produced one at a time so only a single chunk's encoding is alive
/// while the caller scores it.
pub fn token_batches<'a, E: TextEncoder + ?Sized>(
    encoder: &'a E,
    texts: &'a [&'a str],
    chunk_size: usize,
) -> impl Iterator<Item = Result<TokenBatch>> + 'a {
    let chunk_size = chunk_size.max(1);
    texts
        .chunks(chunk_size)
        .enumerate()
        .map(move |(chunk, texts)| TokenBatch::encode(encoder, texts, chunk * chunk_size))
}
