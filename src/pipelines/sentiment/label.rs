use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Binary sentiment outcome, indexed the way the classifier head orders its outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Class index 0.
    Negative,
    /// Class index 1.
    Positive,
}

impl SentimentLabel {
    /// Number of sentiment classes the model must score.
    pub const COUNT: usize = 2;

    /// Label for a class index.
    pub fn from_index(index: u32) -> Result<Self> {
        match index {
            0 => Ok(SentimentLabel::Negative),
            1 => Ok(SentimentLabel::Positive),
            other => Err(PipelineError::Unexpected(format!(
                "Predicted class index {other} has no sentiment label"
            ))),
        }
    }

    /// Class index of this label.
    pub fn index(self) -> u32 {
        match self {
            SentimentLabel::Negative => 0,
            SentimentLabel::Positive => 1,
        }
    }

    /// `"Negative"` or `"Positive"`.
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
