// ============ Model capability traits ============

pub(crate) mod capabilities;

// ============ Model implementations ============

pub(crate) mod xlm_roberta;

pub use capabilities::{EncodedText, SequenceClassifier, TextEncoder};
pub use xlm_roberta::ReviewSentimentModel;
