//! Rule-based topic tagging.
//!
//! Assigns each review to `functionality`, `quality`, `price` or `others` by counting
//! whole-word hits against three fixed keyword lists (English and Filipino). Scoring is
//! deterministic and needs no model.
//!
//! ```rust
//! use emoticart::topic::{classify_topic, Topic};
//!
//! assert_eq!(classify_topic("works great"), Topic::Functionality);
//! assert_eq!(classify_topic("overpriced junk"), Topic::Price);
//! assert_eq!(classify_topic("xyz abc 123"), Topic::Others);
//! ```

pub(crate) mod classifier;
pub(crate) mod keywords;

pub use classifier::{classify_topic, KeywordIndex, Topic, TopicScores};
