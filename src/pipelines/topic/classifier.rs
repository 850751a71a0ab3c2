use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::keywords::{FUNCTIONALITY_KEYWORDS, PRICE_KEYWORDS, QUALITY_KEYWORDS};

/// Topical bucket of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Whether the product works.
    Functionality,
    /// Build quality and finish.
    Quality,
    /// Cost and value.
    Price,
    /// No keyword matched.
    Others,
}

impl Topic {
    /// Scored topics in tie-break order: on equal scores the earlier topic wins.
    pub const PRIORITY: [Topic; 3] = [Topic::Functionality, Topic::Quality, Topic::Price];

    /// Lowercase name, as emitted in results.
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Functionality => "functionality",
            Topic::Quality => "quality",
            Topic::Price => "price",
            Topic::Others => "others",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword hit counts for one text, in [`Topic::PRIORITY`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicScores([u32; 3]);

impl TopicScores {
    /// Hits for a scored topic. [`Topic::Others`] is never scored and returns 0.
    pub fn get(&self, topic: Topic) -> u32 {
        Topic::PRIORITY
            .iter()
            .position(|t| *t == topic)
            .map_or(0, |i| self.0[i])
    }

    /// Topic with the most hits, earliest in priority order on ties; `Others` if nothing hit.
    pub fn best(&self) -> Topic {
        let mut best: Option<(Topic, u32)> = None;
        for (topic, &score) in Topic::PRIORITY.iter().zip(self.0.iter()) {
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((*topic, score));
            }
        }
        best.map_or(Topic::Others, |(topic, _)| topic)
    }
}

/// Keyword sets per scored topic.
#[derive(Debug, Clone)]
pub struct KeywordIndex {
    sets: [HashSet<&'static str>; 3],
}

static DEFAULT_INDEX: Lazy<KeywordIndex> = Lazy::new(|| {
    KeywordIndex::new(FUNCTIONALITY_KEYWORDS, QUALITY_KEYWORDS, PRICE_KEYWORDS)
});

impl KeywordIndex {
    /// Index over the given lists, in [`Topic::PRIORITY`] order.
    pub fn new(
        functionality: &[&'static str],
        quality: &[&'static str],
        price: &[&'static str],
    ) -> Self {
        let set = |words: &[&'static str]| words.iter().copied().collect::<HashSet<_>>();
        Self {
            sets: [set(functionality), set(quality), set(price)],
        }
    }

    /// The built-in review keyword lists, built once per process.
    pub fn global() -> &'static KeywordIndex {
        &DEFAULT_INDEX
    }

    /// Whether `word` is listed under `topic`.
    pub fn contains(&self, topic: Topic, word: &str) -> bool {
        Topic::PRIORITY
            .iter()
            .position(|t| *t == topic)
            .is_some_and(|i| self.sets[i].contains(word))
    }

    /// Count whole-token keyword hits per topic.
    ///
    /// The text is lowercased and split on whitespace only: `"works."` does not match
    /// `"works"`, and `"malfunctioning"` does not match `"malfunction"`.
    pub fn score(&self, text: &str) -> TopicScores {
        let lowered = text.to_lowercase();
        let mut counts = [0u32; 3];
        for word in lowered.split_whitespace() {
            for (count, set) in counts.iter_mut().zip(self.sets.iter()) {
                if set.contains(word) {
                    *count += 1;
                }
            }
        }
        TopicScores(counts)
    }

    /// Topic for `text`.
    pub fn classify(&self, text: &str) -> Topic {
        self.score(text).best()
    }
}

/// Topic for `text` using the built-in keyword lists.
///
/// Accepts any string; empty or keyword-free text yields [`Topic::Others`].
pub fn classify_topic(text: &str) -> Topic {
    KeywordIndex::global().classify(text)
}
