use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use super::table::{ReviewTable, TEXT_COLUMN};
use crate::error::{PipelineError, Result};
use crate::models::capabilities::{SequenceClassifier, TextEncoder};
use crate::pipelines::sentiment::{SentimentAnalysisPipeline, SentimentLabel};
use crate::pipelines::topic::{KeywordIndex, Topic};

/// Column added with the sentiment label.
pub const SENTIMENT_COLUMN: &str = "sentiment";
/// Column added with the topic label.
pub const CATEGORY_COLUMN: &str = "category";

/// One input row with both labels attached, serialized as a JSON object.
///
/// Original columns keep their order; `sentiment` and `category` follow them (or replace
/// same-named input columns in place).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultRow(Map<String, Value>);

impl ResultRow {
    /// Field value by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Sentiment label string of this row.
    pub fn sentiment(&self) -> Option<&str> {
        self.get(SENTIMENT_COLUMN).and_then(Value::as_str)
    }

    /// Topic label string of this row.
    pub fn category(&self) -> Option<&str> {
        self.get(CATEGORY_COLUMN).and_then(Value::as_str)
    }

    /// Column names in output order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Join per-row labels back onto `table`.
///
/// # Errors
///
/// Returns [`PipelineError::Unexpected`] if either label list does not have one entry
/// per row.
pub fn assemble(
    table: &ReviewTable,
    sentiments: &[SentimentLabel],
    topics: &[Topic],
) -> Result<Vec<ResultRow>> {
    if sentiments.len() != table.len() || topics.len() != table.len() {
        return Err(PipelineError::Unexpected(format!(
            "Label count mismatch: {} rows, {} sentiments, {} topics",
            table.len(),
            sentiments.len(),
            topics.len()
        )));
    }

    let text_column = table.column(TEXT_COLUMN);

    Ok(table
        .rows()
        .iter()
        .zip(sentiments.iter().zip(topics))
        .map(|(row, (sentiment, topic))| {
            let mut fields = Map::with_capacity(row.len() + 2);
            for (i, (header, cell)) in table.headers().iter().zip(row).enumerate() {
                let value = if Some(i) == text_column {
                    Value::String(cell.clone())
                } else {
                    infer_cell_value(cell)
                };
                fields.insert(header.clone(), value);
            }
            fields.insert(
                SENTIMENT_COLUMN.to_string(),
                Value::String(sentiment.as_str().to_string()),
            );
            fields.insert(
                CATEGORY_COLUMN.to_string(),
                Value::String(topic.as_str().to_string()),
            );
            ResultRow(fields)
        })
        .collect())
}

/// Type a CSV cell for JSON output.
fn infer_cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if cell.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(int_val) = cell.parse::<i64>() {
        return Value::from(int_val);
    }
    if let Some(number) = cell
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
    {
        return Value::Number(number);
    }
    Value::String(cell.to_string())
}

/// Runs sentiment and topic classification over a whole table.
pub struct BulkAnalyzer<'a, M: SequenceClassifier, E: TextEncoder> {
    sentiment: &'a SentimentAnalysisPipeline<M, E>,
    keywords: &'a KeywordIndex,
}

impl<'a, M: SequenceClassifier, E: TextEncoder> BulkAnalyzer<'a, M, E> {
    /// Analyzer using the built-in keyword lists.
    pub fn new(sentiment: &'a SentimentAnalysisPipeline<M, E>) -> Self {
        Self {
            sentiment,
            keywords: KeywordIndex::global(),
        }
    }

    /// Analyzer with a custom keyword index.
    pub fn with_keywords(mut self, keywords: &'a KeywordIndex) -> Self {
        self.keywords = keywords;
        self
    }

    /// Label every row of `table`.
    ///
    /// The table is validated before any tokenization or inference; a failure anywhere
    /// fails the whole table.
    pub fn process(&self, table: &ReviewTable) -> Result<Vec<ResultRow>> {
        let texts = table.texts()?;
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let sentiments = self.sentiment.classify(&texts)?;
        let topics: Vec<Topic> = texts.iter().map(|t| self.keywords.classify(t)).collect();

        info!(rows = texts.len(), "labelled bulk upload");
        assemble(table, &sentiments, &topics)
    }
}
