//! Bulk CSV labelling.
//!
//! Reads an uploaded CSV with a `text` column, labels every row with a sentiment and a
//! topic, and returns the original rows with `sentiment` and `category` columns added.
//! Validation happens before any inference: a table without a `text` column never
//! reaches the tokenizer.
//!
//! ```rust,no_run
//! use emoticart::bulk::{BulkAnalyzer, ReviewTable};
//! use emoticart::loaders::ModelSource;
//! use emoticart::sentiment::SentimentAnalysisPipelineBuilder;
//!
//! # fn main() -> emoticart::error::Result<()> {
//! let source = ModelSource::local("custom_xlm_roberta_model.pth", "./model");
//! let pipeline = SentimentAnalysisPipelineBuilder::xlm_roberta(source).build()?;
//!
//! let table = ReviewTable::from_csv_bytes(b"text\nworks great\noverpriced junk\n")?;
//! let rows = BulkAnalyzer::new(&pipeline).process(&table)?;
//! println!("{}", serde_json::to_string(&rows)?);
//! # Ok(())
//! # }
//! ```

pub(crate) mod assembler;
pub(crate) mod table;

pub use assembler::{assemble, BulkAnalyzer, ResultRow, CATEGORY_COLUMN, SENTIMENT_COLUMN};
pub use table::{ReviewTable, TEXT_COLUMN};
