//! Sentiment and topic tagging for product reviews.
//!
//! Two independent classifiers run over each review:
//!
//! - [`sentiment`]: a fine-tuned XLM-RoBERTa model, powered by
//!   [Candle](https://github.com/huggingface/candle), labels text `Negative` or
//!   `Positive`. Inputs are scored in fixed-size chunks so memory stays bounded.
//! - [`topic`]: deterministic keyword matching buckets text into `functionality`,
//!   `quality`, `price` or `others`.
//!
//! [`bulk`] joins both onto an uploaded CSV, and [`server`] exposes everything over HTTP.

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod config;
pub mod error;
pub mod loaders;
pub mod server;

pub use pipelines::{bulk, sentiment, topic};
