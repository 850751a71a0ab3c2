//! emoticart HTTP service.

use std::process;

use clap::Parser;
use emoticart::config::ServerConfig;
use emoticart::sentiment::SentimentAnalysisPipelineBuilder;
use emoticart::server::{self, AppState};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(config) {
        error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Load weights before the runtime starts; Hub downloads here are blocking.
    let mut builder = SentimentAnalysisPipelineBuilder::xlm_roberta(config.model_source())
        .chunk_size(config.chunk_size)
        .max_length(config.max_length);
    if let Some(index) = config.cuda {
        builder = builder.cuda(index);
    }
    if let Some(timeout) = config.request_timeout() {
        builder = builder.deadline(timeout);
    }
    let pipeline = builder.build()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(&config, AppState::new(pipeline)))?;
    Ok(())
}
