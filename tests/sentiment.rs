//! Chunked sentiment inference against a deterministic stub model.

mod common;

use std::sync::Arc;
use std::time::Duration;

use std::sync::atomic::Ordering;

use common::{pipeline, pipeline_with, ByteEncoder, CountingEncoder, MarkCounter};
use emoticart::error::PipelineError;
use emoticart::sentiment::{InferenceOptions, SentimentAnalysisPipeline, SentimentLabel};

use SentimentLabel::{Negative, Positive};

fn reviews() -> Vec<String> {
    (0..23)
        .map(|i| match i % 4 {
            0 => format!("review {i} ++ love it"),
            1 => format!("review {i} -- broke after a week, returned it"),
            2 => format!("{i} +"),
            _ => format!("meh {i}"),
        })
        .collect()
}

#[test]
fn labels_do_not_depend_on_chunk_size() -> anyhow::Result<()> {
    let texts = reviews();
    let texts: Vec<&str> = texts.iter().map(String::as_str).collect();

    let baseline = pipeline(1).classify(&texts)?;
    assert_eq!(baseline.len(), texts.len());

    for chunk_size in [2, 3, 7, 22, 23, 64] {
        assert_eq!(
            pipeline(chunk_size).classify(&texts)?,
            baseline,
            "chunk_size = {chunk_size}"
        );
    }
    Ok(())
}

#[test]
fn labels_follow_input_order() -> anyhow::Result<()> {
    let labels = pipeline(2).classify(&["+", "-", "no marks", "+ + -", "-", "+"])?;
    assert_eq!(
        labels,
        vec![Positive, Negative, Negative, Positive, Negative, Positive]
    );
    Ok(())
}

#[test]
fn padding_does_not_leak_into_short_rows() -> anyhow::Result<()> {
    // The long neighbour forces heavy padding on the short row.
    let long = format!("+{}", " ".repeat(200));
    let labels = pipeline(2).classify(&["+", &long])?;
    assert_eq!(labels, vec![Positive, Positive]);
    assert_eq!(pipeline(2).classify(&["-", &long])?, vec![Negative, Positive]);
    Ok(())
}

#[test]
fn ties_decode_to_negative() -> anyhow::Result<()> {
    let output = pipeline(4).run(&["+-", ""])?;
    for prediction in &output.predictions {
        assert_eq!(prediction.label, Negative);
        assert!((prediction.score - 0.5).abs() < 1e-6);
    }
    Ok(())
}

#[test]
fn scores_are_probabilities() -> anyhow::Result<()> {
    let output = pipeline(8).run(&["+++", "--", "+"])?;
    for prediction in &output.predictions {
        assert!(prediction.score > 0.5 && prediction.score <= 1.0);
    }
    assert_eq!(output.stats.items_processed, 3);
    assert_eq!(output.stats.chunks, 1);
    Ok(())
}

#[test]
fn predict_matches_batch_label() -> anyhow::Result<()> {
    let texts = reviews();
    let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
    let batch = pipeline(5).classify(&texts)?;

    let single = pipeline(5);
    for (text, label) in texts.iter().zip(&batch) {
        assert_eq!(single.predict(text)?, label.index());
    }
    Ok(())
}

#[test]
fn empty_input_never_calls_the_model() -> anyhow::Result<()> {
    let model = Arc::new(MarkCounter::new());
    let pipeline = pipeline_with(Arc::clone(&model), 4, None);

    let output = pipeline.run(&[])?;
    assert!(output.predictions.is_empty());
    assert_eq!(output.stats.chunks, 0);
    assert_eq!(model.calls(), 0);
    Ok(())
}

#[test]
fn model_is_called_once_per_chunk() -> anyhow::Result<()> {
    let model = Arc::new(MarkCounter::new());
    let pipeline = pipeline_with(Arc::clone(&model), 4, None);

    let texts = ["+"; 10];
    pipeline.classify(&texts)?;
    assert_eq!(model.calls(), 3);
    Ok(())
}

#[test]
fn failing_chunk_fails_the_whole_call() {
    let texts = ["+", "-", "+", "-", "ok!", "+"];
    let err = pipeline(2).classify(&texts).unwrap_err();
    match err {
        PipelineError::Inference { chunk, message } => {
            assert_eq!(chunk, 2);
            assert!(message.contains("device lost"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tokenization_failure_is_reported_before_scoring() {
    let model = Arc::new(MarkCounter::new());
    let pipeline = pipeline_with(Arc::clone(&model), 3, None);

    let err = pipeline.classify(&["+", "bad\u{0}"]).unwrap_err();
    assert!(matches!(err, PipelineError::Tokenization(_)));
    assert!(err.is_client_error());
    assert_eq!(model.calls(), 0);
}

#[test]
fn zero_chunk_size_is_rejected() {
    let result = SentimentAnalysisPipeline::new(
        MarkCounter::new(),
        ByteEncoder,
        InferenceOptions {
            chunk_size: 0,
            deadline: None,
        },
    );
    assert!(matches!(result, Err(PipelineError::InputValidation(_))));
}

#[test]
fn deadline_stops_between_chunks() {
    let model = Arc::new(MarkCounter::with_delay(Duration::from_millis(30)));
    let pipeline = pipeline_with(
        Arc::clone(&model),
        1,
        Some(Duration::from_millis(5)),
    );

    let err = pipeline.classify(&["+", "+", "+"]).unwrap_err();
    match err {
        PipelineError::DeadlineExceeded { chunk, elapsed } => {
            assert_eq!(chunk, 1);
            assert!(elapsed >= Duration::from_millis(5));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(model.calls(), 1);
}

#[test]
fn expired_deadline_skips_tokenizing_the_next_chunk() {
    let encoder = CountingEncoder::default();
    let encoded = Arc::clone(&encoder.encoded);
    let pipeline = SentimentAnalysisPipeline::new(
        MarkCounter::with_delay(Duration::from_millis(30)),
        encoder,
        InferenceOptions {
            chunk_size: 2,
            deadline: Some(Duration::from_millis(5)),
        },
    )
    .expect("valid pipeline");

    let err = pipeline.classify(&["+", "+", "-", "-", "+"]).unwrap_err();
    assert!(matches!(err, PipelineError::DeadlineExceeded { chunk: 1, .. }));
    assert_eq!(encoded.load(Ordering::SeqCst), 2);
}

#[test]
fn deadline_is_not_checked_after_the_last_chunk() -> anyhow::Result<()> {
    let pipeline = pipeline_with(
        MarkCounter::with_delay(Duration::from_millis(30)),
        4,
        Some(Duration::from_millis(5)),
    );
    assert_eq!(pipeline.classify(&["+", "-"])?, vec![Positive, Negative]);
    Ok(())
}

#[test]
fn pipeline_is_shareable_across_threads() -> anyhow::Result<()> {
    let pipeline = Arc::new(pipeline(3));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            std::thread::spawn(move || pipeline.classify(&["+", "-", "+ +", "--"]))
        })
        .collect();

    for handle in handles {
        let labels = handle.join().expect("worker panicked")?;
        assert_eq!(labels, vec![Positive, Negative, Positive, Negative]);
    }
    Ok(())
}
