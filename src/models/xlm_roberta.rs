use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::{layer_norm, linear, LayerNorm, Linear, Module, VarBuilder};
use candle_transformers::models::xlm_roberta::{Config, XLMRobertaModel};
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::loaders::ModelSource;
use crate::models::capabilities::SequenceClassifier;
use crate::pipelines::sentiment::{SentimentLabel, TokenBatch};

/// Width of the hidden layer between the pooled encoder output and the class scores.
const HEAD_HIDDEN: usize = 512;
/// PyTorch's default `LayerNorm` epsilon.
const HEAD_LAYER_NORM_EPS: f64 = 1e-5;

/// `Linear -> LayerNorm -> ReLU -> Linear` over the pooled sentence vector.
///
/// Tensor names follow the `nn.Sequential` the weights were trained with. Dropout
/// (index 3, and on the pooled output) is identity at inference time.
struct ClassifierHead {
    dense: Linear,
    norm: LayerNorm,
    out_proj: Linear,
}

impl ClassifierHead {
    fn load(vb: VarBuilder, hidden_size: usize, num_labels: usize) -> candle_core::Result<Self> {
        Ok(Self {
            dense: linear(hidden_size, HEAD_HIDDEN, vb.pp("0"))?,
            norm: layer_norm(HEAD_HIDDEN, HEAD_LAYER_NORM_EPS, vb.pp("1"))?,
            out_proj: linear(HEAD_HIDDEN, num_labels, vb.pp("4"))?,
        })
    }
}

impl Module for ClassifierHead {
    fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        let xs = self.dense.forward(xs)?;
        let xs = self.norm.forward(&xs)?.relu()?;
        self.out_proj.forward(&xs)
    }
}

/// Binary review sentiment classifier: an XLM-RoBERTa encoder, the RoBERTa pooler
/// (dense + tanh over the first token) and a small MLP head.
pub struct ReviewSentimentModel {
    encoder: XLMRobertaModel,
    pooler: Linear,
    head: ClassifierHead,
    device: Device,
}

impl ReviewSentimentModel {
    /// Resolve every file in `source` and load the weights onto `device`.
    pub fn load(source: &ModelSource, device: &Device) -> Result<Self> {
        let config_path = source.encoder_config.resolve()?;
        let weights_path = source.weights.resolve()?;
        info!(
            config = %config_path.display(),
            weights = %weights_path.display(),
            "loading sentiment model"
        );

        let config: Config = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;

        let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
        } else {
            VarBuilder::from_pth(&weights_path, DType::F32, device)?
        };

        Self::from_var_builder(&config, vb, device.clone())
    }

    /// Build the model from an already opened set of tensors.
    ///
    /// Expects the `roberta.*` encoder tensors and `classifier.{0,1,4}.*` head tensors.
    pub fn from_var_builder(config: &Config, vb: VarBuilder, device: Device) -> Result<Self> {
        let roberta = vb.pp("roberta");
        let encoder = XLMRobertaModel::new(config, roberta.clone())
            .map_err(|e| PipelineError::Unexpected(format!("Failed to load encoder: {e}")))?;
        let pooler = linear(
            config.hidden_size,
            config.hidden_size,
            roberta.pp("pooler").pp("dense"),
        )?;
        let head = ClassifierHead::load(
            vb.pp("classifier"),
            config.hidden_size,
            SentimentLabel::COUNT,
        )?;

        Ok(Self {
            encoder,
            pooler,
            head,
            device,
        })
    }
}

impl SequenceClassifier for ReviewSentimentModel {
    fn num_labels(&self) -> usize {
        SentimentLabel::COUNT
    }

    fn score(&self, batch: &TokenBatch) -> Result<Tensor> {
        let (input_ids, attention_mask) = batch.to_tensors(&self.device)?;
        // XLM-R has a single segment type.
        let token_type_ids = input_ids.zeros_like()?;

        let hidden = self.encoder.forward(
            &input_ids,
            &attention_mask,
            &token_type_ids,
            None,
            None,
            None,
        )?;
        let first_token = hidden.i((.., 0))?;
        let pooled = self.pooler.forward(&first_token)?.tanh()?;

        Ok(self.head.forward(&pooled)?)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
