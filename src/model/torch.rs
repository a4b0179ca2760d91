use super::meta::ModelMeta;
use crate::classifier::{Classifier, Label, PredictError};
use crate::encode::{FeatureVector, N_FEATURES};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tch::{kind::Kind, CModule, Device, Tensor};

/// TorchScript export of the trained response model.
pub struct TorchClassifier {
    model: CModule,
    device: Device,
    meta: ModelMeta,
}

impl TorchClassifier {
    pub fn load(model_path: &Path, meta_path: &Path) -> Result<Self> {
        let device = Device::Cpu;

        // Column order first: a model fitted on other columns is useless.
        let meta = ModelMeta::load(meta_path)?;

        let model = CModule::load_on_device(model_path, device)
            .with_context(|| format!("failed to load TorchScript {}", model_path.display()))?;

        let this = Self { model, device, meta };

        // Dummy forward on a zero row, expect one value per output slot
        let warmup = this
            .forward(&FeatureVector::from([0.0; N_FEATURES]))
            .context("warmup forward failed")?;
        if warmup.len() != this.meta.output.expected_len() {
            bail!(
                "model emits {} values per row, {:?} output needs {}",
                warmup.len(),
                this.meta.output,
                this.meta.output.expected_len()
            );
        }
        tracing::info!(output = ?this.meta.output, "warmup forward ok");

        Ok(this)
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    fn forward(&self, features: &FeatureVector) -> Result<Vec<f64>, PredictError> {
        // The exported weights are float32; the row is narrowed only here.
        let x: Vec<f32> = features.as_slice().iter().map(|v| *v as f32).collect();
        let input = Tensor::from_slice(&x)
            .reshape([1, N_FEATURES as i64])
            .to_device(self.device);

        let out = tch::no_grad(|| self.model.forward_ts(&[input]))
            .map_err(|e| PredictError::Backend(e.to_string()))?;

        let sz = out.size();
        if sz.first().copied().unwrap_or(1) != 1 || sz.len() > 2 {
            return Err(PredictError::Backend(format!("unexpected output size: {:?}", sz)));
        }

        let flat = out.flatten(0, -1).to_kind(Kind::Double);
        let n = flat.size().first().copied().unwrap_or(0);
        Ok((0..n).map(|i| flat.double_value(&[i])).collect())
    }
}

impl Classifier for TorchClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Label, PredictError> {
        let out = self.forward(features)?;
        self.meta.interpret(&out)
    }
}
