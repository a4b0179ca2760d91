use crate::classifier::{Label, PredictError};
use crate::encode::{FEATURE_NAMES, N_FEATURES};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// How the exported module's output should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// A single value that is already 0 or 1.
    #[default]
    Label,
    /// A single positive-class probability, compared against `threshold`.
    Probability,
    /// Two scores `[no_buy, buy]`; the larger wins.
    ClassScores,
}

impl OutputKind {
    pub fn expected_len(self) -> usize {
        match self {
            OutputKind::Label | OutputKind::Probability => 1,
            OutputKind::ClassScores => 2,
        }
    }
}

/// Sidecar JSON written next to the exported model.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelMeta {
    pub feat_list: Vec<String>,
    pub in_dim: Option<usize>,
    #[serde(default)]
    pub output: OutputKind,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl ModelMeta {
    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read meta at {}", path.display()))?;
        let meta: ModelMeta = serde_json::from_str(&txt)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        meta.validate()?;
        Ok(meta)
    }

    /// The model must have been trained on our exact column order.
    pub fn validate(&self) -> Result<()> {
        let in_dim = self.in_dim.unwrap_or(self.feat_list.len());
        if in_dim != N_FEATURES {
            bail!("model expects {} inputs, encoder produces {}", in_dim, N_FEATURES);
        }
        if self.feat_list.len() != N_FEATURES {
            bail!(
                "feat_list has {} entries, encoder produces {}",
                self.feat_list.len(),
                N_FEATURES
            );
        }
        for (i, (got, want)) in self.feat_list.iter().zip(FEATURE_NAMES).enumerate() {
            if got != want {
                bail!("feature {} is `{}` in the model, `{}` in the encoder", i, got, want);
            }
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            bail!("threshold {} is not a probability", self.threshold);
        }
        Ok(())
    }

    /// Turns the flattened model output for one row into a label.
    pub fn interpret(&self, output: &[f64]) -> Result<Label, PredictError> {
        if output.len() != self.output.expected_len() {
            return Err(PredictError::Backend(format!(
                "unexpected output length {} for {:?}",
                output.len(),
                self.output
            )));
        }
        match self.output {
            OutputKind::Label => Label::from_raw(output[0].round()),
            OutputKind::Probability => {
                let p = output[0];
                if !(0.0..=1.0).contains(&p) {
                    return Err(PredictError::Backend(format!("probability {p} out of range")));
                }
                Ok(if p >= self.threshold { Label::WillBuy } else { Label::WillNotBuy })
            }
            OutputKind::ClassScores => {
                Ok(if output[1] > output[0] { Label::WillBuy } else { Label::WillNotBuy })
            }
        }
    }
}
