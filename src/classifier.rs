use crate::encode::FeatureVector;
use thiserror::Error;

/// Binary classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    WillNotBuy,
    WillBuy,
}

impl Label {
    /// Accepts exactly 0 or 1.
    pub fn from_raw(raw: f64) -> Result<Self, PredictError> {
        if raw == 1.0 {
            Ok(Label::WillBuy)
        } else if raw == 0.0 {
            Ok(Label::WillNotBuy)
        } else {
            Err(PredictError::UnexpectedLabel(raw))
        }
    }

    pub fn as_raw(self) -> u8 {
        match self {
            Label::WillNotBuy => 0,
            Label::WillBuy => 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("model returned {0}, expected a 0/1 label")]
    UnexpectedLabel(f64),
    #[error("model backend error: {0}")]
    Backend(String),
}

/// A trained model: one row in, one label out.
///
/// Implementations are loaded once and shared read-only across requests.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Label, PredictError>;
}

impl<F> Classifier for F
where
    F: Fn(&FeatureVector) -> Result<Label, PredictError> + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> Result<Label, PredictError> {
        self(features)
    }
}
