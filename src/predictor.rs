use crate::classifier::{Classifier, Label, PredictError};
use crate::encode::encode;
use crate::prospect::{Field, InputError, ProspectInput};

pub const FILL_ALL_FIELDS: &str = "Please fill out all fields before predicting.";
pub const WILL_BUY: &str = "The customer will buy the insurance.";
pub const WILL_NOT_BUY: &str = "The customer will not buy the insurance.";
pub const PREDICTION_FAILED: &str = "Prediction failed. Please try again.";

/// Result banner styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Error => "error",
            Tone::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub tone: Tone,
    pub message: String,
}

/// Outcome of one submission.
#[derive(Debug)]
pub enum Assessment {
    Incomplete(Vec<Field>),
    OutOfRange(InputError),
    Predicted(Label),
    Failed(PredictError),
}

impl Assessment {
    pub fn banner(&self) -> Banner {
        let (tone, message) = match self {
            Assessment::Incomplete(_) => (Tone::Warning, FILL_ALL_FIELDS.to_string()),
            Assessment::OutOfRange(err) => (Tone::Warning, out_of_range_message(err)),
            Assessment::Predicted(Label::WillBuy) => (Tone::Success, WILL_BUY.to_string()),
            Assessment::Predicted(Label::WillNotBuy) => (Tone::Error, WILL_NOT_BUY.to_string()),
            Assessment::Failed(_) => (Tone::Error, PREDICTION_FAILED.to_string()),
        };
        Banner { tone, message }
    }
}

fn out_of_range_message(err: &InputError) -> String {
    match err {
        InputError::OutOfRange { field, bounds, .. } => {
            let kind = if bounds.whole { "a whole number" } else { "a number" };
            match bounds.max {
                Some(max) => {
                    format!("{} must be {} between {} and {}.", field, kind, bounds.min, max)
                }
                None => format!("{} must be {} of at least {}.", field, kind, bounds.min),
            }
        }
        InputError::Incomplete(_) => FILL_ALL_FIELDS.to_string(),
    }
}

/// Validate, encode and classify one submission.
///
/// The classifier is only called for a complete, in-range input.
pub fn assess(input: &ProspectInput, classifier: &dyn Classifier) -> Assessment {
    let prospect = match input.complete() {
        Ok(p) => p,
        Err(InputError::Incomplete(missing)) => {
            tracing::debug!(?missing, "submission incomplete");
            return Assessment::Incomplete(missing);
        }
        Err(err) => {
            tracing::debug!(%err, "submission out of range");
            return Assessment::OutOfRange(err);
        }
    };

    let features = encode(&prospect);

    if std::env::var("LOG_PRED").ok().as_deref() == Some("1") {
        let sample: Vec<String> = features
            .named()
            .map(|(name, v)| format!("{}={:.3}", name, v))
            .collect();
        tracing::info!("encoded in_dim={} sample=[{}]", sample.len(), sample.join(", "));
    }

    match classifier.predict(&features) {
        Ok(label) => {
            tracing::info!(label = label.as_raw(), "prediction ok");
            Assessment::Predicted(label)
        }
        Err(err) => {
            tracing::error!(%err, "prediction failed");
            Assessment::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::FeatureVector;
    use crate::prospect::{Gender, VehicleAge, YesNo};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn filled() -> ProspectInput {
        ProspectInput {
            gender: Some(Gender::Male),
            age: 30.0,
            driving_license: Some(YesNo::Yes),
            region_code: 8.0,
            previously_insured: Some(YesNo::No),
            vehicle_age: Some(VehicleAge::OneToTwoYears),
            vehicle_damage: Some(YesNo::Yes),
            annual_premium: 2630.0,
            sales_channel: 152.0,
            vintage: 12.0,
        }
    }

    fn constant(label: Label) -> impl Fn(&FeatureVector) -> Result<Label, PredictError> {
        move |_| Ok(label)
    }

    #[test]
    fn positive_label_is_success() {
        let a = assess(&filled(), &constant(Label::WillBuy));
        assert_eq!(
            a.banner(),
            Banner { tone: Tone::Success, message: WILL_BUY.to_string() }
        );
    }

    #[test]
    fn negative_label_is_error_styled() {
        let a = assess(&filled(), &constant(Label::WillNotBuy));
        assert_eq!(a.banner().tone, Tone::Error);
        assert_eq!(a.banner().message, WILL_NOT_BUY);
    }

    #[test]
    fn model_failure_is_reported_not_raised() {
        let broken = |_: &FeatureVector| -> Result<Label, PredictError> {
            Err(PredictError::Backend("corrupt weights".into()))
        };
        let a = assess(&filled(), &broken);
        assert!(matches!(a, Assessment::Failed(_)));
        assert_eq!(a.banner().message, PREDICTION_FAILED);
    }

    #[test]
    fn incomplete_input_never_reaches_model() {
        let calls = AtomicUsize::new(0);
        let counting = |_: &FeatureVector| -> Result<Label, PredictError> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Label::WillBuy)
        };

        let mut input = filled();
        input.previously_insured = None;
        let a = assess(&input, &counting);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(matches!(&a, Assessment::Incomplete(m) if m == &[Field::PreviouslyInsured]));
        assert_eq!(
            a.banner(),
            Banner { tone: Tone::Warning, message: FILL_ALL_FIELDS.to_string() }
        );
    }

    #[test]
    fn out_of_range_never_reaches_model() {
        let calls = AtomicUsize::new(0);
        let counting = |_: &FeatureVector| -> Result<Label, PredictError> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Label::WillBuy)
        };

        let mut input = filled();
        input.sales_channel = 0.0;
        let a = assess(&input, &counting);
        assert_eq!(a.banner().tone, Tone::Warning);
        assert_eq!(a.banner().message, "sales_channel must be a whole number between 1 and 200.");

        input.sales_channel = 26.0;
        input.region_code = -1.0;
        let a = assess(&input, &counting);
        assert_eq!(a.banner().message, "region_code must be a whole number of at least 0.");

        input.region_code = 8.0;
        input.annual_premium = f64::NAN;
        let a = assess(&input, &counting);
        assert_eq!(a.banner().message, "annual_premium must be a number between 1000 and 100000.");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn model_sees_encoded_row() {
        let check = |f: &FeatureVector| -> Result<Label, PredictError> {
            assert_eq!(
                f.as_slice(),
                &[1.0, 30.0, 1.0, 8.0, 0.0, 1.0, 2630.0, 152.0, 12.0, 0.0, 0.0]
            );
            Ok(Label::WillNotBuy)
        };
        assert!(matches!(
            assess(&filled(), &check),
            Assessment::Predicted(Label::WillNotBuy)
        ));
    }
}
