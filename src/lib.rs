//! Vehicle insurance response predictor: a one-page form whose submission is
//! encoded into the trained model's feature order and classified.

pub mod classifier;
pub mod config;
pub mod encode;
pub mod model;
pub mod page;
pub mod predictor;
pub mod prospect;
pub mod server;

pub use classifier::{Classifier, Label, PredictError};
pub use encode::{encode, FeatureVector, FEATURE_NAMES};
pub use predictor::{assess, Assessment, Banner, Tone};
pub use prospect::{CompleteProspect, Gender, InputError, ProspectInput, VehicleAge, YesNo};
