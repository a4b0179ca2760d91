//! Loading the trained model artifact from disk.

pub mod meta;
#[cfg(feature = "torch")]
pub mod torch;

pub use meta::{ModelMeta, OutputKind};
#[cfg(feature = "torch")]
pub use torch::TorchClassifier;
