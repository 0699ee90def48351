pub mod annotate;
pub mod classifier;
pub mod detector;
pub mod english_ratio;
pub mod errors;
#[cfg(feature = "fasttext")]
pub mod fasttext_model;
pub mod frequency;
pub mod model;
pub mod model_store;
pub mod normalize;
pub mod registry;
pub mod trigram;

#[cfg(test)]
mod tests;

pub use annotate::{ConfidenceNote, confidence_note};
pub use classifier::{ClassifierSlot, LanguageClassifier};
pub use detector::Detector;
pub use errors::{ClassifierError, DetectionError, FrequencyError};
#[cfg(feature = "fasttext")]
pub use fasttext_model::FastTextClassifier;
pub use frequency::EnglishFrequency;
pub use model::{DetectionSettings, Prediction};
pub use trigram::WhatlangClassifier;
