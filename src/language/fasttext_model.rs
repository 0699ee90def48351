use std::path::Path;

use fasttext::FastText;
use tracing::{info, instrument};

use crate::language::{classifier::LanguageClassifier, errors::ClassifierError};

/// fastText supervised model (e.g. `lid.176.bin`).
///
/// Inference only reads the model, so one instance serves concurrent callers.
pub struct FastTextClassifier {
    model: FastText,
    label_count: usize,
}

impl FastTextClassifier {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| ClassifierError::Load(format!("non UTF-8 model path: {}", path.display())))?;

        info!("Loading fastText model");
        let mut model = FastText::new();
        model.load_model(path_str).map_err(ClassifierError::Load)?;

        let (labels, _counts) = model.get_labels().map_err(ClassifierError::Load)?;
        info!(labels = labels.len(), "fastText model loaded");

        Ok(Self {
            model,
            label_count: labels.len(),
        })
    }
}

impl LanguageClassifier for FastTextClassifier {
    fn classify(&self, text: &str, k: usize) -> Result<Vec<(String, f32)>, ClassifierError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let line = prediction_line(text);
        let k = i32::try_from(k).unwrap_or(i32::MAX);

        let predictions = self
            .model
            .predict(&line, k, 0.0)
            .map_err(ClassifierError::Inference)?;

        Ok(predictions
            .into_iter()
            .map(|prediction| (prediction.label, prediction.prob.clamp(0.0, 1.0)))
            .collect())
    }

    fn name(&self) -> &'static str {
        "fasttext"
    }

    fn label_count(&self) -> usize {
        self.label_count
    }
}

/// fastText predicts one line at a time and receives it as a C string, so
/// line breaks and NUL bytes must not reach it.
fn prediction_line(text: &str) -> String {
    text.replace(['\n', '\r', '\0'], " ")
}
