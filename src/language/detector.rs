use std::sync::Arc;

use tracing::{info, instrument};

use crate::language::{
    classifier::{ClassifierSlot, strip_label},
    english_ratio::english_word_ratio,
    errors::DetectionError,
    frequency::EnglishFrequency,
    model::{DetectionSettings, Prediction, round_confidence},
    normalize::{normalize, word_count},
    registry::{HINGLISH_CODE, HINGLISH_NAME, name_for},
};

const ENGLISH_CODE: &str = "en";

/// Detection pipeline: normalize, classify, name, then apply the Hinglish
/// override. Cheap to share behind an `Arc`; holds no per-request state.
#[derive(Debug, Clone)]
pub struct Detector {
    classifier: ClassifierSlot,
    frequency: Arc<EnglishFrequency>,
    settings: DetectionSettings,
}

impl Detector {
    pub fn new(
        classifier: ClassifierSlot,
        frequency: Arc<EnglishFrequency>,
        settings: DetectionSettings,
    ) -> Self {
        Self {
            classifier,
            frequency,
            settings,
        }
    }

    pub fn settings(&self) -> &DetectionSettings {
        &self.settings
    }

    pub fn classifier(&self) -> &ClassifierSlot {
        &self.classifier
    }

    /// Ranked predictions for `text`. A `top_n` of 0 selects the configured
    /// default. Text that normalizes to nothing yields an empty list.
    #[instrument(skip_all, fields(chars = text.len(), top_n = top_n))]
    pub fn detect(&self, text: &str, top_n: usize) -> Result<Vec<Prediction>, DetectionError> {
        if !self.classifier.is_loaded() {
            return Err(DetectionError::NotLoaded);
        }

        let cleaned = normalize(text);
        if cleaned.is_empty() {
            return Ok(Vec::new());
        }

        let top_n = if top_n == 0 {
            self.settings.default_top_n
        } else {
            top_n
        };

        let mut predictions: Vec<Prediction> = self
            .classifier
            .classify(&cleaned, top_n)?
            .into_iter()
            .map(|(label, score)| {
                let code = strip_label(&label);
                Prediction::new(code, name_for(code), round_confidence(score))
            })
            .collect();

        if let Some(hinglish) = self.hinglish_override(&cleaned, &predictions) {
            predictions.insert(0, hinglish);
        }

        Ok(predictions)
    }

    /// Run [`Detector::detect`] over every text, preserving order. The first
    /// failure aborts the batch.
    pub fn detect_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        top_n: usize,
    ) -> Result<Vec<Vec<Prediction>>, DetectionError> {
        texts
            .iter()
            .map(|text| self.detect(text.as_ref(), top_n))
            .collect()
    }

    /// Synthetic Hinglish entry when the classifier says English but too few
    /// tokens are common English words. It carries the top confidence and is
    /// inserted ahead of, not instead of, the English prediction.
    fn hinglish_override(&self, cleaned: &str, predictions: &[Prediction]) -> Option<Prediction> {
        if !self.settings.hinglish_enabled {
            return None;
        }

        let top = predictions.first()?;
        if top.language_code != ENGLISH_CODE {
            return None;
        }

        let total_words = word_count(cleaned);
        if total_words < self.settings.min_words_for_check {
            return None;
        }

        let ratio = english_word_ratio(
            cleaned,
            &self.frequency,
            self.settings.zipf_frequency_threshold,
        );
        if ratio >= self.settings.english_word_threshold {
            return None;
        }

        info!(
            ratio,
            total_words,
            threshold = self.settings.english_word_threshold,
            "Overriding detection to Hinglish"
        );
        Some(Prediction::new(HINGLISH_CODE, HINGLISH_NAME, top.confidence))
    }
}
