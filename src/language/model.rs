use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prediction {
    pub language_code: String,
    pub language_name: String,
    /// Raw classifier probability in [0, 1], rounded to 4 decimals.
    pub confidence: f64,
}

impl Prediction {
    pub fn new(
        language_code: impl Into<String>,
        language_name: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            language_code: language_code.into(),
            language_name: language_name.into(),
            confidence,
        }
    }
}

/// Detection tunables, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSettings {
    pub default_top_n: usize,
    pub min_confidence_threshold: f64,
    pub short_text_char_limit: usize,
    pub hinglish_enabled: bool,
    pub english_word_threshold: f64,
    pub min_words_for_check: usize,
    pub zipf_frequency_threshold: f64,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            default_top_n: 3,
            min_confidence_threshold: 0.50,
            short_text_char_limit: 3,
            hinglish_enabled: true,
            english_word_threshold: 0.70,
            min_words_for_check: 5,
            zipf_frequency_threshold: 3.0,
        }
    }
}

pub fn round_confidence(score: f32) -> f64 {
    (f64::from(score) * 10_000.0).round() / 10_000.0
}
