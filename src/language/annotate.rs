use serde::Serialize;

use crate::language::model::{DetectionSettings, Prediction};

/// Advisory note attached to a detection result. Never changes the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceNote {
    ShortText,
    LowConfidence,
}

impl ConfidenceNote {
    pub fn message(&self) -> &'static str {
        match self {
            ConfidenceNote::ShortText => "Short text, detection may be unreliable.",
            ConfidenceNote::LowConfidence => {
                "Low confidence detection. Text may be mixed or ambiguous."
            }
        }
    }
}

/// Short-text check first, then low top confidence.
pub fn confidence_note(
    original_text: &str,
    predictions: &[Prediction],
    settings: &DetectionSettings,
) -> Option<ConfidenceNote> {
    if original_text.trim().chars().count() < settings.short_text_char_limit {
        return Some(ConfidenceNote::ShortText);
    }

    match predictions.first() {
        Some(top) if top.confidence < settings.min_confidence_threshold => {
            Some(ConfidenceNote::LowConfidence)
        }
        _ => None,
    }
}
