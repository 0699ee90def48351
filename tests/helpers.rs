#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use axum::{Router, body::Body, http::Request};

use lingua_gate::{
    api,
    app_state::AppState,
    language::{
        ClassifierError, ClassifierSlot, DetectionSettings, Detector, EnglishFrequency,
        LanguageClassifier,
    },
};

/// Classifier returning the same ranking for every text, truncated to `k`.
pub struct StubClassifier {
    pub ranking: Vec<(&'static str, f32)>,
}

impl LanguageClassifier for StubClassifier {
    fn classify(&self, _text: &str, k: usize) -> Result<Vec<(String, f32)>, ClassifierError> {
        Ok(self
            .ranking
            .iter()
            .take(k)
            .map(|(label, score)| (label.to_string(), *score))
            .collect())
    }

    fn name(&self) -> &'static str {
        "stub"
    }

    fn label_count(&self) -> usize {
        176
    }
}

/// Classifier whose every call fails.
pub struct BrokenClassifier;

impl LanguageClassifier for BrokenClassifier {
    fn classify(&self, _text: &str, _k: usize) -> Result<Vec<(String, f32)>, ClassifierError> {
        Err(ClassifierError::Inference("model is corrupt".to_string()))
    }

    fn name(&self) -> &'static str {
        "broken"
    }

    fn label_count(&self) -> usize {
        176
    }
}

/// The bundled wordfreq model, deserialized once per test binary.
static FREQUENCY: LazyLock<Arc<EnglishFrequency>> = LazyLock::new(|| {
    Arc::new(EnglishFrequency::with_defaults().expect("bundled word frequency model"))
});

pub fn english_ranking() -> Vec<(&'static str, f32)> {
    vec![
        ("__label__en", 0.91),
        ("__label__hi", 0.05),
        ("__label__ur", 0.02),
        ("__label__ne", 0.01),
    ]
}

pub fn state_with(slot: ClassifierSlot) -> AppState {
    AppState::new(Detector::new(
        slot,
        FREQUENCY.clone(),
        DetectionSettings::default(),
    ))
}

pub fn test_app(classifier: impl LanguageClassifier + 'static) -> Router {
    api::router(state_with(ClassifierSlot::loaded(classifier)))
}

pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
