use std::sync::Arc;

use crate::language::{
    classifier::{ClassifierSlot, LanguageClassifier, MockLanguageClassifier},
    detector::Detector,
    errors::{ClassifierError, DetectionError},
    frequency::EnglishFrequency,
    model::{DetectionSettings, Prediction},
};

/// Deterministic classifier returning a fixed ranking, truncated to `k`.
struct FixedClassifier {
    ranking: Vec<(&'static str, f32)>,
}

impl FixedClassifier {
    fn new(ranking: Vec<(&'static str, f32)>) -> Self {
        Self { ranking }
    }
}

impl LanguageClassifier for FixedClassifier {
    fn classify(&self, _text: &str, k: usize) -> Result<Vec<(String, f32)>, ClassifierError> {
        Ok(self
            .ranking
            .iter()
            .take(k)
            .map(|(label, score)| (label.to_string(), *score))
            .collect())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }

    fn label_count(&self) -> usize {
        self.ranking.len()
    }
}

fn english_ranking() -> Vec<(&'static str, f32)> {
    vec![
        ("__label__en", 0.812_345),
        ("__label__hi", 0.101_01),
        ("__label__id", 0.031),
        ("__label__ms", 0.012),
    ]
}

fn frequency() -> Arc<EnglishFrequency> {
    Arc::new(
        [
            ("the", 7.73),
            ("quick", 4.7),
            ("brown", 4.8),
            ("fox", 4.3),
            ("jumps", 3.6),
            ("over", 6.1),
            ("lazy", 4.0),
            ("dog", 5.0),
            ("is", 7.0),
            ("bhai", 2.1),
        ]
        .into_iter()
        .map(|(word, score)| (word.to_string(), score))
        .collect(),
    )
}

fn detector_with(ranking: Vec<(&'static str, f32)>, settings: DetectionSettings) -> Detector {
    Detector::new(
        ClassifierSlot::loaded(FixedClassifier::new(ranking)),
        frequency(),
        settings,
    )
}

fn detector(ranking: Vec<(&'static str, f32)>) -> Detector {
    detector_with(ranking, DetectionSettings::default())
}

fn codes(predictions: &[Prediction]) -> Vec<&str> {
    predictions
        .iter()
        .map(|p| p.language_code.as_str())
        .collect()
}

#[test]
fn test_detect_before_load_fails() {
    let detector = Detector::new(
        ClassifierSlot::new(),
        frequency(),
        DetectionSettings::default(),
    );
    assert_eq!(detector.detect("hello world", 3), Err(DetectionError::NotLoaded));
    assert_eq!(detector.detect("", 3), Err(DetectionError::NotLoaded));
}

#[test]
fn test_detect_after_late_load() {
    let slot = ClassifierSlot::new();
    let detector = Detector::new(slot.clone(), frequency(), DetectionSettings::default());
    assert!(detector.detect("the quick brown fox", 1).is_err());

    slot.install(Arc::new(FixedClassifier::new(english_ranking())))
        .unwrap();
    assert_eq!(codes(&detector.detect("the quick brown fox", 1).unwrap()), vec!["en"]);
}

#[test]
fn test_empty_input_returns_empty_list_without_classifying() {
    let mut mock = MockLanguageClassifier::new();
    mock.expect_classify().times(0);

    let detector = Detector::new(
        ClassifierSlot::loaded(mock),
        frequency(),
        DetectionSettings::default(),
    );
    assert_eq!(detector.detect("", 3), Ok(vec![]));
    assert_eq!(detector.detect(" \n\t ", 3), Ok(vec![]));
}

#[test]
fn test_classifier_receives_normalized_text() {
    let mut mock = MockLanguageClassifier::new();
    mock.expect_classify()
        .withf(|text, k| text.to_string() == "bonjour le monde" && *k == 2)
        .times(1)
        .returning(|_, _| Ok(vec![("__label__fr".to_string(), 0.93)]));

    let detector = Detector::new(
        ClassifierSlot::loaded(mock),
        frequency(),
        DetectionSettings::default(),
    );
    let predictions = detector.detect("  bonjour\n\nle   monde ", 2).unwrap();
    assert_eq!(predictions, vec![Prediction::new("fr", "French", 0.93)]);
}

#[test]
fn test_zero_top_n_uses_default() {
    let detector = detector(english_ranking());
    let predictions = detector.detect("the quick brown fox", 0).unwrap();
    assert_eq!(predictions.len(), DetectionSettings::default().default_top_n);
}

#[test]
fn test_predictions_are_named_ranked_and_rounded() {
    let detector = detector(english_ranking());
    let predictions = detector.detect("the quick brown fox", 2).unwrap();

    assert_eq!(
        predictions,
        vec![
            Prediction::new("en", "English", 0.8123),
            Prediction::new("hi", "Hindi", 0.101),
        ]
    );
}

#[test]
fn test_top_n_larger_than_label_count() {
    let detector = detector(english_ranking());
    let predictions = detector.detect("the quick brown fox", 50).unwrap();
    assert_eq!(predictions.len(), 4);
    assert!(
        predictions
            .windows(2)
            .all(|pair| pair[0].confidence >= pair[1].confidence)
    );
}

#[test]
fn test_unknown_code_falls_back_to_code() {
    let detector = detector(vec![("__label__xyz", 0.6), ("__label__en", 0.3)]);
    let predictions = detector.detect("some words", 2).unwrap();
    assert_eq!(predictions[0], Prediction::new("xyz", "xyz", 0.6));
    assert_eq!(predictions[1].language_name, "English");
}

#[test]
fn test_hinglish_override_triggers() {
    let detector = detector(english_ranking());
    // six tokens, only "is" is common English
    let text = "yaar ye movie bahut mast is";
    let predictions = detector.detect(text, 3).unwrap();

    assert_eq!(predictions.len(), 4);
    assert_eq!(codes(&predictions), vec!["hinglish", "en", "hi", "id"]);
    assert_eq!(predictions[0].language_name, "Hinglish");
    assert_eq!(predictions[0].confidence, 0.8123);
    assert_eq!(predictions[1], Prediction::new("en", "English", 0.8123));
}

#[test]
fn test_hinglish_ranking_invariant() {
    let detector = detector(english_ranking());
    let predictions = detector.detect("kal office mein bahut kaam tha bhai", 4).unwrap();

    assert_eq!(predictions[0].language_code, "hinglish");
    assert_eq!(predictions[0].confidence, predictions[1].confidence);
    assert!(
        predictions[1..]
            .windows(2)
            .all(|pair| pair[0].confidence >= pair[1].confidence)
    );
}

#[test]
fn test_hinglish_not_triggered_for_short_text() {
    let detector = detector(english_ranking());
    let predictions = detector.detect("kya haal hai", 3).unwrap();
    assert_eq!(codes(&predictions), vec!["en", "hi", "id"]);
}

#[test]
fn test_hinglish_not_triggered_for_english_text() {
    let detector = detector(english_ranking());
    let predictions = detector
        .detect("the quick brown fox jumps over the lazy dog", 3)
        .unwrap();
    assert_eq!(codes(&predictions), vec!["en", "hi", "id"]);
}

#[test]
fn test_hinglish_not_triggered_when_top_is_not_english() {
    let detector = detector(vec![("__label__hi", 0.7), ("__label__en", 0.2)]);
    let predictions = detector
        .detect("yaar ye movie bahut mast thi", 2)
        .unwrap();
    assert_eq!(codes(&predictions), vec!["hi", "en"]);
}

#[test]
fn test_hinglish_disabled() {
    let settings = DetectionSettings {
        hinglish_enabled: false,
        ..DetectionSettings::default()
    };
    let detector = detector_with(english_ranking(), settings);
    let predictions = detector.detect("yaar ye movie bahut mast thi", 3).unwrap();
    assert_eq!(codes(&predictions), vec!["en", "hi", "id"]);
}

#[test]
fn test_everyday_english_is_not_hinglish_with_bundled_model() {
    let detector = Detector::new(
        ClassifierSlot::loaded(FixedClassifier::new(english_ranking())),
        Arc::new(EnglishFrequency::with_defaults().unwrap()),
        DetectionSettings::default(),
    );

    for text in [
        "The restaurant served delicious grilled salmon with roasted vegetables",
        "My grandmother knitted colorful sweaters during the winter holidays",
        "The children watched a documentary about dinosaurs at the museum",
    ] {
        let predictions = detector.detect(text, 2).unwrap();
        assert_eq!(codes(&predictions), vec!["en", "hi"], "{text}");
    }

    let predictions = detector
        .detect("yaar aaj ka match bahut mast tha bhai", 2)
        .unwrap();
    assert_eq!(codes(&predictions), vec!["hinglish", "en", "hi"]);
}

#[test]
fn test_hinglish_threshold_boundary() {
    // 4 of 5 words are English: ratio 0.8
    let text = "the quick brown fox bhai";
    let strict = DetectionSettings {
        english_word_threshold: 0.8,
        ..DetectionSettings::default()
    };
    let predictions = detector_with(english_ranking(), strict).detect(text, 1).unwrap();
    assert_eq!(codes(&predictions), vec!["en"]);

    let stricter = DetectionSettings {
        english_word_threshold: 0.81,
        ..DetectionSettings::default()
    };
    let predictions = detector_with(english_ranking(), stricter)
        .detect(text, 1)
        .unwrap();
    assert_eq!(codes(&predictions), vec!["hinglish", "en"]);
}

#[test]
fn test_classifier_failure_propagates() {
    let mut mock = MockLanguageClassifier::new();
    mock.expect_classify()
        .returning(|_, _| Err(ClassifierError::Inference("corrupt model".to_string())));

    let detector = Detector::new(
        ClassifierSlot::loaded(mock),
        frequency(),
        DetectionSettings::default(),
    );
    let result = detector.detect("hello there", 3);
    assert!(matches!(result, Err(DetectionError::ClassifierFailure(msg)) if msg.contains("corrupt model")));
}

#[test]
fn test_detect_is_deterministic() {
    let detector = detector(english_ranking());
    let text = "yaar ye movie bahut mast thi";
    assert_eq!(detector.detect(text, 3), detector.detect(text, 3));
}

#[test]
fn test_detect_batch_preserves_order() {
    let detector = detector(english_ranking());
    let texts = ["the quick brown fox", "", "yaar ye movie bahut mast thi"];
    let results = detector.detect_batch(&texts, 1).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(codes(&results[0]), vec!["en"]);
    assert!(results[1].is_empty());
    assert_eq!(codes(&results[2]), vec!["hinglish", "en"]);
}

#[test]
fn test_detect_batch_fails_when_not_loaded() {
    let detector = Detector::new(
        ClassifierSlot::new(),
        frequency(),
        DetectionSettings::default(),
    );
    let texts = vec!["hello".to_string()];
    assert_eq!(detector.detect_batch(&texts, 3), Err(DetectionError::NotLoaded));
}

#[test]
fn test_concurrent_detection_shares_detector() {
    let detector = Arc::new(detector(english_ranking()));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let detector = detector.clone();
            std::thread::spawn(move || detector.detect("yaar ye movie bahut mast thi", 2))
        })
        .collect();

    for handle in handles {
        let predictions = handle.join().unwrap().unwrap();
        assert_eq!(codes(&predictions), vec!["hinglish", "en", "hi"]);
    }
}
