#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::{Arc, LazyLock};

use lingua_gate::language::{
    ClassifierSlot, DetectionSettings, Detector, EnglishFrequency, WhatlangClassifier,
    english_ratio::english_word_ratio, normalize::normalize,
};

static FREQUENCY: LazyLock<Arc<EnglishFrequency>> =
    LazyLock::new(|| Arc::new(EnglishFrequency::with_defaults().expect("bundled model")));

static DETECTOR: LazyLock<Detector> = LazyLock::new(|| {
    Detector::new(
        ClassifierSlot::loaded(WhatlangClassifier::new()),
        FREQUENCY.clone(),
        DetectionSettings::default(),
    )
});

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let normalized = normalize(&text);
    assert_eq!(normalize(&normalized), normalized);

    let ratio = english_word_ratio(&normalized, &FREQUENCY, 3.0);
    assert!((0.0..=1.0).contains(&ratio));

    // detection should never panic regardless of input
    let predictions = DETECTOR.detect(&text, 3).expect("classifier is loaded");
    assert!(predictions.len() <= 4);
});
