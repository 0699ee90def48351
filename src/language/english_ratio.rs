use tracing::debug;

use crate::language::frequency::EnglishFrequency;

/// Fraction of whitespace-delimited tokens that are common English words.
///
/// A token counts when its latin form (ASCII letters and apostrophes,
/// lowercased) is non-empty and scores strictly above `zipf_threshold`.
/// Returns 0.0 for text without tokens.
pub fn english_word_ratio(text: &str, frequency: &EnglishFrequency, zipf_threshold: f64) -> f64 {
    let mut total = 0usize;
    let mut english_valid = 0usize;

    for word in text.split_whitespace() {
        total += 1;

        let latin = latin_form(word);
        if !latin.is_empty() && frequency.zipf(&latin) > zipf_threshold {
            english_valid += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }

    let ratio = english_valid as f64 / total as f64;
    debug!(
        english_words = english_valid,
        total_words = total,
        ratio,
        "Computed English word ratio"
    );

    ratio
}

fn latin_form(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '\'')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
