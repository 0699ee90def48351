use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use wordfreq::WordFreq;
use wordfreq_model::ModelKind;

use crate::language::errors::FrequencyError;

/// English word-frequency reference on the Zipf scale
/// (log10 of occurrences per billion words).
///
/// Backed by the bundled wordfreq `large-en` model, or by a plain table when
/// an override list is supplied.
pub struct EnglishFrequency {
    source: Source,
}

enum Source {
    Model(Box<WordFreq>),
    Table(HashMap<String, f64>),
}

impl EnglishFrequency {
    /// Create with the bundled wordfreq English model.
    pub fn with_defaults() -> Result<Self, FrequencyError> {
        let model = wordfreq_model::load_wordfreq(ModelKind::LargeEn)
            .map_err(|e| FrequencyError::Model(e.to_string()))?;

        Ok(Self {
            source: Source::Model(Box::new(model)),
        })
    }

    /// Load frequency data from a TSV file (`word\tzipf` format).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, FrequencyError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse `word\tzipf` lines. Blank lines, `#` comments and rows whose
    /// score does not parse are skipped.
    pub fn parse(content: &str) -> Self {
        let mut zipf = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split('\t');
            if let (Some(word), Some(score)) = (parts.next(), parts.next())
                && let Ok(score) = score.trim().parse::<f64>()
            {
                zipf.insert(word.trim().to_lowercase(), score);
            }
        }

        Self {
            source: Source::Table(zipf),
        }
    }

    /// Zipf score for a word; unknown words score 0.0.
    pub fn zipf(&self, word: &str) -> f64 {
        let word = word.to_lowercase();
        match &self.source {
            Source::Model(model) => f64::from(model.zipf_frequency(&word)),
            Source::Table(table) => table.get(&word).copied().unwrap_or(0.0),
        }
    }

    /// Number of words in a table-backed reference; `None` for the model.
    pub fn word_count(&self) -> Option<usize> {
        match &self.source {
            Source::Model(_) => None,
            Source::Table(table) => Some(table.len()),
        }
    }

    pub fn source_name(&self) -> &'static str {
        match self.source {
            Source::Model(_) => "wordfreq-large-en",
            Source::Table(_) => "table",
        }
    }
}

impl fmt::Debug for EnglishFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnglishFrequency")
            .field("source", &self.source_name())
            .field("words", &self.word_count())
            .finish()
    }
}

impl FromIterator<(String, f64)> for EnglishFrequency {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            source: Source::Table(
                iter.into_iter()
                    .map(|(word, score)| (word.to_lowercase(), score))
                    .collect(),
            ),
        }
    }
}
