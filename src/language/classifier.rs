use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::language::errors::ClassifierError;

/// Prefix the classifier puts in front of every language code.
pub const LABEL_PREFIX: &str = "__label__";

/// A pretrained multi-class text classifier used as a scored-labeling oracle.
#[cfg_attr(test, mockall::automock)]
pub trait LanguageClassifier: Send + Sync {
    /// Up to `k` `(label, score)` pairs, highest score first. Labels keep the
    /// classifier's native `__label__<code>` format.
    fn classify(&self, text: &str, k: usize) -> Result<Vec<(String, f32)>, ClassifierError>;

    /// Backend name, used in logs and health reporting.
    fn name(&self) -> &'static str;

    /// Number of labels the loaded model can emit.
    fn label_count(&self) -> usize;
}

/// Strip the native label prefix, leaving the bare language code.
pub fn strip_label(label: &str) -> &str {
    label.strip_prefix(LABEL_PREFIX).unwrap_or(label)
}

/// Format a bare language code as a native label.
pub fn to_label(code: &str) -> String {
    format!("{LABEL_PREFIX}{code}")
}

/// Shared handle to the process-wide classifier.
///
/// Starts empty and is filled exactly once at startup. Clones share the same
/// underlying slot, so the handle can be passed into the detector before the
/// model has finished loading.
#[derive(Clone, Default)]
pub struct ClassifierSlot {
    inner: Arc<OnceLock<Arc<dyn LanguageClassifier>>>,
}

impl ClassifierSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot that is already filled with `classifier`.
    pub fn loaded(classifier: impl LanguageClassifier + 'static) -> Self {
        let slot = Self::new();
        // a fresh slot is always empty
        let _ = slot.inner.set(Arc::new(classifier));
        slot
    }

    /// Fill the slot. Fails with `AlreadyLoaded` if it was filled before.
    pub fn install(&self, classifier: Arc<dyn LanguageClassifier>) -> Result<(), ClassifierError> {
        let name = classifier.name();
        let labels = classifier.label_count();
        self.inner
            .set(classifier)
            .map_err(|_| ClassifierError::AlreadyLoaded)?;
        info!(classifier = name, labels, "Language model ready");
        Ok(())
    }

    /// Run `loader` and install its classifier unless the slot is already
    /// filled, in which case this is a no-op.
    pub fn load<F>(&self, loader: F) -> Result<(), ClassifierError>
    where
        F: FnOnce() -> Result<Arc<dyn LanguageClassifier>, ClassifierError>,
    {
        if self.is_loaded() {
            return Ok(());
        }
        match self.install(loader()?) {
            Err(ClassifierError::AlreadyLoaded) => Ok(()),
            other => other,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.get().is_some()
    }

    pub fn get(&self) -> Result<&Arc<dyn LanguageClassifier>, ClassifierError> {
        self.inner.get().ok_or(ClassifierError::NotLoaded)
    }

    pub fn classify(&self, text: &str, k: usize) -> Result<Vec<(String, f32)>, ClassifierError> {
        self.get()?.classify(text, k)
    }

    /// Backend name, if loaded.
    pub fn name(&self) -> Option<&'static str> {
        self.inner.get().map(|classifier| classifier.name())
    }

    /// Label count of the loaded model, 0 when empty.
    pub fn label_count(&self) -> usize {
        self.inner
            .get()
            .map(|classifier| classifier.label_count())
            .unwrap_or(0)
    }
}

impl fmt::Debug for ClassifierSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierSlot")
            .field("classifier", &self.name())
            .finish()
    }
}
