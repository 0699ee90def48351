use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    app_state::AppState,
    config::{ClassifierBackend, Config},
    language::{ClassifierSlot, Detector, EnglishFrequency, LanguageClassifier, WhatlangClassifier},
};

/// Load the word-frequency reference named by the config, or the bundled model.
pub fn load_frequency(config: &Config) -> Result<EnglishFrequency> {
    let frequency = match config.word_frequency_path() {
        Some(path) => EnglishFrequency::load_from_file(path)
            .with_context(|| format!("reading word frequency list {}", path.display()))?,
        None => EnglishFrequency::with_defaults().context("loading bundled word frequency model")?,
    };
    info!(
        source = frequency.source_name(),
        words = ?frequency.word_count(),
        "Word frequency reference ready"
    );
    Ok(frequency)
}

/// Load the configured classifier backend into `slot`, fetching the model
/// artifact first if needed. A slot that is already filled is left as is.
pub async fn load_classifier(config: &Config, slot: &ClassifierSlot) -> Result<()> {
    match config.backend() {
        ClassifierBackend::Whatlang => {
            slot.load(|| Ok(Arc::new(WhatlangClassifier::new()) as Arc<dyn LanguageClassifier>))?
        }
        ClassifierBackend::FastText => load_fasttext(config, slot).await?,
    }
    Ok(())
}

#[cfg(feature = "fasttext")]
async fn load_fasttext(config: &Config, slot: &ClassifierSlot) -> Result<()> {
    use crate::language::{FastTextClassifier, model_store::ensure_model};

    if slot.is_loaded() {
        return Ok(());
    }

    let path = ensure_model(config.model_path(), config.model_url()).await?;
    let slot = slot.clone();
    tokio::task::spawn_blocking(move || {
        slot.load(|| Ok(Arc::new(FastTextClassifier::load(path)?) as Arc<dyn LanguageClassifier>))
    })
    .await
    .context("model loading task panicked")??;
    Ok(())
}

#[cfg(not(feature = "fasttext"))]
async fn load_fasttext(_config: &Config, _slot: &ClassifierSlot) -> Result<()> {
    anyhow::bail!("fasttext backend requested but this build lacks the `fasttext` feature")
}

/// Construct the shared application state. The classifier is loaded before
/// this returns, so no request is served against an empty model.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let frequency = Arc::new(load_frequency(config)?);

    let slot = ClassifierSlot::new();
    load_classifier(config, &slot).await?;

    Ok(AppState::new(Detector::new(
        slot,
        frequency,
        config.detection().clone(),
    )))
}
