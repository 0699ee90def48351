//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults.
//! `Config::from_env` does the loading; values that are present but do not
//! parse are reported as `ConfigError::InvalidValue` instead of being ignored.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::language::{
    DetectionSettings,
    model_store::{DEFAULT_MODEL_PATH, DEFAULT_MODEL_URL},
};

/// Environment variable names.
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_MODEL_PATH: &str = "MODEL_PATH";
pub const ENV_MODEL_URL: &str = "MODEL_URL";
pub const ENV_CLASSIFIER_BACKEND: &str = "CLASSIFIER_BACKEND";
pub const ENV_WORD_FREQUENCY_PATH: &str = "WORD_FREQUENCY_PATH";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

pub const ENV_DEFAULT_TOP_N: &str = "DEFAULT_TOP_N";
pub const ENV_MIN_CONFIDENCE_THRESHOLD: &str = "MIN_CONFIDENCE_THRESHOLD";
pub const ENV_SHORT_TEXT_CHAR_LIMIT: &str = "SHORT_TEXT_CHAR_LIMIT";
pub const ENV_HINGLISH_ENABLED: &str = "HINGLISH_ENABLED";
pub const ENV_ENGLISH_WORD_THRESHOLD: &str = "ENGLISH_WORD_THRESHOLD";
pub const ENV_MIN_WORDS_FOR_CHECK: &str = "MIN_WORDS_FOR_CHECK";
pub const ENV_ZIPF_FREQUENCY_THRESHOLD: &str = "ZIPF_FREQUENCY_THRESHOLD";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8010;

/// Which classifier implementation serves detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    /// fastText `lid.176` model (requires the `fasttext` cargo feature).
    FastText,
    /// whatlang trigram detector, no model file needed.
    Whatlang,
}

impl Default for ClassifierBackend {
    fn default() -> Self {
        if cfg!(feature = "fasttext") {
            Self::FastText
        } else {
            Self::Whatlang
        }
    }
}

impl FromStr for ClassifierBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fasttext" => Ok(Self::FastText),
            "whatlang" => Ok(Self::Whatlang),
            other => Err(format!("unknown classifier backend '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    host: String,
    port: u16,
    model_path: PathBuf,
    model_url: String,
    backend: ClassifierBackend,
    word_frequency_path: Option<PathBuf>,
    log_format: LogFormat,
    detection: DetectionSettings,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = DetectionSettings::default();

        let detection = DetectionSettings {
            default_top_n: parse_var(ENV_DEFAULT_TOP_N, defaults.default_top_n)?,
            min_confidence_threshold: parse_var(
                ENV_MIN_CONFIDENCE_THRESHOLD,
                defaults.min_confidence_threshold,
            )?,
            short_text_char_limit: parse_var(
                ENV_SHORT_TEXT_CHAR_LIMIT,
                defaults.short_text_char_limit,
            )?,
            hinglish_enabled: parse_bool_var(ENV_HINGLISH_ENABLED, defaults.hinglish_enabled)?,
            english_word_threshold: parse_var(
                ENV_ENGLISH_WORD_THRESHOLD,
                defaults.english_word_threshold,
            )?,
            min_words_for_check: parse_var(ENV_MIN_WORDS_FOR_CHECK, defaults.min_words_for_check)?,
            zipf_frequency_threshold: parse_var(
                ENV_ZIPF_FREQUENCY_THRESHOLD,
                defaults.zipf_frequency_threshold,
            )?,
        };

        if detection.default_top_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_DEFAULT_TOP_N,
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            host: env::var(ENV_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_var(ENV_PORT, DEFAULT_PORT)?,
            model_path: env::var(ENV_MODEL_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH)),
            model_url: env::var(ENV_MODEL_URL).unwrap_or_else(|_| DEFAULT_MODEL_URL.to_string()),
            backend: parse_var(ENV_CLASSIFIER_BACKEND, ClassifierBackend::default())?,
            word_frequency_path: env::var(ENV_WORD_FREQUENCY_PATH)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            log_format: parse_var(ENV_LOG_FORMAT, LogFormat::default())?,
            detection,
        })
    }

    pub fn with_backend(mut self, backend: ClassifierBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_model_source(mut self, path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        self.model_path = path.into();
        self.model_url = url.into();
        self
    }

    pub fn with_word_frequency_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.word_frequency_path = Some(path.into());
        self
    }

    pub fn with_detection(mut self, detection: DetectionSettings) -> Self {
        self.detection = detection;
        self
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
    /// Local path of the cached classifier model.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
    /// Remote location the model is fetched from when not cached.
    pub fn model_url(&self) -> &str {
        &self.model_url
    }
    pub fn backend(&self) -> ClassifierBackend {
        self.backend
    }
    /// Optional TSV word-frequency list replacing the bundled wordfreq model.
    pub fn word_frequency_path(&self) -> Option<&Path> {
        self.word_frequency_path.as_deref()
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
    pub fn detection(&self) -> &DetectionSettings {
        &self.detection
    }
}

/// Development defaults (mirrors `from_env` with no env overrides).
impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_url: DEFAULT_MODEL_URL.to_string(),
            backend: ClassifierBackend::default(),
            word_frequency_path: None,
            log_format: LogFormat::default(),
            detection: DetectionSettings::default(),
        }
    }
}

/// Errors that can occur while building a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn parse_var<T>(field: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(field) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

fn parse_bool_var(field: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(field) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidValue {
                field,
                reason: format!("expected a boolean, got '{other}'"),
            }),
        },
        Err(_) => Ok(default),
    }
}
