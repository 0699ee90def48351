use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::language::Prediction;

pub const MIN_TOP_N: usize = 1;
pub const MAX_TOP_N: usize = 20;

#[derive(Debug, Deserialize, ToSchema)]
pub struct DetectRequest {
    /// Text to detect the language of.
    pub text: String,
    /// Number of predictions to return (1-20). Defaults to the server setting.
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchDetectRequest {
    pub texts: Vec<String>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DetectResponse {
    pub detected_language: Option<Prediction>,
    pub predictions: Vec<Prediction>,
    /// Length of the submitted text in characters.
    pub text_length: usize,
    pub confidence_note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchDetectResponse {
    pub results: Vec<DetectResponse>,
    pub total_texts: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn validate_top_n(top_n: Option<usize>) -> Result<(), String> {
    match top_n {
        Some(n) if !(MIN_TOP_N..=MAX_TOP_N).contains(&n) => Err(format!(
            "top_n must be between {MIN_TOP_N} and {MAX_TOP_N}"
        )),
        _ => Ok(()),
    }
}

impl DetectRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.text.is_empty() {
            return Err("Text cannot be empty".to_string());
        }
        if self.text.trim().is_empty() {
            return Err("Text must contain non-whitespace characters".to_string());
        }
        validate_top_n(self.top_n)
    }
}

impl BatchDetectRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.texts.is_empty() {
            return Err("Texts cannot be empty".to_string());
        }
        validate_top_n(self.top_n)
    }
}
