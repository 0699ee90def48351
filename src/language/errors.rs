use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("language model not loaded")]
    NotLoaded,

    #[error("language model already loaded")]
    AlreadyLoaded,

    #[error("failed to load language model: {0}")]
    Load(String),

    #[error("classifier inference failed: {0}")]
    Inference(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("language model not loaded")]
    NotLoaded,

    #[error("detection failed: {0}")]
    ClassifierFailure(String),
}

#[derive(Error, Debug)]
pub enum FrequencyError {
    #[error("failed to load word frequency model: {0}")]
    Model(String),

    #[error("failed to read word frequency list: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ClassifierError> for DetectionError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::NotLoaded => Self::NotLoaded,
            other => Self::ClassifierFailure(other.to_string()),
        }
    }
}

impl DetectionError {
    /// Whether the failure is transient (the model may still become available).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotLoaded)
    }
}
