use std::sync::Arc;

use crate::language::Detector;

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Detector>,
}

impl AppState {
    pub fn new(detector: Detector) -> Self {
        Self {
            detector: Arc::new(detector),
        }
    }
}
