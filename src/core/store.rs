use std::sync::{
    Arc,
    RwLock,
};

use super::models::AnalysisResult;

/// The single "current analysis" slot. Created once by the app and handed out as
/// cloned handles. Writers replace the whole value and never mutate it in place.
#[derive(Debug, Clone, Default)]
pub struct AnalysisStore {
    current: Arc<RwLock<Option<Arc<AnalysisResult>>>>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current analysis wholesale.
    pub fn publish(&self, result: AnalysisResult) -> Arc<AnalysisResult> {
        let result = Arc::new(result);
        match self.current.write() {
            Ok(mut slot) => *slot = Some(result.clone()),
            Err(poisoned) => *poisoned.into_inner() = Some(result.clone()),
        }
        result
    }

    pub fn current(&self) -> Option<Arc<AnalysisResult>> {
        match self.current.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_none()
    }
}
