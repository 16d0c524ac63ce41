use std::collections::{
    HashSet,
    VecDeque,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::models::AnalysisResult;

pub const HISTORY_FILE: &str = "analyses.json";

/// Most-recent-first list of past reports, kept locally so they can be re-opened
/// when the service is offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisHistory {
    entries: VecDeque<AnalysisResult>,
    max_entries: usize,
}

impl Default for AnalysisHistory {
    fn default() -> Self {
        Self::new(20)
    }
}

impl AnalysisHistory {
    pub fn new(max_entries: usize) -> Self {
        Self { entries: VecDeque::new(), max_entries }
    }

    pub fn add(&mut self, result: AnalysisResult) {
        self.entries.retain(|entry| entry.id != result.id);
        self.entries.push_front(result);

        while self.entries.len() > self.max_entries {
            self.entries.pop_back();
        }
    }

    /// Local entries first, then remote ones this history has not seen yet.
    pub fn merged_with(&self, remote: &[AnalysisResult]) -> Vec<AnalysisResult> {
        let mut seen: HashSet<&str> = self.entries.iter().map(|e| e.id.as_str()).collect();
        let mut merged: Vec<AnalysisResult> = self.entries.iter().cloned().collect();

        for result in remote {
            if seen.insert(result.id.as_str()) {
                merged.push(result.clone());
            }
        }

        merged
    }

    pub fn get(&self, id: &str) -> Option<&AnalysisResult> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &VecDeque<AnalysisResult> {
        &self.entries
    }

    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|entry| entry.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Count and mean overall score across a set of reports.
pub fn summarize(results: &[AnalysisResult]) -> (usize, Option<f32>) {
    if results.is_empty() {
        return (0, None);
    }

    let total: f32 = results.iter().map(|r| r.analysis.overall_score).sum();
    (results.len(), Some(total / results.len() as f32))
}
