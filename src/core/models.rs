use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

/// One coaching report for one submitted video. Only ever built whole, either from
/// a validated service response or from the fallback report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub filename: String,
    pub created_at: String,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub overall_score: f32,
    pub confidence_level: f32,
    pub engagement_score: f32,
    pub speech_clarity: f32,
    pub body_language: f32,
    pub emotions: HashMap<String, f32>, // label -> score in [0, 1]
    pub transcript: String,
    pub coaching_feedback: CoachingFeedback,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoachingFeedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub speech_rate: f32, // words per minute
    pub pause_frequency: u32,
    pub filler_words: u32,
    pub gesture_frequency: u32,
    pub eye_contact_percentage: f32,
}

impl Analysis {
    pub fn score_cards(&self) -> [(&'static str, f32); 5] {
        [
            ("Overall", self.overall_score),
            ("Confidence", self.confidence_level),
            ("Engagement", self.engagement_score),
            ("Speech Clarity", self.speech_clarity),
            ("Body Language", self.body_language),
        ]
    }

    /// Emotions ordered from strongest to weakest, ties broken by label.
    pub fn ranked_emotions(&self) -> Vec<(&str, f32)> {
        let mut emotions: Vec<(&str, f32)> =
            self.emotions.iter().map(|(label, score)| (label.as_str(), *score)).collect();
        emotions.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        emotions
    }

    pub fn dominant_emotion(&self) -> Option<&str> {
        self.ranked_emotions().first().map(|(label, _)| *label)
    }
}

impl AnalysisResult {
    /// Offset timestamps are shown in local time. The service's own timestamps carry
    /// no offset and are shown as written.
    pub fn format_created_at(&self) -> String {
        const DISPLAY: &str = "%Y-%m-%d %H:%M";

        if let Ok(time) = chrono::DateTime::parse_from_rfc3339(&self.created_at) {
            return time.with_timezone(&chrono::Local).format(DISPLAY).to_string();
        }

        match chrono::NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(time) => time.format(DISPLAY).to_string(),
            Err(_) => self.created_at.clone(),
        }
    }
}

/// Liveness of the analysis service as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub status: String,
    pub timestamp: Option<String>,
    pub services: HashMap<String, bool>,
}

impl HealthStatus {
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            status: "unhealthy".to_string(),
            timestamp: None,
            services: HashMap::new(),
        }
    }
}

/// Fresh time-derived identifier for records the client has to mint itself.
pub fn generate_result_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), &suffix[..8])
}

pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
