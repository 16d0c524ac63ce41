use std::collections::HashMap;

use serde::Deserialize;

use crate::core::{
    models::{
        generate_result_id,
        now_timestamp,
        Analysis,
        AnalysisResult,
        CoachingFeedback,
        HealthStatus,
        Metrics,
    },
    CoachError,
};

/// Body of `POST /api/v1/videos/analyze`, and each item of the history list.
/// Everything is optional here; `into_result` decides what is usable.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub analysis: Option<AnalysisPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisPayload {
    pub overall_score: Option<f32>,
    pub confidence_level: Option<f32>,
    pub engagement_score: Option<f32>,
    pub speech_clarity: Option<f32>,
    pub body_language: Option<f32>,
    #[serde(default)]
    pub emotions: Option<HashMap<String, f32>>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub coaching_feedback: Option<FeedbackPayload>,
    #[serde(default)]
    pub metrics: Option<MetricsPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackPayload {
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub improvements: Option<Vec<String>>,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MetricsPayload {
    pub speech_rate: Option<f32>,
    pub pause_frequency: Option<f64>,
    pub filler_words: Option<f64>,
    pub gesture_frequency: Option<f64>,
    pub eye_contact_percentage: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub services: Option<HashMap<String, bool>>,
}

impl AnalysisResponse {
    /// Builds the domain record, filling in what the client may mint itself.
    /// A supplied `created_at` is kept untouched.
    pub fn into_result(self, fallback_filename: &str) -> Result<AnalysisResult, CoachError> {
        let payload = self
            .analysis
            .ok_or_else(|| CoachError::MalformedResponse("missing analysis".to_string()))?;

        let id = match self.id {
            Some(serde_json::Value::String(id)) if !id.is_empty() => id,
            Some(serde_json::Value::Number(id)) => id.to_string(),
            _ => generate_result_id(),
        };

        Ok(AnalysisResult {
            id,
            filename: self
                .filename
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| fallback_filename.to_string()),
            created_at: self.created_at.filter(|ts| !ts.is_empty()).unwrap_or_else(now_timestamp),
            analysis: payload.into_analysis()?,
        })
    }
}

impl AnalysisPayload {
    fn into_analysis(self) -> Result<Analysis, CoachError> {
        let emotions: HashMap<String, f32> = self
            .emotions
            .unwrap_or_default()
            .into_iter()
            .map(|(label, score)| (label, score.clamp(0.0, 1.0)))
            .collect();

        if emotions.is_empty() {
            return Err(CoachError::MalformedResponse("no emotion scores".to_string()));
        }

        let feedback = self.coaching_feedback.unwrap_or_default();
        let metrics = self.metrics.unwrap_or_default();

        Ok(Analysis {
            overall_score: percentage("overall_score", self.overall_score)?,
            confidence_level: percentage("confidence_level", self.confidence_level)?,
            engagement_score: percentage("engagement_score", self.engagement_score)?,
            speech_clarity: percentage("speech_clarity", self.speech_clarity)?,
            body_language: percentage("body_language", self.body_language)?,
            emotions,
            transcript: self.transcript.unwrap_or_default(),
            coaching_feedback: CoachingFeedback {
                strengths: feedback.strengths.unwrap_or_default(),
                improvements: feedback.improvements.unwrap_or_default(),
                recommendations: feedback.recommendations.unwrap_or_default(),
            },
            metrics: Metrics {
                speech_rate: metrics.speech_rate.unwrap_or_default().max(0.0),
                pause_frequency: count(metrics.pause_frequency),
                filler_words: count(metrics.filler_words),
                gesture_frequency: count(metrics.gesture_frequency),
                eye_contact_percentage: metrics
                    .eye_contact_percentage
                    .unwrap_or_default()
                    .clamp(0.0, 100.0),
            },
        })
    }
}

impl HealthResponse {
    pub fn into_status(self) -> HealthStatus {
        let status = self.status.unwrap_or_else(|| "unknown".to_string());
        HealthStatus {
            healthy: status.eq_ignore_ascii_case("healthy") || status.eq_ignore_ascii_case("ok"),
            status,
            timestamp: self.timestamp,
            services: self.services.unwrap_or_default(),
        }
    }
}

fn percentage(field: &str, value: Option<f32>) -> Result<f32, CoachError> {
    match value {
        Some(value) if value.is_finite() => Ok(value.clamp(0.0, 100.0)),
        _ => Err(CoachError::MalformedResponse(format!("missing {field}"))),
    }
}

fn count(value: Option<f64>) -> u32 {
    value.filter(|v| v.is_finite() && *v > 0.0).map(|v| v.round() as u32).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BODY: &str = r#"{
        "id": "abc-123",
        "filename": "pitch.mp4",
        "created_at": "2024-05-01T10:00:00",
        "analysis": {
            "overall_score": 78,
            "confidence_level": 80,
            "engagement_score": 75,
            "speech_clarity": 80,
            "body_language": 76,
            "emotions": {"happy": 0.6, "neutral": 0.4},
            "transcript": "Hello there",
            "coaching_feedback": {
                "strengths": ["Clear opening"],
                "improvements": [],
                "recommendations": ["Slow down"]
            },
            "metrics": {
                "speech_rate": 165.5,
                "pause_frequency": 12,
                "filler_words": 3,
                "gesture_frequency": 23,
                "eye_contact_percentage": 78
            }
        }
    }"#;

    #[test]
    fn full_body_converts_and_keeps_service_timestamp() {
        let response: AnalysisResponse = serde_json::from_str(FULL_BODY).unwrap();
        let result = response.into_result("ignored.mp4").unwrap();

        assert_eq!(result.id, "abc-123");
        assert_eq!(result.filename, "pitch.mp4");
        assert_eq!(result.created_at, "2024-05-01T10:00:00");
        assert_eq!(result.analysis.overall_score, 78.0);
        assert_eq!(result.analysis.emotions.len(), 2);
        assert_eq!(result.analysis.coaching_feedback.recommendations, ["Slow down"]);
        assert_eq!(result.analysis.metrics.filler_words, 3);
    }

    #[test]
    fn null_timestamp_and_missing_id_are_filled_in() {
        let body = FULL_BODY
            .replace(r#""created_at": "2024-05-01T10:00:00""#, r#""created_at": null"#)
            .replace(r#""id": "abc-123","#, "");
        let response: AnalysisResponse = serde_json::from_str(&body).unwrap();
        let result = response.into_result("pitch.mp4").unwrap();

        assert!(!result.id.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&result.created_at).is_ok());
    }

    #[test]
    fn missing_feedback_lists_become_empty() {
        let body = r#"{"analysis": {
            "overall_score": 50, "confidence_level": 50, "engagement_score": 50,
            "speech_clarity": 50, "body_language": 50, "emotions": {"calm": 1.4}
        }}"#;
        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        let result = response.into_result("talk.mkv").unwrap();

        assert_eq!(result.filename, "talk.mkv");
        assert_eq!(result.analysis.emotions["calm"], 1.0);
        assert!(result.analysis.coaching_feedback.strengths.is_empty());
        assert!(result.analysis.coaching_feedback.improvements.is_empty());
        assert!(result.analysis.coaching_feedback.recommendations.is_empty());
    }

    #[test]
    fn partial_reports_are_rejected() {
        let missing_score = FULL_BODY.replace(r#""body_language": 76,"#, "");
        let response: AnalysisResponse = serde_json::from_str(&missing_score).unwrap();
        assert!(matches!(
            response.into_result("x.mp4"),
            Err(CoachError::MalformedResponse(msg)) if msg == "missing body_language"
        ));

        let no_emotions = FULL_BODY.replace(r#"{"happy": 0.6, "neutral": 0.4}"#, "{}");
        let response: AnalysisResponse = serde_json::from_str(&no_emotions).unwrap();
        assert!(response.into_result("x.mp4").is_err());

        let response: AnalysisResponse = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert!(response.into_result("x.mp4").is_err());
    }

    #[test]
    fn health_body_maps_to_status() {
        let body = r#"{"status": "healthy", "services": {"speech_analysis": true}}"#;
        let status = serde_json::from_str::<HealthResponse>(body).unwrap().into_status();
        assert!(status.healthy);
        assert_eq!(status.services.get("speech_analysis"), Some(&true));

        let status = serde_json::from_str::<HealthResponse>("{}").unwrap().into_status();
        assert!(!status.healthy);
        assert_eq!(status.status, "unknown");
    }
}
