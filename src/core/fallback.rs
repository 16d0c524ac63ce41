use std::collections::HashMap;

use super::models::{
    generate_result_id,
    now_timestamp,
    Analysis,
    AnalysisResult,
    CoachingFeedback,
    Metrics,
};

pub const FALLBACK_OVERALL_SCORE: f32 = 78.0;

const DEMO_TRANSCRIPT: &str = "Good morning everyone. Thank you for taking the time to meet \
with us today. I'd like to walk you through how our platform can cut your onboarding time \
in half, and then open it up for your questions.";

/// The fixed demo report used when the analysis service can't be reached.
pub fn placeholder_result(filename: &str) -> AnalysisResult {
    AnalysisResult {
        id: generate_result_id(),
        filename: filename.to_string(),
        created_at: now_timestamp(),
        analysis: placeholder_analysis(),
    }
}

fn placeholder_analysis() -> Analysis {
    let emotions = HashMap::from([
        ("confident".to_string(), 0.45),
        ("neutral".to_string(), 0.30),
        ("happy".to_string(), 0.15),
        ("nervous".to_string(), 0.10),
    ]);

    Analysis {
        overall_score: FALLBACK_OVERALL_SCORE,
        confidence_level: 82.0,
        engagement_score: 75.0,
        speech_clarity: 80.0,
        body_language: 76.0,
        emotions,
        transcript: DEMO_TRANSCRIPT.to_string(),
        coaching_feedback: CoachingFeedback {
            strengths: vec![
                "Clear and confident opening".to_string(),
                "Good use of concrete examples".to_string(),
                "Steady speaking pace".to_string(),
            ],
            improvements: vec![
                "Reduce filler words such as \"um\" and \"like\"".to_string(),
                "Hold eye contact with the camera for longer stretches".to_string(),
                "Pause after key points to let them land".to_string(),
            ],
            recommendations: vec![
                "Rehearse the value proposition until it fits in 30 seconds".to_string(),
                "Open with a customer story before the product demo".to_string(),
                "Close with a specific next step and a date".to_string(),
            ],
        },
        metrics: Metrics {
            speech_rate: 165.0,
            pause_frequency: 12,
            filler_words: 8,
            gesture_frequency: 23,
            eye_contact_percentage: 78.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_complete_and_keeps_filename() {
        let result = placeholder_result("Demo Day — 第1回.mov");
        assert_eq!(result.filename, "Demo Day — 第1回.mov");
        assert_eq!(result.analysis.overall_score, 78.0);
        assert!(!result.analysis.emotions.is_empty());
        assert_eq!(result.analysis.coaching_feedback.strengths.len(), 3);
        assert!(chrono::DateTime::parse_from_rfc3339(&result.created_at).is_ok());
    }

    #[test]
    fn each_placeholder_gets_its_own_id() {
        assert_ne!(placeholder_result("a.mp4").id, placeholder_result("a.mp4").id);
    }
}
