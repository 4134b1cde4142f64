//! Typed decoding of evaluation-service bodies.
//!
//! The service answers three kinds of request. Each decoder here turns a
//! body into plain values the engine can take. Anything that cannot be
//! decoded becomes absent feedback rather than a fault inside the engine.

use crate::error::{FeedbackError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the video scoring endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(default)]
    pub attention_score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl ScoreResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| FeedbackError::DecodeFailed {
            kind: "score",
            reason: e.to_string(),
        })
    }

    /// Score shown to two decimals, if the service sent one.
    pub fn display_score(&self) -> Option<String> {
        self.attention_score.map(format_score)
    }
}

/// Body of the answer judging endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeResponse {
    #[serde(default)]
    pub feedback: Option<String>,
}

impl JudgeResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| FeedbackError::DecodeFailed {
            kind: "judge",
            reason: e.to_string(),
        })
    }
}

/// Body of the question generation endpoint, normalised to question texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

impl QuestionsResponse {
    /// Entries may be plain strings or objects carrying a `question` field.
    /// Any other entry is kept as its compact JSON text.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body).map_err(|e| FeedbackError::DecodeFailed {
            kind: "questions",
            reason: e.to_string(),
        })?;

        let entries = value
            .get("questions")
            .and_then(Value::as_array)
            .ok_or(FeedbackError::UnexpectedQuestionsFormat)?;

        let questions = entries.iter().map(question_text).collect();
        Ok(Self { questions })
    }
}

fn question_text(entry: &Value) -> String {
    match entry {
        Value::String(text) => text.clone(),
        Value::Object(map) => match map.get("question").and_then(Value::as_str) {
            Some(question) if !question.is_empty() => question.to_string(),
            _ => entry.to_string(),
        },
        other => other.to_string(),
    }
}

/// Pull the feedback text out of a score or judge body.
///
/// Returns `None` when the body does not decode or carries no feedback, so
/// callers can hand the result straight to the engine.
pub fn decode_feedback(body: &str) -> Option<String> {
    match serde_json::from_str::<JudgeResponse>(body) {
        Ok(response) => response.feedback,
        Err(e) => {
            tracing::warn!("Discarding undecodable feedback body: {e}");
            None
        }
    }
}

/// Format a score with exactly two decimals.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// A free-text answer ready to send for judging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question: String,
    pub answer: String,
}

impl AnswerSubmission {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Result<Self> {
        let question = question.into();
        let answer = answer.into();

        if question.trim().is_empty() {
            return Err(FeedbackError::MissingQuestion);
        }
        if answer.trim().is_empty() {
            return Err(FeedbackError::EmptyAnswer);
        }

        Ok(Self { question, answer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_response_decodes() {
        let response =
            ScoreResponse::from_json(r#"{"attention_score": 72.5, "feedback": "A:\nx"}"#)
                .unwrap();
        assert_eq!(response.display_score().as_deref(), Some("72.50"));
        assert_eq!(response.feedback.as_deref(), Some("A:\nx"));
    }

    #[test]
    fn test_score_response_missing_fields() {
        let response = ScoreResponse::from_json("{}").unwrap();
        assert_eq!(response.attention_score, None);
        assert_eq!(response.display_score(), None);
        assert_eq!(response.feedback, None);
    }

    #[test]
    fn test_score_response_bad_json() {
        let err = ScoreResponse::from_json("<html>502</html>").unwrap_err();
        assert!(matches!(err, FeedbackError::DecodeFailed { kind: "score", .. }));
    }

    #[test]
    fn test_decode_failures_name_the_response_kind() {
        let err = JudgeResponse::from_json("Internal Server Error").unwrap_err();
        assert!(matches!(err, FeedbackError::DecodeFailed { kind: "judge", .. }));
        assert!(err.to_string().starts_with("Failed to decode judge response: "));

        let err = QuestionsResponse::from_json("[").unwrap_err();
        assert!(matches!(err, FeedbackError::DecodeFailed { kind: "questions", .. }));
    }

    #[test]
    fn test_questions_mixed_entries() {
        let body = r#"{"questions": [
            "What is your moat?",
            {"question": "How do you price?"},
            {"question": ""},
            {"id": 3},
            7
        ]}"#;
        let response = QuestionsResponse::from_json(body).unwrap();
        assert_eq!(
            response.questions,
            vec![
                "What is your moat?".to_string(),
                "How do you price?".to_string(),
                r#"{"question":""}"#.to_string(),
                r#"{"id":3}"#.to_string(),
                "7".to_string(),
            ]
        );
    }

    #[test]
    fn test_questions_not_an_array() {
        let err = QuestionsResponse::from_json(r#"{"questions": "1. Why?"}"#).unwrap_err();
        assert!(matches!(err, FeedbackError::UnexpectedQuestionsFormat));

        let err = QuestionsResponse::from_json(r#"{"error": "boom"}"#).unwrap_err();
        assert!(matches!(err, FeedbackError::UnexpectedQuestionsFormat));
    }

    #[test]
    fn test_decode_feedback_is_total() {
        assert_eq!(
            decode_feedback(r#"{"feedback": "Strengths:\nclear"}"#).as_deref(),
            Some("Strengths:\nclear")
        );
        assert_eq!(
            decode_feedback(r#"{"attention_score": 1.0, "feedback": "x"}"#).as_deref(),
            Some("x")
        );
        assert_eq!(decode_feedback(r#"{"error": "nope"}"#), None);
        assert_eq!(decode_feedback(r#"{"feedback": 12}"#), None);
        assert_eq!(decode_feedback("not json"), None);
        assert_eq!(decode_feedback(""), None);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.0), "0.00");
        assert_eq!(format_score(99.999), "100.00");
        assert_eq!(format_score(7.1234), "7.12");
    }

    #[test]
    fn test_answer_submission_validation() {
        let submission = AnswerSubmission::new("Why now?", "Because costs fell").unwrap();
        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            serde_json::json!({"question": "Why now?", "answer": "Because costs fell"})
        );

        assert!(matches!(
            AnswerSubmission::new("Why now?", "   \n"),
            Err(FeedbackError::EmptyAnswer)
        ));
        assert!(matches!(
            AnswerSubmission::new("", "An answer"),
            Err(FeedbackError::MissingQuestion)
        ));
    }
}
