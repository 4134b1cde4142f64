//! Evaluation Client - blocking calls to the pitch evaluation service
//!
//! Only the answer-judging endpoint takes a JSON body, so it is the one the
//! CLI can call directly. Scoring and question generation take a video
//! upload; their saved responses are decoded with `--response` instead.

use pitchlens_core::responses::{decode_feedback, AnswerSubmission};
use std::time::Duration;
use thiserror::Error;

/// Local development address of the evaluation service
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";

pub const JUDGE_ENDPOINT: &str = "/answer-feedback/judge-responses";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Evaluation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not reach evaluation service at {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("Failed to read response body: {0}")]
    Body(#[from] std::io::Error),
}

pub struct EvaluationClient {
    base_url: String,
    agent: ureq::Agent,
}

impl EvaluationClient {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST the submission and return the raw response body.
    pub fn judge_answer_body(&self, submission: &AnswerSubmission) -> Result<String, ClientError> {
        let url = self.endpoint_url(JUDGE_ENDPOINT);
        tracing::debug!("POST {url}");

        match self.agent.post(&url).send_json(submission) {
            Ok(response) => Ok(response.into_string()?),
            Err(ureq::Error::Status(status, response)) => Err(ClientError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(transport)) => Err(ClientError::Transport {
                url,
                reason: transport.to_string(),
            }),
        }
    }

    /// Judge an answer. Every failure is logged and comes back as `None`,
    /// which the engine turns into an empty breakdown.
    pub fn judge_answer(&self, submission: &AnswerSubmission) -> Option<String> {
        match self.judge_answer_body(submission) {
            Ok(body) => decode_feedback(&body),
            Err(e) => {
                tracing::warn!("Answer evaluation failed: {e}");
                None
            }
        }
    }
}
