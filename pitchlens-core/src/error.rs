use thiserror::Error;

/// Errors at the boundary with the evaluation service.
///
/// The feedback engine itself never fails; these cover decoding service
/// bodies and validating what the user is about to send.
#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Failed to decode {kind} response: {reason}")]
    DecodeFailed { kind: &'static str, reason: String },

    #[error("Unexpected questions format received")]
    UnexpectedQuestionsFormat,

    #[error("Please type an answer before submitting.")]
    EmptyAnswer,

    #[error("No question provided.")]
    MissingQuestion,
}

pub type Result<T> = std::result::Result<T, FeedbackError>;
