use thiserror::Error;

pub const MISSING_FILE_MESSAGE: &str = "Please upload a resume file (PDF/DOCX/TXT).";
pub const SERVER_ERROR_FALLBACK: &str = "Server error";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Everything that can stop a submission from producing an `EvaluationResult`.
///
/// All variants except `Busy` settle the controller into `OutcomeState::Failure`
/// carrying [`SubmitError::user_message`]. None of them are fatal: the user can
/// always submit again or reset.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Required attachment missing. Detected locally, never reaches the network.
    #[error("Validation error: missing file")]
    Validation,

    /// The service answered with a non-2xx status.
    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// 2xx response whose body is not an evaluation result.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request could not be completed (connectivity, DNS, deadline).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Another submission from the same controller is still in flight.
    #[error("A submission is already in progress")]
    Busy,
}

impl SubmitError {
    /// The single message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation => MISSING_FILE_MESSAGE.to_string(),
            SubmitError::Server { message, .. } => or_fallback(message, SERVER_ERROR_FALLBACK),
            SubmitError::MalformedResponse(detail) => or_fallback(detail, GENERIC_FAILURE_MESSAGE),
            SubmitError::Transport(detail) => or_fallback(detail, GENERIC_FAILURE_MESSAGE),
            SubmitError::Busy => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(e: reqwest::Error) -> Self {
        SubmitError::Transport(e.to_string())
    }
}

fn or_fallback(message: &str, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_fixed() {
        assert_eq!(
            SubmitError::Validation.user_message(),
            "Please upload a resume file (PDF/DOCX/TXT)."
        );
    }

    #[test]
    fn test_server_message_is_body_text() {
        let err = SubmitError::Server {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.user_message(), "rate limited");
    }

    #[test]
    fn test_empty_server_body_falls_back() {
        let err = SubmitError::Server {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "Server error");
    }

    #[test]
    fn test_empty_transport_detail_falls_back() {
        assert_eq!(
            SubmitError::Transport(String::new()).user_message(),
            "Something went wrong"
        );
    }
}
