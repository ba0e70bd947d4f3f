use crate::models::evaluation::EvaluationResult;

/// What the presentation layer should show. Exactly one variant is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutcomeState {
    #[default]
    Idle,
    Loading,
    Success(EvaluationResult),
    Failure(String),
}

impl OutcomeState {
    pub fn is_loading(&self) -> bool {
        matches!(self, OutcomeState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            OutcomeState::Failure(message) => Some(message),
            _ => None,
        }
    }
}
