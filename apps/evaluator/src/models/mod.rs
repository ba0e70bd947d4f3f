pub mod evaluation;
pub mod form;
pub mod outcome;

pub use evaluation::EvaluationResult;
pub use form::{FormInput, ResumeFile};
pub use outcome::OutcomeState;
