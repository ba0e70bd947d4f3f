// Plain-text projection of OutcomeState for the terminal.

use std::fmt::Write;

use crate::models::{EvaluationResult, OutcomeState};

pub const LOADING_TEXT: &str = "Evaluating...";
const EMPTY_KEYWORDS: &str = "—";

pub fn render_outcome(outcome: &OutcomeState) -> String {
    match outcome {
        OutcomeState::Idle => String::new(),
        OutcomeState::Loading => LOADING_TEXT.to_string(),
        OutcomeState::Failure(message) => message.clone(),
        OutcomeState::Success(result) => render_result(result),
    }
}

pub fn render_result(result: &EvaluationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ATS Score: {}", result.score_label());
    let _ = writeln!(out, "{}", result.summary_text());

    render_list(&mut out, "Strengths", result.strengths(), false);
    render_list(&mut out, "Weaknesses", result.weaknesses(), false);
    render_list(&mut out, "Top Suggestions", result.suggestions(), true);

    let _ = writeln!(out);
    let _ = writeln!(out, "Matching / Missing keywords");
    let _ = writeln!(out, "Matched: {}", join_keywords(result.matching_keywords()));
    let _ = write!(out, "Missing: {}", join_keywords(result.missing_keywords()));
    out
}

fn render_list(out: &mut String, title: &str, items: &[String], numbered: bool) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    for (i, item) in items.iter().enumerate() {
        if numbered {
            let _ = writeln!(out, "  {}. {item}", i + 1);
        } else {
            let _ = writeln!(out, "  - {item}");
        }
    }
}

fn join_keywords(keywords: &[String]) -> String {
    if keywords.is_empty() {
        EMPTY_KEYWORDS.to_string()
    } else {
        keywords.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EvaluationResult {
        serde_json::from_str(
            r#"{"ats_score":72,"summary":"Good fit","strengths":["Clear formatting"],"weaknesses":[],"suggestions":["Add metrics"],"matching_keywords":["React"],"missing_keywords":["Docker"]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_idle_renders_nothing() {
        assert_eq!(render_outcome(&OutcomeState::Idle), "");
    }

    #[test]
    fn test_loading_text() {
        assert_eq!(render_outcome(&OutcomeState::Loading), "Evaluating...");
    }

    #[test]
    fn test_failure_renders_message_only() {
        let outcome = OutcomeState::Failure("rate limited".to_string());
        assert_eq!(render_outcome(&outcome), "rate limited");
    }

    #[test]
    fn test_full_result() {
        let text = render_outcome(&OutcomeState::Success(sample()));
        assert!(text.starts_with("ATS Score: 72/100\nGood fit\n"));
        assert!(text.contains("Strengths\n  - Clear formatting\n"));
        assert!(text.contains("Weaknesses\n\n"));
        assert!(text.contains("Top Suggestions\n  1. Add metrics\n"));
        assert!(text.contains("Matched: React\nMissing: Docker"));
    }

    #[test]
    fn test_missing_score_and_summary_defaults() {
        let text = render_result(&EvaluationResult::default());
        assert!(text.starts_with("ATS Score: N/A\nNo summary.\n"));
        assert!(text.contains("Matched: —\nMissing: —"));
    }

    #[test]
    fn test_keywords_join_first_twenty() {
        let keywords: Vec<String> = (1..=30).map(|i| format!("k{i}")).collect();
        let result = EvaluationResult {
            missing_keywords: Some(keywords),
            ..Default::default()
        };
        let text = render_result(&result);
        let line = text.lines().last().unwrap();
        assert!(line.ends_with("k19, k20"));
        assert!(!line.contains("k21"));
    }
}
