use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

/// Only this many keywords of each list are ever surfaced.
pub const KEYWORD_DISPLAY_LIMIT: usize = 20;

pub const NO_SCORE: &str = "N/A";
pub const NO_SUMMARY: &str = "No summary.";

/// Structured feedback returned by the evaluation service, kept verbatim.
/// Every field is optional; the accessors apply the display defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(default, deserialize_with = "deserialize_score")]
    pub ats_score: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub weaknesses: Option<Vec<String>>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub matching_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub missing_keywords: Option<Vec<String>>,
}

impl EvaluationResult {
    /// "N/100", or "N/A" when the service sent no score.
    pub fn score_label(&self) -> String {
        match self.ats_score {
            Some(score) => format!("{score}/100"),
            None => NO_SCORE.to_string(),
        }
    }

    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or(NO_SUMMARY)
    }

    pub fn strengths(&self) -> &[String] {
        self.strengths.as_deref().unwrap_or_default()
    }

    pub fn weaknesses(&self) -> &[String] {
        self.weaknesses.as_deref().unwrap_or_default()
    }

    pub fn suggestions(&self) -> &[String] {
        self.suggestions.as_deref().unwrap_or_default()
    }

    /// First [`KEYWORD_DISPLAY_LIMIT`] matching keywords, in service order.
    pub fn matching_keywords(&self) -> &[String] {
        capped(self.matching_keywords.as_deref().unwrap_or_default())
    }

    /// First [`KEYWORD_DISPLAY_LIMIT`] missing keywords, in service order.
    pub fn missing_keywords(&self) -> &[String] {
        capped(self.missing_keywords.as_deref().unwrap_or_default())
    }
}

/// Scores arrive as `72` or, from some backends, `72.0`. Both mean 72.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Whole(u32),
    Float(f64),
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawScore>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawScore::Whole(score)) => Ok(Some(score)),
        Some(RawScore::Float(score))
            if score.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&score) =>
        {
            Ok(Some(score as u32))
        }
        Some(RawScore::Float(score)) => Err(D::Error::custom(format!(
            "ats_score must be a whole number, got {score}"
        ))),
    }
}

fn capped(list: &[String]) -> &[String] {
    &list[..list.len().min(KEYWORD_DISPLAY_LIMIT)]
}
