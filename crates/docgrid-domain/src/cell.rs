//! Extraction cell module - the per-(document, column) answer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence level the model reports for an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Directly supported by the quoted passage
    High,
    /// Supported but required interpretation
    Medium,
    /// Weakly supported or inferred
    Low,
}

impl Confidence {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    /// Parse case-insensitively; model output is not reliable about casing
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Confidence::High),
            "medium" => Some(Confidence::Medium),
            "low" => Some(Confidence::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human review state of a cell; absent means unreviewed
///
/// Set by the user after a run; the engine only preserves or replaces whole
/// cells and never touches this field on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// A reviewer confirmed the answer
    Verified,
    /// Flagged for a second look
    NeedsReview,
    /// The value was hand-edited after extraction
    Edited,
}

/// One filled intersection of the grid
///
/// Created whole by a successful extraction task; there is no partially
/// constructed cell. Either the full cell exists in the store or no entry
/// exists for the pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionCell {
    /// The extracted answer, kept as a string regardless of column type
    pub value: String,

    /// Model-reported confidence level
    pub confidence: Confidence,

    /// Supporting quote from the document
    pub quote: String,

    /// Page the quote was found on, when the model could tell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Model reasoning for the answer
    pub reasoning: String,

    /// Human review state; `None` = unreviewed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewStatus>,
}

impl ExtractionCell {
    /// Create an unreviewed cell
    pub fn new(
        value: impl Into<String>,
        confidence: Confidence,
        quote: impl Into<String>,
        page: Option<u32>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            confidence,
            quote: quote.into(),
            page,
            reasoning: reasoning.into(),
            review: None,
        }
    }
}
