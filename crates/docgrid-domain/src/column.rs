//! Column module - a named extraction question applied to every document

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a column, based on UUIDv7
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ColumnId(Uuid);

impl ColumnId {
    /// Generate a new UUIDv7-based ColumnId
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a ColumnId from its string form
    pub fn parse(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("invalid column id: {}", e))
    }
}

impl Default for ColumnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared answer type for a column
///
/// The type steers the prompt and the expected answer shape; it is not
/// enforced on the stored value (the model's answer is kept as a string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free-form text answer
    Text,
    /// Numeric answer
    Number,
    /// Calendar date answer
    Date,
    /// Yes/no answer
    Boolean,
    /// List of values
    List,
}

impl ColumnType {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
            ColumnType::List => "list",
        }
    }

    /// Parse from the canonical lowercase name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(ColumnType::Text),
            "number" => Some(ColumnType::Number),
            "date" => Some(ColumnType::Date),
            "boolean" => Some(ColumnType::Boolean),
            "list" => Some(ColumnType::List),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a column during extraction
///
/// The run controller is the only writer: `Extracting` while a run targets
/// the column, `Completed` when the run settles naturally, back to `Idle`
/// when a run is cancelled before settling. `Error` is declared for the
/// status vocabulary but is never assigned by the orchestration flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnStatus {
    /// Not part of any settled run
    #[default]
    Idle,
    /// A run currently targets this column
    Extracting,
    /// The most recent run covering this column settled naturally
    Completed,
    /// Reserved; not reachable from the orchestration flow
    Error,
}

impl ColumnStatus {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnStatus::Idle => "idle",
            ColumnStatus::Extracting => "extracting",
            ColumnStatus::Completed => "completed",
            ColumnStatus::Error => "error",
        }
    }
}

/// A column: a named extraction question applied to every document
///
/// Created and edited by the user; the run controller only ever transitions
/// the status overlay, never identity, type, or prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier
    pub id: ColumnId,

    /// Display name (also the CSV header)
    pub name: String,

    /// Declared answer type
    pub column_type: ColumnType,

    /// Natural-language extraction prompt
    pub prompt: String,

    /// Persisted status (the live overlay is owned by the engine)
    #[serde(default)]
    pub status: ColumnStatus,

    /// Display width hint, UI-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
}

impl Column {
    /// Create a column with a fresh id and `Idle` status
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: ColumnId::new(),
            name: name.into(),
            column_type,
            prompt: prompt.into(),
            status: ColumnStatus::Idle,
            width: None,
        }
    }
}
