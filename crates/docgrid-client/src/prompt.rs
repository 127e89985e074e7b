//! Prompt construction for one (document, column) extraction call

use docgrid_domain::{Column, ColumnType, Document};

/// Builds the extraction prompt for one grid cell
///
/// The answer contract is a single JSON object so the parser can produce a
/// whole cell or reject the response outright.
pub struct PromptBuilder<'a> {
    document: &'a Document,
    column: &'a Column,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder for one (document, column) pair
    pub fn new(document: &'a Document, column: &'a Column) -> Self {
        Self { document, column }
    }

    /// Build the full prompt text
    pub fn build(&self) -> String {
        format!(
            "You are extracting structured data from a document.\n\
             \n\
             Question: {prompt}\n\
             Answer type: {answer_type}. {type_hint}\n\
             \n\
             Respond with exactly one JSON object, no other text:\n\
             {{\n\
             \x20 \"value\": <the answer>,\n\
             \x20 \"confidence\": \"high\" | \"medium\" | \"low\",\n\
             \x20 \"quote\": <short supporting quote from the document>,\n\
             \x20 \"page\": <page number of the quote, or null>,\n\
             \x20 \"reasoning\": <one sentence explaining the answer>\n\
             }}\n\
             \n\
             Document: {name}\n\
             ---\n\
             {content}\n\
             ---\n",
            prompt = self.column.prompt,
            answer_type = self.column.column_type,
            type_hint = type_hint(self.column.column_type),
            name = self.document.name,
            content = self.document.content,
        )
    }
}

/// Per-type guidance appended to the answer contract
fn type_hint(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Text => "Answer with a short phrase.",
        ColumnType::Number => "Answer with a bare number, no units or thousands separators.",
        ColumnType::Date => "Answer in ISO 8601 format (YYYY-MM-DD).",
        ColumnType::Boolean => "Answer with true or false.",
        ColumnType::List => "Answer with a JSON array of strings.",
    }
}
