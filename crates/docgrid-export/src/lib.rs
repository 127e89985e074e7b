//! Docgrid Export
//!
//! Renders the grid for consumption outside the app: CSV (one row per
//! document, one column per Column) and JSON (full cells, including
//! confidence, quote, page, and reasoning). A missing cell renders as an
//! empty string in CSV and `null` in JSON.

#![warn(missing_docs)]

use docgrid_domain::{Column, Document};
use docgrid_store::ResultStore;
use thiserror::Error;

/// Errors that can occur while rendering an export
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// CSV buffer flush error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered CSV was not valid UTF-8
    #[error("encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the grid as CSV
///
/// Header is `Document` followed by the column names in the given order;
/// each row is a document's display name followed by its cell values.
/// Quoting follows RFC 4180: embedded double quotes are doubled.
pub fn export_csv(
    documents: &[Document],
    columns: &[Column],
    results: &ResultStore,
) -> Result<String, ExportError> {
    let grid = results.snapshot();
    let mut writer = csv::Writer::from_writer(vec![]);

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push("Document".to_string());
    header.extend(columns.iter().map(|c| c.name.clone()));
    writer.write_record(&header)?;

    for document in documents {
        let row = grid.get(&document.id);
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(document.name.clone());
        for column in columns {
            let value = row
                .and_then(|cells| cells.get(&column.id))
                .map(|cell| cell.value.clone())
                .unwrap_or_default();
            record.push(value);
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Render the grid as pretty JSON with full cells
///
/// One object per document: `{"document": ..., "cells": {column name →
/// cell or null}}`.
pub fn export_json(
    documents: &[Document],
    columns: &[Column],
    results: &ResultStore,
) -> Result<String, ExportError> {
    let grid = results.snapshot();
    let rows: Vec<serde_json::Value> = documents
        .iter()
        .map(|document| {
            let row = grid.get(&document.id);
            let cells: serde_json::Map<String, serde_json::Value> = columns
                .iter()
                .map(|column| {
                    let cell = row.and_then(|cells| cells.get(&column.id));
                    let value = match cell {
                        Some(cell) => serde_json::to_value(cell),
                        None => Ok(serde_json::Value::Null),
                    };
                    value.map(|v| (column.name.clone(), v))
                })
                .collect::<Result<_, _>>()?;
            Ok(serde_json::json!({
                "document": document.name,
                "cells": cells,
            }))
        })
        .collect::<Result<_, serde_json::Error>>()?;

    Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgrid_domain::{ColumnType, Confidence, ExtractionCell};

    fn cell(value: &str) -> ExtractionCell {
        ExtractionCell::new(value, Confidence::High, "quote", Some(1), "reasoning")
    }

    fn fixture() -> (Vec<Document>, Vec<Column>, ResultStore) {
        let documents = vec![
            Document::new("a.pdf", "", "application/pdf"),
            Document::new("b.pdf", "", "application/pdf"),
        ];
        let columns = vec![
            Column::new("Title", ColumnType::Text, "What is the title?"),
            Column::new("Year", ColumnType::Number, "What year?"),
        ];
        let store = ResultStore::new();
        store.merge(documents[0].id, columns[0].id, cell("Annual Report"));
        store.merge(documents[0].id, columns[1].id, cell("2024"));
        store.merge(documents[1].id, columns[0].id, cell("Lease Agreement"));
        (documents, columns, store)
    }

    #[test]
    fn test_csv_layout() {
        let (documents, columns, store) = fixture();
        let out = export_csv(&documents, &columns, &store).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Document,Title,Year");
        assert_eq!(lines[1], "a.pdf,Annual Report,2024");
        // Missing cell renders as the empty string
        assert_eq!(lines[2], "b.pdf,Lease Agreement,");
    }

    #[test]
    fn test_csv_doubles_embedded_quotes() {
        let documents = vec![Document::new("a.txt", "", "text/plain")];
        let columns = vec![Column::new("Quote", ColumnType::Text, "What was said?")];
        let store = ResultStore::new();
        store.merge(documents[0].id, columns[0].id, cell(r#"He said "hi""#));

        let out = export_csv(&documents, &columns, &store).unwrap();
        assert!(out.contains(r#""He said ""hi""""#));
    }

    #[test]
    fn test_csv_of_empty_grid_is_header_only() {
        let (documents, columns, _) = fixture();
        let out = export_csv(&documents, &columns, &ResultStore::new()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "a.pdf,,");
    }

    #[test]
    fn test_json_carries_full_cells_and_nulls() {
        let (documents, columns, store) = fixture();
        let out = export_json(&documents, &columns, &store).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(rows[0]["document"], "a.pdf");
        assert_eq!(rows[0]["cells"]["Title"]["value"], "Annual Report");
        assert_eq!(rows[0]["cells"]["Title"]["confidence"], "high");
        assert_eq!(rows[1]["cells"]["Year"], serde_json::Value::Null);
    }
}
