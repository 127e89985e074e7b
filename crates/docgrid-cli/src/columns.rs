//! Column definitions file (TOML).

use crate::error::{CliError, Result};
use docgrid_domain::{Column, ColumnType};
use serde::Deserialize;
use std::path::Path;

/// Starter file written by `docgrid columns-init`.
pub const COLUMNS_TEMPLATE: &str = r#"# Column definitions for docgrid.
# Each [[column]] is one extraction question asked of every document.
# type is one of: text, number, date, boolean, list

[[column]]
name = "Title"
type = "text"
prompt = "What is the title of this document?"

[[column]]
name = "Effective date"
type = "date"
prompt = "On what date does this document take effect?"
"#;

#[derive(Debug, Deserialize)]
struct ColumnsFile {
    #[serde(rename = "column")]
    columns: Vec<ColumnDef>,
}

#[derive(Debug, Deserialize)]
struct ColumnDef {
    name: String,
    #[serde(rename = "type")]
    column_type: String,
    prompt: String,
    width: Option<u16>,
}

/// Load column definitions from a TOML file.
pub fn load_columns(path: &Path) -> Result<Vec<Column>> {
    let contents = std::fs::read_to_string(path)?;
    parse_columns(&contents)
}

fn parse_columns(contents: &str) -> Result<Vec<Column>> {
    let file: ColumnsFile = toml::from_str(contents)?;
    if file.columns.is_empty() {
        return Err(CliError::InvalidColumns(
            "the file defines no columns".to_string(),
        ));
    }

    file.columns
        .into_iter()
        .map(|def| {
            let column_type = ColumnType::parse(&def.column_type).ok_or_else(|| {
                CliError::InvalidColumns(format!(
                    "column '{}' has unknown type '{}'",
                    def.name, def.column_type
                ))
            })?;
            let mut column = Column::new(def.name, column_type, def.prompt);
            column.width = def.width;
            Ok(column)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgrid_domain::ColumnStatus;

    #[test]
    fn test_template_parses() {
        let columns = parse_columns(COLUMNS_TEMPLATE).unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "Title");
        assert_eq!(columns[0].column_type, ColumnType::Text);
        assert_eq!(columns[1].column_type, ColumnType::Date);
        assert_eq!(columns[0].status, ColumnStatus::Idle);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let bad = r#"
[[column]]
name = "Amount"
type = "currency"
prompt = "How much?"
"#;
        let err = parse_columns(bad).unwrap_err();
        assert!(matches!(err, CliError::InvalidColumns(_)));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(matches!(
            parse_columns("column = []").unwrap_err(),
            CliError::InvalidColumns(_)
        ));
    }

    #[test]
    fn test_width_is_optional() {
        let toml = r#"
[[column]]
name = "Title"
type = "text"
prompt = "Title?"
width = 200
"#;
        let columns = parse_columns(toml).unwrap();
        assert_eq!(columns[0].width, Some(200));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("columns.toml");
        std::fs::write(&path, COLUMNS_TEMPLATE).unwrap();
        assert_eq!(load_columns(&path).unwrap().len(), 2);
    }
}
