//! Task planning: which (document, column) pairs still need work

use docgrid_domain::{Column, ColumnId, Document, DocumentId};
use docgrid_store::ResultStore;
use tracing::debug;

/// One outstanding unit of work: fill a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Task {
    /// Target document
    pub document: DocumentId,
    /// Target column
    pub column: ColumnId,
}

/// Compute the outstanding (document, column) pairs for a run
///
/// Every pair in documents × columns is included unless `overwrite` is false
/// and the store already holds a cell for it. The order of the returned list
/// carries no meaning; the fan-out is unordered. Empty inputs produce an
/// empty plan, which the run controller treats as "do not start a run".
pub fn plan(
    documents: &[Document],
    columns: &[Column],
    results: &ResultStore,
    overwrite: bool,
) -> Vec<Task> {
    let mut tasks = Vec::new();
    for document in documents {
        for column in columns {
            if overwrite || !results.contains(document.id, column.id) {
                tasks.push(Task {
                    document: document.id,
                    column: column.id,
                });
            }
        }
    }
    debug!(
        documents = documents.len(),
        columns = columns.len(),
        outstanding = tasks.len(),
        overwrite,
        "planned extraction tasks"
    );
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgrid_domain::{ColumnType, Confidence, ExtractionCell};
    use std::collections::HashSet;

    fn doc(name: &str) -> Document {
        Document::new(name, "content", "text/plain")
    }

    fn col(name: &str) -> Column {
        Column::new(name, ColumnType::Text, "prompt")
    }

    fn cell() -> ExtractionCell {
        ExtractionCell::new("v", Confidence::High, "q", None, "r")
    }

    #[test]
    fn test_plan_is_full_product_on_empty_store() {
        let docs = vec![doc("a"), doc("b")];
        let cols = vec![col("x"), col("y"), col("z")];
        let tasks = plan(&docs, &cols, &ResultStore::new(), false);
        assert_eq!(tasks.len(), 6);
    }

    #[test]
    fn test_plan_skips_satisfied_pairs() {
        let docs = vec![doc("a"), doc("b")];
        let cols = vec![col("x")];
        let store = ResultStore::new();
        store.merge(docs[0].id, cols[0].id, cell());

        let tasks = plan(&docs, &cols, &store, false);
        assert_eq!(
            tasks,
            vec![Task {
                document: docs[1].id,
                column: cols[0].id
            }]
        );
    }

    #[test]
    fn test_plan_overwrite_includes_satisfied_pairs() {
        let docs = vec![doc("a")];
        let cols = vec![col("x"), col("y")];
        let store = ResultStore::new();
        store.merge(docs[0].id, cols[0].id, cell());
        store.merge(docs[0].id, cols[1].id, cell());

        let tasks = plan(&docs, &cols, &store, true);
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn test_plan_with_fully_satisfied_grid_is_empty() {
        let docs = vec![doc("a")];
        let cols = vec![col("x")];
        let store = ResultStore::new();
        store.merge(docs[0].id, cols[0].id, cell());

        assert!(plan(&docs, &cols, &store, false).is_empty());
    }

    #[test]
    fn test_plan_with_empty_inputs_is_empty() {
        let store = ResultStore::new();
        assert!(plan(&[], &[col("x")], &store, false).is_empty());
        assert!(plan(&[doc("a")], &[], &store, false).is_empty());
        assert!(plan(&[], &[], &store, true).is_empty());
    }

    #[test]
    fn test_plan_never_emits_duplicate_keys() {
        let docs = vec![doc("a"), doc("b"), doc("c")];
        let cols = vec![col("x"), col("y")];
        let tasks = plan(&docs, &cols, &ResultStore::new(), true);

        let unique: HashSet<Task> = tasks.iter().copied().collect();
        assert_eq!(unique.len(), tasks.len());
    }
}
