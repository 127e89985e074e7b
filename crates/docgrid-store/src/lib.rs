//! Docgrid Result Store
//!
//! The shared, incrementally-updated mapping from (document, column) to an
//! [`ExtractionCell`]. Tasks merge into it as they complete, in whatever
//! order the model API resolves; readers (UI, exporters) observe it at any
//! time and never see a half-written cell.
//!
//! # Invariant
//!
//! An entry exists for a pair if and only if a task for that pair completed
//! successfully and has not since been invalidated (document removal, column
//! removal, or an overwrite re-run). Cells are written whole, never
//! field-by-field.
//!
//! # Example
//!
//! ```
//! use docgrid_store::ResultStore;
//! use docgrid_domain::{Confidence, DocumentId, ColumnId, ExtractionCell};
//!
//! let store = ResultStore::new();
//! let (doc, col) = (DocumentId::new(), ColumnId::new());
//! let cell = ExtractionCell::new("42", Confidence::High, "it is 42", Some(1), "verbatim");
//! store.merge(doc, col, cell);
//! assert!(store.contains(doc, col));
//! ```

#![warn(missing_docs)]

pub mod project;

pub use project::{ProjectFile, PROJECT_FILE_VERSION};

use docgrid_domain::{ColumnId, DocumentId, ExtractionCell};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Serialized shape of the store: document id → column id → cell
pub type ResultGrid = HashMap<DocumentId, HashMap<ColumnId, ExtractionCell>>;

/// Cheaply clonable handle to the shared result grid
///
/// One lock guards the whole nested map, so a merge for (doc, colA) and a
/// concurrent merge for (doc, colB) each take the write lock in turn and
/// touch exactly one inner entry; neither can drop the other's write.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    inner: Arc<RwLock<ResultGrid>>,
}

impl ResultStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace exactly one cell; never affects any other key
    pub fn merge(&self, document: DocumentId, column: ColumnId, cell: ExtractionCell) {
        let mut grid = self.inner.write().unwrap();
        grid.entry(document).or_default().insert(column, cell);
    }

    /// Read one cell, if present
    pub fn get(&self, document: DocumentId, column: ColumnId) -> Option<ExtractionCell> {
        let grid = self.inner.read().unwrap();
        grid.get(&document).and_then(|row| row.get(&column)).cloned()
    }

    /// Whether a cell exists for the pair
    pub fn contains(&self, document: DocumentId, column: ColumnId) -> bool {
        let grid = self.inner.read().unwrap();
        grid.get(&document).is_some_and(|row| row.contains_key(&column))
    }

    /// Remove all entries for a document (document deletion cascade)
    ///
    /// Returns the number of cells removed.
    pub fn invalidate_document(&self, document: DocumentId) -> usize {
        let mut grid = self.inner.write().unwrap();
        let removed = grid.remove(&document).map(|row| row.len()).unwrap_or(0);
        if removed > 0 {
            debug!(%document, removed, "invalidated document results");
        }
        removed
    }

    /// Remove all entries for a column across every document (column deletion cascade)
    ///
    /// Returns the number of cells removed.
    pub fn invalidate_column(&self, column: ColumnId) -> usize {
        let mut grid = self.inner.write().unwrap();
        let mut removed = 0;
        grid.retain(|_, row| {
            if row.remove(&column).is_some() {
                removed += 1;
            }
            !row.is_empty()
        });
        if removed > 0 {
            debug!(%column, removed, "invalidated column results");
        }
        removed
    }

    /// Empty the store
    pub fn clear(&self) {
        self.inner.write().unwrap().clear();
    }

    /// Total number of filled cells
    pub fn cell_count(&self) -> usize {
        let grid = self.inner.read().unwrap();
        grid.values().map(|row| row.len()).sum()
    }

    /// Whether no cell is filled
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }

    /// Consistent copy of the whole grid (for export and persistence)
    pub fn snapshot(&self) -> ResultGrid {
        self.inner.read().unwrap().clone()
    }

    /// Replace the whole grid (project open)
    pub fn restore(&self, grid: ResultGrid) {
        *self.inner.write().unwrap() = grid;
    }
}
