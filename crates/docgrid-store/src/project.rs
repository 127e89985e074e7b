//! Versioned project file record
//!
//! The save/open dialogs and the on-disk blob format live outside the core;
//! the obligation here is that the result grid round-trips losslessly through
//! this structure.

use crate::{ResultGrid, ResultStore};
use docgrid_domain::{Column, Document};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current project file format version
pub const PROJECT_FILE_VERSION: u32 = 1;

/// A saved project: everything needed to reopen a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Format version, for forward migration
    pub version: u32,

    /// User-chosen project name
    pub name: String,

    /// Unix seconds at save time
    pub saved_at: u64,

    /// Column definitions, in display order
    pub columns: Vec<Column>,

    /// Documents, in upload order
    pub documents: Vec<Document>,

    /// The result grid at save time
    pub results: ResultGrid,

    /// Model the project was last run with
    pub selected_model: String,
}

impl ProjectFile {
    /// Capture the current state into a saveable record
    pub fn capture(
        name: impl Into<String>,
        columns: &[Column],
        documents: &[Document],
        store: &ResultStore,
        selected_model: impl Into<String>,
    ) -> Self {
        Self {
            version: PROJECT_FILE_VERSION,
            name: name.into(),
            saved_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            columns: columns.to_vec(),
            documents: documents.to_vec(),
            results: store.snapshot(),
            selected_model: selected_model.into(),
        }
    }

    /// Load this record's results into a store, replacing its contents
    pub fn restore_into(&self, store: &ResultStore) {
        store.restore(self.results.clone());
    }
}
