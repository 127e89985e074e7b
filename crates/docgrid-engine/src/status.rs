//! Column status board: the live status overlay owned by the run controller

use docgrid_domain::{ColumnId, ColumnStatus};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared, externally readable column status overlay
///
/// Columns without an entry read as `Idle`. Only the run controller writes;
/// the UI (or tests) read at any time. `Error` is part of the vocabulary but
/// no transition here produces it.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    inner: Arc<RwLock<HashMap<ColumnId, ColumnStatus>>>,
}

impl StatusBoard {
    /// Create an empty board (every column reads `Idle`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status of a column
    pub fn status(&self, column: ColumnId) -> ColumnStatus {
        self.inner
            .read()
            .unwrap()
            .get(&column)
            .copied()
            .unwrap_or_default()
    }

    /// Mark the run's target columns `Extracting`
    ///
    /// A pure overlay write: columns outside `targets` keep their status,
    /// including columns left `Extracting` by a superseded run.
    pub fn mark_extracting(&self, targets: &[ColumnId]) {
        let mut board = self.inner.write().unwrap();
        for column in targets {
            board.insert(*column, ColumnStatus::Extracting);
        }
    }

    /// Mark the run's target columns `Completed` (natural settle)
    pub fn complete(&self, targets: &[ColumnId]) {
        let mut board = self.inner.write().unwrap();
        for column in targets {
            board.insert(*column, ColumnStatus::Completed);
        }
    }

    /// Reset every column still `Extracting` back to `Idle`
    ///
    /// Used when a run settles without completing, and as the final sweep of
    /// a natural settle so columns inherited mid-flight from a superseded run
    /// do not stay `Extracting` forever.
    pub fn reset_extracting_to_idle(&self) {
        let mut board = self.inner.write().unwrap();
        for status in board.values_mut() {
            if *status == ColumnStatus::Extracting {
                *status = ColumnStatus::Idle;
            }
        }
    }

    /// Copy of the overlay (columns absent from the map are `Idle`)
    pub fn snapshot(&self) -> HashMap<ColumnId, ColumnStatus> {
        self.inner.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_column_reads_idle() {
        let board = StatusBoard::new();
        assert_eq!(board.status(ColumnId::new()), ColumnStatus::Idle);
    }

    #[test]
    fn test_mark_extracting_is_an_overlay() {
        let board = StatusBoard::new();
        let (a, b) = (ColumnId::new(), ColumnId::new());

        board.complete(&[b]);
        board.mark_extracting(&[a]);

        assert_eq!(board.status(a), ColumnStatus::Extracting);
        assert_eq!(board.status(b), ColumnStatus::Completed);
    }

    #[test]
    fn test_reset_only_touches_extracting() {
        let board = StatusBoard::new();
        let (a, b, c) = (ColumnId::new(), ColumnId::new(), ColumnId::new());

        board.mark_extracting(&[a, b]);
        board.complete(&[b]);
        board.complete(&[c]);
        board.reset_extracting_to_idle();

        assert_eq!(board.status(a), ColumnStatus::Idle);
        assert_eq!(board.status(b), ColumnStatus::Completed);
        assert_eq!(board.status(c), ColumnStatus::Completed);
    }

    #[test]
    fn test_clones_share_the_board() {
        let board = StatusBoard::new();
        let handle = board.clone();
        let col = ColumnId::new();

        handle.mark_extracting(&[col]);
        assert_eq!(board.status(col), ColumnStatus::Extracting);
    }
}
