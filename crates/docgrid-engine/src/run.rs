//! Run controller: drives one extraction run to completion or cancellation

use crate::planner::plan;
use crate::status::StatusBoard;
use docgrid_domain::traits::ExtractionClient;
use docgrid_domain::{Column, ColumnId, Document, DocumentId};
use docgrid_store::ResultStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Outcome counters for one settled run
///
/// Partial success is the normal outcome of a large fan-out; completeness is
/// inferred from the result store, not from these counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tasks the planner emitted
    pub planned: usize,
    /// Tasks whose cell was merged into the store
    pub merged: usize,
    /// Tasks that failed at the extraction client
    pub failed: usize,
    /// Tasks suppressed by cancellation
    pub discarded: usize,
    /// Whether the run's token was signaled before it settled
    pub cancelled: bool,
}

/// What one fan-out task reported back
enum TaskOutcome {
    Merged,
    Failed,
    Discarded,
}

/// Lifecycle state shared between `start`, `stop`, and late-finishing runs
struct RunState {
    /// Bumped on every `start`; a run whose generation is stale was superseded
    generation: u64,
    token: Option<CancellationToken>,
    active: bool,
}

/// Owns the lifecycle of extraction runs over a shared result store
///
/// At most one run is effective at a time: starting a new run cancels and
/// supersedes the previous one. Cancellation is cooperative; an in-flight
/// client call is never aborted, its merge is suppressed instead.
pub struct RunController<C> {
    client: Arc<C>,
    results: ResultStore,
    statuses: StatusBoard,
    model: String,
    state: Arc<Mutex<RunState>>,
}

impl<C> RunController<C>
where
    C: ExtractionClient + 'static,
{
    /// Create a controller over a shared result store
    pub fn new(client: C, results: ResultStore) -> Self {
        Self {
            client: Arc::new(client),
            results,
            statuses: StatusBoard::new(),
            model: "default".to_string(),
            state: Arc::new(Mutex::new(RunState {
                generation: 0,
                token: None,
                active: false,
            })),
        }
    }

    /// Set the model identifier passed to every extraction call
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Handle to the shared result store
    pub fn results(&self) -> ResultStore {
        self.results.clone()
    }

    /// Handle to the column status overlay
    pub fn statuses(&self) -> StatusBoard {
        self.statuses.clone()
    }

    /// Whether a run is currently active from the caller's perspective
    pub fn is_active(&self) -> bool {
        self.state.lock().unwrap().active
    }

    /// Run extraction over documents × columns
    ///
    /// Supersedes any active run, marks target columns `Extracting`, plans
    /// against the store as of this call, dispatches every task concurrently,
    /// and awaits the full fan-out. Empty inputs are a silent no-op that does
    /// not disturb a prior run. Returns once the run has settled.
    pub async fn start(
        &self,
        documents: &[Document],
        columns: &[Column],
        overwrite: bool,
    ) -> RunSummary {
        if documents.is_empty() || columns.is_empty() {
            debug!("empty document or column set, not starting a run");
            return RunSummary::default();
        }

        // Supersede: cancel the previous run's token without waiting for its
        // tasks to observe the signal, then install a fresh token.
        let (token, my_generation) = {
            let mut state = self.state.lock().unwrap();
            if let Some(previous) = state.token.take() {
                previous.cancel();
                debug!("superseding active run");
            }
            state.generation += 1;
            let token = CancellationToken::new();
            state.token = Some(token.clone());
            state.active = true;
            (token, state.generation)
        };

        let target_columns: Vec<ColumnId> = columns.iter().map(|c| c.id).collect();
        self.statuses.mark_extracting(&target_columns);

        let tasks = plan(documents, columns, &self.results, overwrite);
        info!(
            documents = documents.len(),
            columns = columns.len(),
            planned = tasks.len(),
            overwrite,
            model = %self.model,
            "extraction run started"
        );

        let documents_by_id: HashMap<DocumentId, &Document> =
            documents.iter().map(|d| (d.id, d)).collect();
        let columns_by_id: HashMap<ColumnId, &Column> =
            columns.iter().map(|c| (c.id, c)).collect();

        // Unbounded fan-out: dispatch everything, await everything.
        let mut fan_out: JoinSet<TaskOutcome> = JoinSet::new();
        for task in &tasks {
            let client = Arc::clone(&self.client);
            let results = self.results.clone();
            let token = token.clone();
            let model = self.model.clone();
            let document = documents_by_id[&task.document].clone();
            let column = columns_by_id[&task.column].clone();

            fan_out.spawn(async move {
                if token.is_cancelled() {
                    return TaskOutcome::Discarded;
                }
                match client.extract(&document, &column, &model).await {
                    Ok(cell) => {
                        // Checked again after the suspension point: a result
                        // that raced a cancel must not touch shared state.
                        if token.is_cancelled() {
                            return TaskOutcome::Discarded;
                        }
                        results.merge(document.id, column.id, cell);
                        TaskOutcome::Merged
                    }
                    Err(e) => {
                        warn!(
                            document = %document.name,
                            column = %column.name,
                            error = %e,
                            "extraction task failed"
                        );
                        TaskOutcome::Failed
                    }
                }
            });
        }

        let mut summary = RunSummary {
            planned: tasks.len(),
            ..RunSummary::default()
        };
        while let Some(joined) = fan_out.join_next().await {
            match joined {
                Ok(TaskOutcome::Merged) => summary.merged += 1,
                Ok(TaskOutcome::Failed) => summary.failed += 1,
                Ok(TaskOutcome::Discarded) => summary.discarded += 1,
                Err(e) => {
                    warn!(error = %e, "extraction task panicked");
                    summary.failed += 1;
                }
            }
        }
        summary.cancelled = token.is_cancelled();

        // Settle. A superseded run must not clobber its successor's status
        // overlay or active flag, so everything below is generation-guarded.
        // A stop()ped run is still the newest generation and settles normally.
        {
            let mut state = self.state.lock().unwrap();
            if state.generation == my_generation {
                if summary.cancelled {
                    self.statuses.reset_extracting_to_idle();
                } else {
                    self.statuses.complete(&target_columns);
                    // Columns left mid-flight by an earlier superseded run
                    self.statuses.reset_extracting_to_idle();
                }
                state.active = false;
                state.token = None;
            }
        }

        info!(
            planned = summary.planned,
            merged = summary.merged,
            failed = summary.failed,
            discarded = summary.discarded,
            cancelled = summary.cancelled,
            "extraction run settled"
        );
        summary
    }

    /// Re-run a document subset, force-overwriting its cells
    ///
    /// Deletes the subset's rows from the store first, so every pair is
    /// recomputed even if a task later fails (the row is gone either way),
    /// then starts with `overwrite = true` restricted to that subset.
    pub async fn rerun(&self, documents: &[Document], columns: &[Column]) -> RunSummary {
        for document in documents {
            self.results.invalidate_document(document.id);
        }
        self.start(documents, columns, true).await
    }

    /// Cancel the active run
    ///
    /// Signals the token and synchronously flips the active indicator off;
    /// in-flight tasks drain asynchronously and the column status cleanup
    /// happens when the fan-out settles.
    pub fn stop(&self) {
        let mut state = self.state.lock().unwrap();
        if let Some(token) = &state.token {
            token.cancel();
            info!("extraction run stop requested");
        }
        state.active = false;
    }
}
