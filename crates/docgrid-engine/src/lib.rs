//! Docgrid Extraction Engine
//!
//! The orchestration core: given documents, columns, and a model, compute
//! the outstanding (document, column) work, fan every task out concurrently
//! against the extraction client, merge whole cells into the shared result
//! store as they land, and settle column statuses when the fan-out drains.
//!
//! # Architecture
//!
//! ```text
//! start/rerun → plan → JoinSet fan-out → ExtractionClient
//!                                   └→ ResultStore merge (per task)
//!            settle → StatusBoard (completed, or extracting → idle)
//! ```
//!
//! Cancellation is cooperative: [`RunController::stop`] signals the run's
//! token; in-flight calls are never aborted, their effect on shared state is
//! suppressed instead. Starting a new run supersedes (and cancels) the
//! previous one; there is never more than one effective run.
//!
//! # Example
//!
//! ```
//! use docgrid_client::MockClient;
//! use docgrid_domain::{Column, ColumnType, Document};
//! use docgrid_engine::RunController;
//! use docgrid_store::ResultStore;
//!
//! # tokio_test::block_on(async {
//! let controller = RunController::new(MockClient::echo(), ResultStore::new());
//! let docs = vec![Document::new("a.txt", "hello", "text/plain")];
//! let cols = vec![Column::new("Greeting", ColumnType::Text, "What is the greeting?")];
//!
//! let summary = controller.start(&docs, &cols, false).await;
//! assert_eq!(summary.merged, 1);
//! # });
//! ```

#![warn(missing_docs)]

mod planner;
mod run;
mod status;

pub use planner::{plan, Task};
pub use run::{RunController, RunSummary};
pub use status::StatusBoard;
