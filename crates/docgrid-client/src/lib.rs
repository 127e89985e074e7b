//! Docgrid Client Layer
//!
//! Implementations of the [`ExtractionClient`] and
//! [`docgrid_domain::traits::DocumentConverter`] contracts.
//!
//! # Implementations
//!
//! - [`MockClient`]: deterministic mock for testing and offline use
//! - [`OllamaClient`]: local Ollama API integration
//! - [`DoclingConverter`]: docling sidecar integration for file conversion
//!
//! # Examples
//!
//! ```
//! use docgrid_client::MockClient;
//! use docgrid_domain::{Column, ColumnType, Document};
//! use docgrid_domain::traits::ExtractionClient;
//!
//! # tokio_test::block_on(async {
//! let client = MockClient::echo();
//! let doc = Document::new("a.txt", "hello", "text/plain");
//! let col = Column::new("Greeting", ColumnType::Text, "What is the greeting?");
//! let cell = client.extract(&doc, &col, "any-model").await.unwrap();
//! assert_eq!(cell.value, "a.txt/Greeting");
//! # });
//! ```

#![warn(missing_docs)]

pub mod docling;
pub mod ollama;
pub mod parser;
pub mod prompt;

pub use docling::DoclingConverter;
pub use ollama::OllamaClient;

use async_trait::async_trait;
use docgrid_domain::traits::ExtractionClient;
use docgrid_domain::{
    Column, ColumnId, Confidence, Document, DocumentId, ExtractionCell, ExtractionFailure,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Canned outcome for one (document, column) pair
#[derive(Debug, Clone)]
enum MockOutcome {
    Cell(ExtractionCell),
    Fail,
}

/// Mock extraction client for deterministic testing
///
/// Returns pre-configured cells without any network calls. By default it
/// echoes "document-name/column-name" as the value, so concurrent runs
/// produce distinguishable cells. Calls can be gated: [`MockClient::hold`]
/// makes every in-flight `extract` wait until [`MockClient::release`], which
/// is how cancellation-ordering tests pin down "stop before any task
/// resolves".
///
/// Clones share responses, the gate, and the call counter.
#[derive(Debug, Clone)]
pub struct MockClient {
    default_cell: Option<ExtractionCell>,
    responses: Arc<Mutex<HashMap<(DocumentId, ColumnId), MockOutcome>>>,
    call_count: Arc<Mutex<usize>>,
    gate: Arc<Mutex<Option<watch::Sender<bool>>>>,
}

impl MockClient {
    /// Client that answers every call with the same fixed cell
    pub fn new(cell: ExtractionCell) -> Self {
        Self {
            default_cell: Some(cell),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            gate: Arc::new(Mutex::new(None)),
        }
    }

    /// Client that echoes "document-name/column-name" as the value
    pub fn echo() -> Self {
        Self {
            default_cell: None,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            gate: Arc::new(Mutex::new(None)),
        }
    }

    /// Set a specific cell for one (document, column) pair
    pub fn add_cell(&self, document: DocumentId, column: ColumnId, cell: ExtractionCell) {
        self.responses
            .lock()
            .unwrap()
            .insert((document, column), MockOutcome::Cell(cell));
    }

    /// Make one (document, column) pair fail with a network error
    pub fn add_failure(&self, document: DocumentId, column: ColumnId) {
        self.responses
            .lock()
            .unwrap()
            .insert((document, column), MockOutcome::Fail);
    }

    /// Number of times `extract` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Hold every subsequent (and in-flight) call until [`release`](Self::release)
    pub fn hold(&self) {
        let (tx, _rx) = watch::channel(false);
        *self.gate.lock().unwrap() = Some(tx);
    }

    /// Release all held calls
    pub fn release(&self) {
        if let Some(tx) = self.gate.lock().unwrap().take() {
            tx.send_replace(true);
        }
    }

    fn echo_cell(document: &Document, column: &Column) -> ExtractionCell {
        ExtractionCell::new(
            format!("{}/{}", document.name, column.name),
            Confidence::High,
            format!("quote from {}", document.name),
            Some(1),
            format!("mock answer for '{}'", column.prompt),
        )
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::echo()
    }
}

#[async_trait]
impl ExtractionClient for MockClient {
    async fn extract(
        &self,
        document: &Document,
        column: &Column,
        _model: &str,
    ) -> Result<ExtractionCell, ExtractionFailure> {
        *self.call_count.lock().unwrap() += 1;

        // Subscribe while holding the lock, wait after dropping it
        let rx = self
            .gate
            .lock()
            .unwrap()
            .as_ref()
            .map(|tx| tx.subscribe());
        if let Some(mut rx) = rx {
            // A dropped sender also releases the gate
            let _ = rx.wait_for(|released| *released).await;
        }

        let outcome = self
            .responses
            .lock()
            .unwrap()
            .get(&(document.id, column.id))
            .cloned();

        match outcome {
            Some(MockOutcome::Cell(cell)) => Ok(cell),
            Some(MockOutcome::Fail) => {
                Err(ExtractionFailure::Network("mock failure".to_string()))
            }
            None => match &self.default_cell {
                Some(cell) => Ok(cell.clone()),
                None => Ok(Self::echo_cell(document, column)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgrid_domain::ColumnType;
    use std::time::Duration;

    fn doc_and_col() -> (Document, Column) {
        (
            Document::new("invoice.pdf", "Total due: $12", "application/pdf"),
            Column::new("Total", ColumnType::Number, "What is the total due?"),
        )
    }

    #[tokio::test]
    async fn test_echo_client() {
        let client = MockClient::echo();
        let (doc, col) = doc_and_col();
        let cell = client.extract(&doc, &col, "m").await.unwrap();
        assert_eq!(cell.value, "invoice.pdf/Total");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fixed_cell_client() {
        let fixed = ExtractionCell::new("12", Confidence::High, "Total due: $12", None, "stated");
        let client = MockClient::new(fixed.clone());
        let (doc, col) = doc_and_col();
        assert_eq!(client.extract(&doc, &col, "m").await.unwrap(), fixed);
    }

    #[tokio::test]
    async fn test_canned_cell_overrides_default() {
        let client = MockClient::echo();
        let (doc, col) = doc_and_col();
        let canned = ExtractionCell::new("$12", Confidence::Low, "q", Some(2), "r");
        client.add_cell(doc.id, col.id, canned.clone());
        assert_eq!(client.extract(&doc, &col, "m").await.unwrap(), canned);
    }

    #[tokio::test]
    async fn test_canned_failure() {
        let client = MockClient::echo();
        let (doc, col) = doc_and_col();
        client.add_failure(doc.id, col.id);
        let err = client.extract(&doc, &col, "m").await.unwrap_err();
        assert!(matches!(err, ExtractionFailure::Network(_)));
    }

    #[tokio::test]
    async fn test_gate_holds_until_release() {
        let client = MockClient::echo();
        client.hold();
        let (doc, col) = doc_and_col();

        let c = client.clone();
        let task = tokio::spawn(async move { c.extract(&doc, &col, "m").await });

        // Give the call time to enter the gate; it must not finish yet
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!task.is_finished());

        client.release();
        assert!(task.await.unwrap().is_ok());
    }
}
