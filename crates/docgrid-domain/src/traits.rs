//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the orchestration core and
//! infrastructure. Implementations live in other crates (docgrid-client).

use crate::{Column, ConversionFailure, Document, ExtractionCell, ExtractionFailure};
use async_trait::async_trait;

/// One extraction call against the model API
///
/// Implemented by the infrastructure layer (docgrid-client). The engine
/// issues every call without waiting for prior ones; any parallelism happens
/// inside the implementation's transport layer. Implementations must not
/// mutate the document or column.
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Answer one column's question against one document
    ///
    /// Returns the whole cell or a single [`ExtractionFailure`]; partial
    /// answers are a malformed response, not a partial cell.
    async fn extract(
        &self,
        document: &Document,
        column: &Column,
        model: &str,
    ) -> Result<ExtractionCell, ExtractionFailure>;
}

/// Conversion of a raw source file into a normalized document
///
/// Implemented by the infrastructure layer (docgrid-client). The engine never
/// calls this; it consumes already-converted documents.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Convert raw file bytes into a normalized document
    async fn convert(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Document, ConversionFailure>;
}
