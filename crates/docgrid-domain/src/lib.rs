//! Docgrid Domain Layer
//!
//! Core data model and trait seams for the docgrid extraction system.
//! A grid is documents on one axis and columns (named extraction questions)
//! on the other; every filled intersection is an [`ExtractionCell`].
//!
//! ## Key Concepts
//!
//! - **Document**: converted source text, immutable once created
//! - **Column**: an extraction question (type + natural-language prompt)
//! - **Cell**: one model answer with confidence, quote, page, and reasoning
//! - **Trait seams**: [`traits::ExtractionClient`] and
//!   [`traits::DocumentConverter`] — infrastructure implementations live in
//!   other crates
//!
//! The orchestration engine depends only on this crate's contracts; it never
//! sees HTTP, prompts, or response parsing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cell;
pub mod column;
pub mod document;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use cell::{Confidence, ExtractionCell, ReviewStatus};
pub use column::{Column, ColumnId, ColumnStatus, ColumnType};
pub use document::{Document, DocumentId};
pub use error::{ConversionFailure, ExtractionFailure};
