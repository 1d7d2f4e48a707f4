//! Extraction-quality heuristics: per-document text metrics, the collection
//! validation pass, and report rendering.

pub mod config;
pub mod document;
pub mod metrics;
pub mod report;
pub mod validator;

pub use document::{Document, DocumentCollection, DocumentMetadata};
pub use validator::{ValidationOutcome, ValidationReport, Validator};
