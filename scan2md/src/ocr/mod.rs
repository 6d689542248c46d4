//! OCR provider client.
//!
//! The external recognition capability sits behind the [`OcrEngine`] trait
//! so the pipeline can be exercised with a deterministic fake in tests.
//! [`TogetherOcrClient`] is the production engine; [`OcrProvider`] fronts
//! an engine and enforces the configured timeout.

mod api;
mod provider;

pub use api::TogetherOcrClient;
pub use provider::{OcrEngine, OcrProvider};
