//! scan2md: image-to-markdown conversion service.
//!
//! Accepts a document image over HTTP, delegates recognition to a
//! vision-model OCR provider, normalizes the raw output into consistent
//! markdown, and returns it to the caller. Nothing is persisted beyond the
//! lifetime of a single request.

pub mod api;
pub mod config;
pub mod error;
pub mod markdown;
pub mod ocr;
pub mod scratch;
pub mod upload;
