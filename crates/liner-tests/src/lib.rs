//! Integration tests for the liner crates.
//!
//! End-to-end tests that exercise the pipeline, the PNG codec, and
//! the prompt metadata together, at the real canvas size.
