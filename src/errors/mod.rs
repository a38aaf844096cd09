//! Error types and error handling for the transpiler.
//!
//! This module defines the single error type shared by every pipeline
//! stage. It includes:
//!
//! - An error structure carrying the source position
//! - Specific error variants grouped by the stage that raises them
//! - Suggestions shown alongside rendered diagnostics

pub mod errors;
