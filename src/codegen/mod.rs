//! Code generation module.
//!
//! This module walks the AST and emits Python 3 source. It handles:
//!
//! - Statement and expression translation
//! - Scope frames, shadowing and reserved-name renaming
//! - Standard library call resolution and runtime helpers
//! - Indentation derived from AST nesting

pub mod codegen;
pub mod expr;
pub mod scope;
pub mod stdlib;
pub mod stmt;

#[cfg(test)]
mod tests;
