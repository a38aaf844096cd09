//! AST construction module.
//!
//! This module walks the parse tree bottom-up and produces the canonical
//! AST. It:
//!
//! - Collapses both declaration and function spellings into one node kind
//! - Converts literal text into typed values (quotes stripped, signs folded)
//! - Drops keywords, terminators and punctuation
//! - Reports missing parameter types and malformed productions

pub mod builder;
pub mod expr;
pub mod stmt;
