//! Parser module for building the parse tree.
//!
//! This module contains the parser that transforms a stream of tokens into
//! a grammar-shaped parse tree. It uses a Pratt parser for expressions with
//! proper operator precedence and handles:
//!
//! - Statement parsing (both declaration spellings, functions, control flow)
//! - Expression parsing (binary and unary ops, calls, collection literals)
//! - Type parsing for type annotations
//! - Syntax error reporting with expected/found descriptions
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parse_tree;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
