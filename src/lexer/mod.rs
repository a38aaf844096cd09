//! Lexical analysis module for the transpiler.
//!
//! This module contains the lexer (tokenizer) that converts Fluent source
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of uppercase keywords over identifiers
//! - Line and column tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
