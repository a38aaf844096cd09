#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc, time::Instant};

use tracing::debug;

use crate::{
    ast::ast::Program,
    builder::builder::build_program,
    codegen::codegen::{generate, GeneratorOptions},
    errors::errors::{Error, ErrorTip},
    lexer::{lexer::tokenize, tokens::Token},
    parser::{parse_tree::ParseNode, parser::parse},
};

pub mod ast;
pub mod builder;
pub mod codegen;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod runner;

extern crate regex;

/// A 1-based line/column location inside a named source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs the whole pipeline with default options and returns the generated
/// Python source.
pub fn transpile(source: &str, file: Option<String>) -> Result<String, Error> {
    transpile_with_options(source, file, &GeneratorOptions::default())
}

pub fn transpile_with_options(
    source: &str,
    file: Option<String>,
    options: &GeneratorOptions,
) -> Result<String, Error> {
    let file_name = Rc::new(file.unwrap_or_else(|| String::from("shell")));

    let start = Instant::now();
    let tokens = lex_stage(source, &file_name)?;
    let tree = parse_stage(tokens, &file_name)?;
    let program = build_stage(&tree)?;
    let output = generate_stage(&program, options)?;
    debug!("total time: {:?}", start.elapsed());

    Ok(output)
}

/// Each `*_stage` function runs one pipeline step and logs its timing. The
/// driver calls them one by one so it can stop after any step.
pub fn lex_stage(source: &str, file_name: &Rc<String>) -> Result<Vec<Token>, Error> {
    let start = Instant::now();
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    debug!("tokenized {} tokens in {:?}", tokens.len(), start.elapsed());

    Ok(tokens)
}

pub fn parse_stage(tokens: Vec<Token>, file_name: &Rc<String>) -> Result<ParseNode, Error> {
    let start = Instant::now();
    let tree = parse(tokens, Rc::clone(file_name))?;
    debug!("parsed in {:?}", start.elapsed());

    Ok(tree)
}

pub fn build_stage(tree: &ParseNode) -> Result<Program, Error> {
    let start = Instant::now();
    let program = build_program(tree)?;
    debug!(
        "built {} top-level statements in {:?}",
        program.statements.len(),
        start.elapsed()
    );

    Ok(program)
}

pub fn generate_stage(program: &Program, options: &GeneratorOptions) -> Result<String, Error> {
    let start = Instant::now();
    let output = generate(program, options)?;
    debug!("generated python in {:?}", start.elapsed());

    Ok(output)
}

/// Returns the text of the 1-based `line` in `source`, if it exists.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source.lines().nth(line as usize - 1)
}

/// Renders an error against its source text.
///
/// ```text
/// Error: SyntaxError (expected ENDIF or END, found end of input)
/// -> final.is:20:9
///    |
/// 20 | x = #
///    | ----^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}: {}\n", error.get_stage(), error.get_internal()));
    } else {
        rendered.push_str(&format!(
            "Error: {}: {} ({})\n",
            error.get_stage(),
            error.get_internal(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("-> {}\n", position));
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let line_text = get_line(source, position.line).unwrap_or("");
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", format_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
