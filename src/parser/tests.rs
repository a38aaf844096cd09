//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Both variable declaration spellings
//! - Both function declaration spellings
//! - Expressions and operator precedence
//! - Control flow statements and their terminators
//! - Syntax errors

use std::rc::Rc;

use crate::{
    errors::errors::{ErrorImpl, Stage},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

use super::{
    parse_tree::{ParseNode, Rule},
    parser::parse,
};

fn parse_source(source: &str) -> Result<ParseNode, crate::errors::errors::Error> {
    let tokens = tokenize(source.to_string(), Some("test.is".to_string())).unwrap();
    parse(tokens, Rc::new("test.is".to_string()))
}

fn first_statement(source: &str) -> ParseNode {
    let tree = parse_source(source).unwrap();
    let node = tree.nodes().next().unwrap().clone();
    node
}

fn rules(node: &ParseNode) -> Vec<Rule> {
    node.nodes().map(|child| child.rule).collect()
}

#[test]
fn test_parse_empty_program() {
    let tree = parse_source("").unwrap();

    assert_eq!(tree.rule, Rule::Program);
    assert!(tree.children.is_empty());
}

#[test]
fn test_parse_terse_variable_declaration() {
    let stmt = first_statement("count: INTEGER = 42");

    assert_eq!(stmt.rule, Rule::VarDecl);
    assert_eq!(rules(&stmt), vec![Rule::BaseType, Rule::Literal]);
    assert_eq!(stmt.tokens().next().unwrap().value, "count");
}

#[test]
fn test_parse_verbose_variable_declaration() {
    let stmt = first_statement("VAR count AS INTEGER = 42");

    assert_eq!(stmt.rule, Rule::VerboseVarDecl);
    assert_eq!(rules(&stmt), vec![Rule::BaseType, Rule::Literal]);
}

#[test]
fn test_parse_declaration_without_initializer() {
    let stmt = first_statement("names: LIST<STRING>");

    assert_eq!(stmt.rule, Rule::VarDecl);
    assert_eq!(rules(&stmt), vec![Rule::ListType]);
}

#[test]
fn test_parse_map_type() {
    let stmt = first_statement("VAR counts AS MAP<STRING, INTEGER> = {}");
    let map_type = stmt.type_node().unwrap();

    assert_eq!(map_type.rule, Rule::MapType);
    assert_eq!(rules(map_type), vec![Rule::BaseType, Rule::BaseType]);
}

#[test]
fn test_parse_nested_collection_type_is_rejected() {
    let error = parse_source("x: LIST<LIST<INTEGER>>").unwrap_err();

    assert_eq!(error.get_stage(), Stage::Syntax);
}

#[test]
fn test_parse_assignment_and_call_statements() {
    let tree = parse_source("x = 1\nADD_ELEMENT(items, x)").unwrap();
    let statements: Vec<Rule> = rules(&tree);

    assert_eq!(statements, vec![Rule::Assignment, Rule::CallStmt]);
}

#[test]
fn test_parse_terse_function_declaration() {
    let stmt = first_statement("FUNCTION add(a: INTEGER, b: INTEGER): INTEGER\n    RETURN a + b\nEND");

    assert_eq!(stmt.rule, Rule::FunctionDef);
    assert_eq!(rules(&stmt), vec![Rule::Params, Rule::BaseType, Rule::Block]);

    let params = stmt.node(Rule::Params).unwrap();
    assert_eq!(rules(params), vec![Rule::Param, Rule::Param]);
    assert_eq!(stmt.tokens().last().unwrap().kind, TokenKind::End);
}

#[test]
fn test_parse_verbose_function_declaration() {
    let stmt = first_statement(
        "FUNCTION add(PARAM a AS INTEGER, PARAM b AS INTEGER) RETURNS INTEGER\n    RETURN a + b\nENDFUNCTION",
    );

    assert_eq!(stmt.rule, Rule::VerboseFunctionDef);
    let params = stmt.node(Rule::Params).unwrap();
    assert_eq!(rules(params), vec![Rule::VerboseParam, Rule::VerboseParam]);
    assert_eq!(stmt.tokens().last().unwrap().kind, TokenKind::EndFunction);
}

#[test]
fn test_parse_verbose_function_without_parameters() {
    let stmt = first_statement("FUNCTION main() RETURNS NOTHING\n    PRINT 1\nENDFUNCTION");

    assert_eq!(stmt.rule, Rule::VerboseFunctionDef);
}

#[test]
fn test_parse_parameter_without_type() {
    let stmt = first_statement("FUNCTION f(a, b: INTEGER)\nEND");
    let params = stmt.node(Rule::Params).unwrap();
    let first = params.nodes().next().unwrap();

    assert_eq!(first.rule, Rule::Param);
    assert!(first.type_node().is_none());
}

#[test]
fn test_parse_if_else_statement() {
    let stmt = first_statement("IF x > 0 THEN\n    PRINT x\nELSE\n    PRINT 0\nENDIF");

    assert_eq!(stmt.rule, Rule::If);
    assert_eq!(rules(&stmt), vec![Rule::Binary, Rule::Block, Rule::Else]);
    assert_eq!(stmt.tokens().last().unwrap().kind, TokenKind::EndIf);
}

#[test]
fn test_parse_generic_end_terminator() {
    let tree = parse_source("IF x THEN PRINT 1 END\nWHILE x PRINT 2 END").unwrap();

    assert_eq!(rules(&tree), vec![Rule::If, Rule::While]);
}

#[test]
fn test_parse_while_and_foreach() {
    let tree = parse_source(
        "WHILE i < 10 DO\n    i = i + 1\nENDWHILE\nFOREACH item IN items DO\n    PRINT item\nENDFOREACH",
    )
    .unwrap();

    assert_eq!(rules(&tree), vec![Rule::While, Rule::Foreach]);
}

#[test]
fn test_parse_empty_block() {
    let stmt = first_statement("WHILE FALSE DO\nENDWHILE");
    let block = stmt.node(Rule::Block).unwrap();

    assert!(block.children.is_empty());
}

#[test]
fn test_parse_return_value_on_same_line_only() {
    let tree = parse_source("FUNCTION f()\n    RETURN\n    x = 1\nEND").unwrap();
    let function = tree.nodes().next().unwrap();
    let body = function.node(Rule::Block).unwrap();

    assert_eq!(rules(body), vec![Rule::Return, Rule::Assignment]);
    assert!(body.nodes().next().unwrap().children.len() == 1);
}

#[test]
fn test_parse_precedence() {
    let stmt = first_statement("x = 1 + 2 * 3");
    let value = stmt.expressions().next().unwrap();

    assert_eq!(value.rule, Rule::Binary);
    assert_eq!(value.tokens().next().unwrap().kind, TokenKind::Plus);
    assert_eq!(rules(value), vec![Rule::Literal, Rule::Binary]);
}

#[test]
fn test_parse_left_associative() {
    let stmt = first_statement("x = 10 - 4 - 3");
    let value = stmt.expressions().next().unwrap();

    // ((10 - 4) - 3)
    assert_eq!(rules(value), vec![Rule::Binary, Rule::Literal]);
}

#[test]
fn test_parse_grouping_overrides_precedence() {
    let stmt = first_statement("x = (1 + 2) * 3");
    let value = stmt.expressions().next().unwrap();

    assert_eq!(value.tokens().next().unwrap().kind, TokenKind::Star);
    assert_eq!(rules(value), vec![Rule::Group, Rule::Literal]);
}

#[test]
fn test_parse_logical_precedence() {
    let stmt = first_statement("x = a OR b AND NOT c == d");
    let value = stmt.expressions().next().unwrap();

    assert_eq!(value.tokens().next().unwrap().kind, TokenKind::Or);

    let and = value.nodes().nth(1).unwrap();
    assert_eq!(and.tokens().next().unwrap().kind, TokenKind::And);

    let not = and.nodes().nth(1).unwrap();
    assert_eq!(not.rule, Rule::Unary);
    assert_eq!(rules(not), vec![Rule::Binary]);
}

#[test]
fn test_parse_unary_minus_binds_tightest() {
    let stmt = first_statement("x = -a * b");
    let value = stmt.expressions().next().unwrap();

    assert_eq!(value.tokens().next().unwrap().kind, TokenKind::Star);
    assert_eq!(rules(value), vec![Rule::Unary, Rule::Identifier]);
}

#[test]
fn test_parse_collection_literals() {
    let list = first_statement("x = [1, 2, 3]");
    let list = list.expressions().next().unwrap();
    assert_eq!(list.rule, Rule::List);
    assert_eq!(list.nodes().count(), 3);

    let map = first_statement("x = {\"a\": 1, \"b\": 2}");
    let map = map.expressions().next().unwrap();
    assert_eq!(map.rule, Rule::Map);
    assert_eq!(rules(map), vec![Rule::MapEntry, Rule::MapEntry]);
}

#[test]
fn test_parse_call_arguments() {
    let stmt = first_statement("PRINT max_of(1, f(2), [3])");
    let call = stmt.expressions().next().unwrap();
    let arguments = call.node(Rule::Arguments).unwrap();

    assert_eq!(call.rule, Rule::Call);
    assert_eq!(rules(arguments), vec![Rule::Literal, Rule::Call, Rule::List]);
}

#[test]
fn test_parse_missing_terminator() {
    let error = parse_source("IF x > 0 THEN\n    PRINT x\n").unwrap_err();

    assert_eq!(error.get_stage(), Stage::Syntax);
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::UnexpectedToken {
            expected: "ENDIF or END".to_string(),
            found: "end of input".to_string(),
        }
    );
    assert_eq!(error.get_position().line, 3);
}

#[test]
fn test_parse_mismatched_terminator() {
    let error = parse_source("WHILE x DO\n    PRINT x\nENDIF").unwrap_err();

    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 1);
}

#[test]
fn test_parse_unexpected_token_after_identifier() {
    let error = parse_source("x 5").unwrap_err();

    assert_eq!(
        error.get_internal(),
        &ErrorImpl::UnexpectedToken {
            expected: "`:`, `=` or `(` after identifier".to_string(),
            found: "number `5`".to_string(),
        }
    );
    assert_eq!(error.get_position().column, 3);
}

#[test]
fn test_parse_unclosed_call() {
    let error = parse_source("PRINT f(1, 2").unwrap_err();

    assert_eq!(error.get_stage(), Stage::Syntax);
}

#[test]
fn test_parse_tree_pretty() {
    let tree = parse_source("PRINT 1").unwrap();

    assert_eq!(tree.pretty(), "Program\n  Print\n    Print\n    Literal\n      Integer (1)\n");
}
