use crate::{errors::errors::Error, lexer::tokens::TokenKind, Position, Span};

use super::{
    expr::{parse_expr, parse_symbol_expr},
    lookups::BindingPower,
    parse_tree::{ParseElement, ParseNode, Rule},
    parser::{describe_kinds, Parser},
    types::parse_type,
};

const IF_TERMINATORS: [TokenKind; 2] = [TokenKind::EndIf, TokenKind::End];
const WHILE_TERMINATORS: [TokenKind; 2] = [TokenKind::EndWhile, TokenKind::End];
const FOREACH_TERMINATORS: [TokenKind; 2] = [TokenKind::EndForeach, TokenKind::End];
const FUNCTION_TERMINATORS: [TokenKind; 2] = [TokenKind::End, TokenKind::EndFunction];
const VERBOSE_FUNCTION_TERMINATORS: [TokenKind; 2] = [TokenKind::EndFunction, TokenKind::End];

pub fn parse_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let handler = match parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected("a statement")),
    };

    handler(parser)
}

fn finish(parser: &Parser, rule: Rule, children: Vec<ParseElement>, start: Position) -> ParseNode {
    ParseNode::new(
        rule,
        children,
        Span {
            start,
            end: parser.get_previous_end(),
        },
    )
}

/// Parses statements until one of `stops` is reached. Reaching the end of
/// input first reports the construct's missing `closing` terminator.
fn parse_block(
    parser: &mut Parser,
    stops: &[TokenKind],
    closing: &[TokenKind],
) -> Result<ParseNode, Error> {
    let start = parser.get_position();
    let mut body = vec![];

    while !stops.contains(&parser.current_token_kind()) {
        if !parser.has_tokens() {
            return Err(parser.unexpected(&describe_kinds(closing)));
        }

        body.push(ParseElement::Node(parse_stmt(parser)?));
    }

    Ok(ParseNode::new(
        Rule::Block,
        body,
        Span {
            start,
            end: parser.get_position(),
        },
    ))
}

/// Statements that begin with an identifier: `name: TYPE`, `name = value`
/// or `name(args)`.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    match parser.peek_kind(1) {
        TokenKind::Colon => parse_var_decl_stmt(parser),
        TokenKind::Assignment => parse_assignment_stmt(parser),
        TokenKind::OpenParen => parse_call_stmt(parser),
        _ => {
            parser.advance();
            Err(parser.unexpected("`:`, `=` or `(` after identifier"))
        }
    }
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    let start = name.span.start.clone();
    let colon = parser.expect(TokenKind::Colon)?;
    let explicit_type = parse_type(parser)?;

    let mut children = vec![
        ParseElement::Token(name),
        ParseElement::Token(colon),
        ParseElement::Node(explicit_type),
    ];

    if let Some(assignment) = parser.accept(TokenKind::Assignment) {
        children.push(ParseElement::Token(assignment));
        children.push(ParseElement::Node(parse_expr(parser, BindingPower::Default)?));
    }

    Ok(finish(parser, Rule::VarDecl, children, start))
}

pub fn parse_verbose_var_decl_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let var = parser.expect(TokenKind::Var)?;
    let start = var.span.start.clone();
    let name = parser.expect(TokenKind::Identifier)?;
    let as_token = parser.expect(TokenKind::As)?;
    let explicit_type = parse_type(parser)?;

    let mut children = vec![
        ParseElement::Token(var),
        ParseElement::Token(name),
        ParseElement::Token(as_token),
        ParseElement::Node(explicit_type),
    ];

    if let Some(assignment) = parser.accept(TokenKind::Assignment) {
        children.push(ParseElement::Token(assignment));
        children.push(ParseElement::Node(parse_expr(parser, BindingPower::Default)?));
    }

    Ok(finish(parser, Rule::VerboseVarDecl, children, start))
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    let start = name.span.start.clone();
    let assignment = parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(finish(
        parser,
        Rule::Assignment,
        vec![
            ParseElement::Token(name),
            ParseElement::Token(assignment),
            ParseElement::Node(value),
        ],
        start,
    ))
}

pub fn parse_call_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let call = parse_symbol_expr(parser)?;
    let span = call.span.clone();

    Ok(ParseNode::new(Rule::CallStmt, vec![ParseElement::Node(call)], span))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let print = parser.expect(TokenKind::Print)?;
    let start = print.span.start.clone();
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(finish(
        parser,
        Rule::Print,
        vec![ParseElement::Token(print), ParseElement::Node(value)],
        start,
    ))
}

/// `RETURN` takes a value only when one starts on the same line.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let return_token = parser.expect(TokenKind::Return)?;
    let start = return_token.span.start.clone();
    let line = start.line;
    let mut children = vec![ParseElement::Token(return_token)];

    let has_value = parser.has_tokens()
        && parser.current_token().span.start.line == line
        && parser
            .get_nud_lookup()
            .contains_key(&parser.current_token_kind());

    if has_value {
        children.push(ParseElement::Node(parse_expr(parser, BindingPower::Default)?));
    }

    Ok(finish(parser, Rule::Return, children, start))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let break_token = parser.expect(TokenKind::Break)?;
    let span = break_token.span.clone();

    Ok(ParseNode::new(Rule::Break, vec![ParseElement::Token(break_token)], span))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let if_token = parser.expect(TokenKind::If)?;
    let start = if_token.span.start.clone();
    let mut children = vec![ParseElement::Token(if_token)];

    children.push(ParseElement::Node(parse_expr(parser, BindingPower::Default)?));

    if let Some(then) = parser.accept(TokenKind::Then) {
        children.push(ParseElement::Token(then));
    }

    let stops = [TokenKind::Else, TokenKind::EndIf, TokenKind::End];
    children.push(ParseElement::Node(parse_block(parser, &stops, &IF_TERMINATORS)?));

    if let Some(else_token) = parser.accept(TokenKind::Else) {
        let else_start = else_token.span.start.clone();
        let block = parse_block(parser, &IF_TERMINATORS, &IF_TERMINATORS)?;

        children.push(ParseElement::Node(finish(
            parser,
            Rule::Else,
            vec![ParseElement::Token(else_token), ParseElement::Node(block)],
            else_start,
        )));
    }

    children.push(ParseElement::Token(parser.expect_one_of(&IF_TERMINATORS)?));

    Ok(finish(parser, Rule::If, children, start))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let while_token = parser.expect(TokenKind::While)?;
    let start = while_token.span.start.clone();
    let mut children = vec![ParseElement::Token(while_token)];

    children.push(ParseElement::Node(parse_expr(parser, BindingPower::Default)?));

    if let Some(do_token) = parser.accept(TokenKind::Do) {
        children.push(ParseElement::Token(do_token));
    }

    children.push(ParseElement::Node(parse_block(
        parser,
        &WHILE_TERMINATORS,
        &WHILE_TERMINATORS,
    )?));
    children.push(ParseElement::Token(parser.expect_one_of(&WHILE_TERMINATORS)?));

    Ok(finish(parser, Rule::While, children, start))
}

pub fn parse_foreach_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let foreach = parser.expect(TokenKind::Foreach)?;
    let start = foreach.span.start.clone();
    let variable = parser.expect(TokenKind::Identifier)?;
    let in_token = parser.expect(TokenKind::In)?;

    let mut children = vec![
        ParseElement::Token(foreach),
        ParseElement::Token(variable),
        ParseElement::Token(in_token),
        ParseElement::Node(parse_expr(parser, BindingPower::Default)?),
    ];

    if let Some(do_token) = parser.accept(TokenKind::Do) {
        children.push(ParseElement::Token(do_token));
    }

    children.push(ParseElement::Node(parse_block(
        parser,
        &FOREACH_TERMINATORS,
        &FOREACH_TERMINATORS,
    )?));
    children.push(ParseElement::Token(parser.expect_one_of(&FOREACH_TERMINATORS)?));

    Ok(finish(parser, Rule::Foreach, children, start))
}

/// Picks the verbose production when the parameter list opens with `PARAM`,
/// or is empty and followed by `RETURNS`.
pub fn parse_function_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    // FUNCTION name ( ...
    let verbose = parser.peek_kind(3) == TokenKind::Param
        || (parser.peek_kind(3) == TokenKind::CloseParen
            && parser.peek_kind(4) == TokenKind::Returns);

    if verbose {
        parse_verbose_function_stmt(parser)
    } else {
        parse_terse_function_stmt(parser)
    }
}

fn parse_terse_function_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let function = parser.expect(TokenKind::Function)?;
    let start = function.span.start.clone();
    let name = parser.expect(TokenKind::Identifier)?;
    let params = parse_params(parser, parse_param)?;

    let mut children = vec![
        ParseElement::Token(function),
        ParseElement::Token(name),
        ParseElement::Node(params),
    ];

    if let Some(colon) = parser.accept(TokenKind::Colon) {
        children.push(ParseElement::Token(colon));
        children.push(ParseElement::Node(parse_type(parser)?));
    }

    children.push(ParseElement::Node(parse_block(
        parser,
        &FUNCTION_TERMINATORS,
        &FUNCTION_TERMINATORS,
    )?));
    children.push(ParseElement::Token(parser.expect_one_of(&FUNCTION_TERMINATORS)?));

    Ok(finish(parser, Rule::FunctionDef, children, start))
}

fn parse_verbose_function_stmt(parser: &mut Parser) -> Result<ParseNode, Error> {
    let function = parser.expect(TokenKind::Function)?;
    let start = function.span.start.clone();
    let name = parser.expect(TokenKind::Identifier)?;
    let params = parse_params(parser, parse_verbose_param)?;

    let mut children = vec![
        ParseElement::Token(function),
        ParseElement::Token(name),
        ParseElement::Node(params),
    ];

    if let Some(returns) = parser.accept(TokenKind::Returns) {
        children.push(ParseElement::Token(returns));
        children.push(ParseElement::Node(parse_type(parser)?));
    }

    children.push(ParseElement::Node(parse_block(
        parser,
        &VERBOSE_FUNCTION_TERMINATORS,
        &VERBOSE_FUNCTION_TERMINATORS,
    )?));
    children.push(ParseElement::Token(
        parser.expect_one_of(&VERBOSE_FUNCTION_TERMINATORS)?,
    ));

    Ok(finish(parser, Rule::VerboseFunctionDef, children, start))
}

fn parse_params(
    parser: &mut Parser,
    parse_one: fn(&mut Parser) -> Result<ParseNode, Error>,
) -> Result<ParseNode, Error> {
    let open = parser.expect(TokenKind::OpenParen)?;
    let start = open.span.start.clone();
    let mut children = vec![ParseElement::Token(open)];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            children.push(ParseElement::Node(parse_one(parser)?));

            match parser.accept(TokenKind::Comma) {
                Some(comma) => children.push(ParseElement::Token(comma)),
                None => break,
            }
        }
    }

    if parser.current_token_kind() != TokenKind::CloseParen {
        return Err(parser.unexpected("`,` or `)`"));
    }
    children.push(ParseElement::Token(parser.advance()));

    Ok(finish(parser, Rule::Params, children, start))
}

// The type is optional here so that its absence is reported by the AST builder.
fn parse_param(parser: &mut Parser) -> Result<ParseNode, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    let start = name.span.start.clone();
    let mut children = vec![ParseElement::Token(name)];

    if let Some(colon) = parser.accept(TokenKind::Colon) {
        children.push(ParseElement::Token(colon));
        children.push(ParseElement::Node(parse_type(parser)?));
    }

    Ok(finish(parser, Rule::Param, children, start))
}

fn parse_verbose_param(parser: &mut Parser) -> Result<ParseNode, Error> {
    let param = parser.expect(TokenKind::Param)?;
    let start = param.span.start.clone();
    let name = parser.expect(TokenKind::Identifier)?;
    let mut children = vec![ParseElement::Token(param), ParseElement::Token(name)];

    if let Some(as_token) = parser.accept(TokenKind::As) {
        children.push(ParseElement::Token(as_token));
        children.push(ParseElement::Node(parse_type(parser)?));
    }

    Ok(finish(parser, Rule::VerboseParam, children, start))
}
