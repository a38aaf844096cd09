use crate::{
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{
    lookups::BindingPower,
    parse_tree::{ParseElement, ParseNode, Rule},
    parser::Parser,
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<ParseNode, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected("an expression")),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the current context, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);

        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(handler) => *handler,
            None => return Err(parser.unexpected("an operator")),
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<ParseNode, Error> {
    let token = parser.advance();
    let span = token.span.clone();

    Ok(ParseNode::new(Rule::Literal, vec![ParseElement::Token(token)], span))
}

/// Parses a bare identifier, or a call when it is followed by `(`.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<ParseNode, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    let start = name.span.start.clone();

    if parser.current_token_kind() != TokenKind::OpenParen {
        let span = name.span.clone();
        return Ok(ParseNode::new(Rule::Identifier, vec![ParseElement::Token(name)], span));
    }

    let arguments = parse_arguments(parser)?;

    Ok(ParseNode::new(
        Rule::Call,
        vec![ParseElement::Token(name), ParseElement::Node(arguments)],
        Span {
            start,
            end: parser.get_previous_end(),
        },
    ))
}

fn parse_arguments(parser: &mut Parser) -> Result<ParseNode, Error> {
    let open = parser.expect(TokenKind::OpenParen)?;
    let start = open.span.start.clone();
    let mut children = vec![ParseElement::Token(open)];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            children.push(ParseElement::Node(parse_expr(parser, BindingPower::Default)?));

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

    Ok(ParseNode::new(
        Rule::Arguments,
        children,
        Span {
            start,
            end: parser.get_previous_end(),
        },
    ))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: ParseNode,
    bp: BindingPower,
) -> Result<ParseNode, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    Ok(ParseNode::new(
        Rule::Binary,
        vec![
            ParseElement::Node(left),
            ParseElement::Token(operator_token),
            ParseElement::Node(right),
        ],
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<ParseNode, Error> {
    let operator_token = parser.advance();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    prefix_node(operator_token, rhs)
}

/// `NOT` binds looser than comparisons, so `NOT a == b` negates the comparison.
pub fn parse_not_expr(parser: &mut Parser) -> Result<ParseNode, Error> {
    let operator_token = parser.advance();
    let rhs = parse_expr(parser, BindingPower::LogicalNot)?;

    prefix_node(operator_token, rhs)
}

fn prefix_node(operator_token: Token, rhs: ParseNode) -> Result<ParseNode, Error> {
    let span = Span {
        start: operator_token.span.start.clone(),
        end: rhs.span.end.clone(),
    };

    Ok(ParseNode::new(
        Rule::Unary,
        vec![ParseElement::Token(operator_token), ParseElement::Node(rhs)],
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ParseNode, Error> {
    let open = parser.advance();
    let start = open.span.start.clone();
    let expr = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;
    let end = close.span.end.clone();

    Ok(ParseNode::new(
        Rule::Group,
        vec![
            ParseElement::Token(open),
            ParseElement::Node(expr),
            ParseElement::Token(close),
        ],
        Span { start, end },
    ))
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<ParseNode, Error> {
    let open = parser.advance();
    let start = open.span.start.clone();
    let mut children = vec![ParseElement::Token(open)];

    if parser.current_token_kind() != TokenKind::CloseBracket {
        loop {
            children.push(ParseElement::Node(parse_expr(parser, BindingPower::Default)?));

            match parser.accept(TokenKind::Comma) {
                Some(comma) => children.push(ParseElement::Token(comma)),
                None => break,
            }
        }
    }

    if parser.current_token_kind() != TokenKind::CloseBracket {
        return Err(parser.unexpected("`,` or `]`"));
    }
    children.push(ParseElement::Token(parser.advance()));

    Ok(ParseNode::new(
        Rule::List,
        children,
        Span {
            start,
            end: parser.get_previous_end(),
        },
    ))
}

pub fn parse_map_expr(parser: &mut Parser) -> Result<ParseNode, Error> {
    let open = parser.advance();
    let start = open.span.start.clone();
    let mut children = vec![ParseElement::Token(open)];

    if parser.current_token_kind() != TokenKind::CloseCurly {
        loop {
            let key = parse_expr(parser, BindingPower::Default)?;
            let colon = parser.expect(TokenKind::Colon)?;
            let value = parse_expr(parser, BindingPower::Default)?;

            let span = Span {
                start: key.span.start.clone(),
                end: value.span.end.clone(),
            };
            children.push(ParseElement::Node(ParseNode::new(
                Rule::MapEntry,
                vec![
                    ParseElement::Node(key),
                    ParseElement::Token(colon),
                    ParseElement::Node(value),
                ],
                span,
            )));

            match parser.accept(TokenKind::Comma) {
                Some(comma) => children.push(ParseElement::Token(comma)),
                None => break,
            }
        }
    }

    if parser.current_token_kind() != TokenKind::CloseCurly {
        return Err(parser.unexpected("`,` or `}`"));
    }
    children.push(ParseElement::Token(parser.advance()));

    Ok(ParseNode::new(
        Rule::Map,
        children,
        Span {
            start,
            end: parser.get_previous_end(),
        },
    ))
}
