//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Base types (`INTEGER`, `FLOAT`, `STRING`, `BOOLEAN`, `NOTHING`)
//! - List types (`LIST<INTEGER>`)
//! - Map types (`MAP<STRING, INTEGER>`)
//!
//! Collection element types must themselves be base types.

use std::collections::HashMap;

use crate::{errors::errors::Error, lexer::tokens::TokenKind, Span};

use super::{
    parse_tree::{ParseElement, ParseNode, Rule},
    parser::Parser,
};

/// Type alias for type handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<ParseNode, Error>;

/// Type alias for type lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

const BASE_TYPES: [TokenKind; 5] = [
    TokenKind::IntegerType,
    TokenKind::FloatType,
    TokenKind::StringType,
    TokenKind::BooleanType,
    TokenKind::NothingType,
];

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    for kind in BASE_TYPES {
        parser.type_nud(kind, parse_base_type);
    }

    parser.type_nud(TokenKind::ListType, parse_list_type);
    parser.type_nud(TokenKind::MapType, parse_map_type);
}

/// Parses a type annotation.
pub fn parse_type(parser: &mut Parser) -> Result<ParseNode, Error> {
    let token_kind = parser.current_token_kind();
    let handler = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected("a type")),
    };

    handler(parser)
}

pub fn parse_base_type(parser: &mut Parser) -> Result<ParseNode, Error> {
    if !BASE_TYPES.contains(&parser.current_token_kind()) {
        return Err(parser.unexpected("a base type"));
    }

    let token = parser.advance();
    let span = token.span.clone();

    Ok(ParseNode::new(Rule::BaseType, vec![ParseElement::Token(token)], span))
}

pub fn parse_list_type(parser: &mut Parser) -> Result<ParseNode, Error> {
    let list = parser.expect(TokenKind::ListType)?;
    let start = list.span.start.clone();
    let open = parser.expect(TokenKind::Less)?;
    let element = parse_base_type(parser)?;
    let close = parser.expect(TokenKind::Greater)?;

    Ok(ParseNode::new(
        Rule::ListType,
        vec![
            ParseElement::Token(list),
            ParseElement::Token(open),
            ParseElement::Node(element),
            ParseElement::Token(close),
        ],
        Span {
            start,
            end: parser.get_previous_end(),
        },
    ))
}

pub fn parse_map_type(parser: &mut Parser) -> Result<ParseNode, Error> {
    let map = parser.expect(TokenKind::MapType)?;
    let start = map.span.start.clone();
    let open = parser.expect(TokenKind::Less)?;
    let key = parse_base_type(parser)?;
    let comma = parser.expect(TokenKind::Comma)?;
    let value = parse_base_type(parser)?;
    let close = parser.expect(TokenKind::Greater)?;

    Ok(ParseNode::new(
        Rule::MapType,
        vec![
            ParseElement::Token(map),
            ParseElement::Token(open),
            ParseElement::Node(key),
            ParseElement::Token(comma),
            ParseElement::Node(value),
            ParseElement::Token(close),
        ],
        Span {
            start,
            end: parser.get_previous_end(),
        },
    ))
}
