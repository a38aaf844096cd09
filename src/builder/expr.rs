use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BinaryExpr, BinaryOperator, CallExpr, ListExpr, Literal, LiteralExpr, MapExpr,
            SymbolExpr, UnaryExpr, UnaryOperator,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::parse_tree::{ParseNode, Rule},
};

use super::builder::{malformed, required_expression, required_node, required_token};

pub fn build_expr(node: &ParseNode) -> Result<Expr, Error> {
    match node.rule {
        Rule::Literal => Ok(Expr::Literal(LiteralExpr {
            value: build_literal(node, false)?,
            span: node.span.clone(),
        })),
        Rule::Identifier => Ok(Expr::Symbol(SymbolExpr {
            value: required_token(node, TokenKind::Identifier)?.value.clone(),
            span: node.span.clone(),
        })),
        Rule::Call => Ok(Expr::Call(build_call(node)?)),
        Rule::Binary => {
            let mut operands = node.expressions();
            let (left, right) = match (operands.next(), operands.next()) {
                (Some(left), Some(right)) => (left, right),
                _ => return Err(malformed(node, "expected two operands")),
            };

            let operator = node
                .tokens()
                .next()
                .and_then(|token| BinaryOperator::from_token_kind(token.kind))
                .ok_or_else(|| malformed(node, "expected a binary operator"))?;

            Ok(Expr::Binary(BinaryExpr {
                left: Box::new(build_expr(left)?),
                operator,
                right: Box::new(build_expr(right)?),
                span: node.span.clone(),
            }))
        }
        Rule::Unary => build_unary(node),
        Rule::Group => build_expr(required_expression(node)?),
        Rule::List => Ok(Expr::List(ListExpr {
            elements: node
                .expressions()
                .map(build_expr)
                .collect::<Result<Vec<Expr>, Error>>()?,
            span: node.span.clone(),
        })),
        Rule::Map => {
            let mut entries = vec![];

            for entry in node.nodes().filter(|child| child.rule == Rule::MapEntry) {
                let mut parts = entry.expressions();
                match (parts.next(), parts.next()) {
                    (Some(key), Some(value)) => entries.push((build_expr(key)?, build_expr(value)?)),
                    _ => return Err(malformed(entry, "expected a key and a value")),
                }
            }

            Ok(Expr::Map(MapExpr {
                entries,
                span: node.span.clone(),
            }))
        }
        _ => Err(malformed(node, "expected an expression")),
    }
}

pub fn build_call(node: &ParseNode) -> Result<CallExpr, Error> {
    if node.rule != Rule::Call {
        return Err(malformed(node, "expected a call"));
    }

    let name = required_token(node, TokenKind::Identifier)?.value.clone();
    let arguments = required_node(node, Rule::Arguments)?
        .expressions()
        .map(build_expr)
        .collect::<Result<Vec<Expr>, Error>>()?;

    Ok(CallExpr {
        name,
        arguments,
        span: node.span.clone(),
    })
}

/// A sign applied directly to a numeric literal folds into the literal.
fn build_unary(node: &ParseNode) -> Result<Expr, Error> {
    let operator = node
        .tokens()
        .next()
        .and_then(|token| UnaryOperator::from_token_kind(token.kind))
        .ok_or_else(|| malformed(node, "expected a unary operator"))?;
    let operand = required_expression(node)?;

    let numeric_operand = operand.rule == Rule::Literal
        && operand
            .tokens()
            .next()
            .is_some_and(|token| matches!(token.kind, TokenKind::Integer | TokenKind::Float));

    if numeric_operand && operator != UnaryOperator::Not {
        return Ok(Expr::Literal(LiteralExpr {
            value: build_literal(operand, operator == UnaryOperator::Negate)?,
            span: node.span.clone(),
        }));
    }

    Ok(Expr::Unary(UnaryExpr {
        operator,
        operand: Box::new(build_expr(operand)?),
        span: node.span.clone(),
    }))
}

fn build_literal(node: &ParseNode, negate: bool) -> Result<Literal, Error> {
    let token = node
        .tokens()
        .next()
        .ok_or_else(|| malformed(node, "expected a literal token"))?;

    let text = if negate {
        format!("-{}", token.value)
    } else {
        token.value.clone()
    };
    let number_error = || {
        Error::new(
            ErrorImpl::NumberParseError { token: text.clone() },
            token.span.start.clone(),
        )
    };

    match token.kind {
        TokenKind::Integer => text.parse::<i64>().map(Literal::Integer).map_err(|_| number_error()),
        TokenKind::Float => text.parse::<f64>().map(Literal::Float).map_err(|_| number_error()),
        TokenKind::String => token
            .value
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
            .map(|inner| Literal::String(inner.to_string()))
            .ok_or_else(|| malformed(node, "expected a quoted string")),
        TokenKind::True => Ok(Literal::Boolean(true)),
        TokenKind::False => Ok(Literal::Boolean(false)),
        TokenKind::Null => Ok(Literal::Null),
        _ => Err(malformed(node, "expected a literal token")),
    }
}
