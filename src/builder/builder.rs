//! Entry point and shared helpers for AST construction.

use tracing::trace;

use crate::{
    ast::{
        ast::{Program, Stmt},
        types::{BaseType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::parse_tree::{ParseNode, Rule},
};

use super::stmt::build_stmt;

/// Converts a `Program` parse tree into the canonical AST.
pub fn build_program(tree: &ParseNode) -> Result<Program, Error> {
    if tree.rule != Rule::Program {
        return Err(malformed(tree, "expected the program root"));
    }

    let statements = tree
        .nodes()
        .map(build_stmt)
        .collect::<Result<Vec<Stmt>, Error>>()?;

    trace!("built {} top-level statements", statements.len());

    Ok(Program { statements })
}

pub fn build_block(node: &ParseNode) -> Result<Vec<Stmt>, Error> {
    if node.rule != Rule::Block {
        return Err(malformed(node, "expected a block"));
    }

    node.nodes().map(build_stmt).collect()
}

pub fn build_type(node: &ParseNode) -> Result<Type, Error> {
    match node.rule {
        Rule::BaseType => Ok(Type::Base(build_base_type(node)?)),
        Rule::ListType => {
            let element = required_node(node, Rule::BaseType)?;
            Ok(Type::List(build_base_type(element)?))
        }
        Rule::MapType => {
            let mut parts = node.nodes().filter(|child| child.rule == Rule::BaseType);

            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) => Ok(Type::Map(
                    build_base_type(key)?,
                    build_base_type(value)?,
                )),
                _ => Err(malformed(node, "expected a key and a value type")),
            }
        }
        _ => Err(malformed(node, "expected a type")),
    }
}

fn build_base_type(node: &ParseNode) -> Result<BaseType, Error> {
    let token = node
        .tokens()
        .next()
        .ok_or_else(|| malformed(node, "expected a type keyword"))?;

    match token.kind {
        TokenKind::IntegerType => Ok(BaseType::Integer),
        TokenKind::FloatType => Ok(BaseType::Float),
        TokenKind::StringType => Ok(BaseType::String),
        TokenKind::BooleanType => Ok(BaseType::Boolean),
        TokenKind::NothingType => Ok(BaseType::Nothing),
        _ => Err(malformed(node, "expected a type keyword")),
    }
}

pub(crate) fn malformed(node: &ParseNode, message: &str) -> Error {
    Error::new(
        ErrorImpl::MalformedProduction {
            rule: node.rule.to_string(),
            message: message.to_string(),
        },
        node.span.start.clone(),
    )
}

pub(crate) fn required_token(node: &ParseNode, kind: TokenKind) -> Result<&Token, Error> {
    node.tokens()
        .find(|token| token.kind == kind)
        .ok_or_else(|| malformed(node, &format!("missing {}", kind.as_str())))
}

pub(crate) fn required_node(node: &ParseNode, rule: Rule) -> Result<&ParseNode, Error> {
    node.node(rule)
        .ok_or_else(|| malformed(node, &format!("missing {}", rule)))
}

pub(crate) fn required_expression(node: &ParseNode) -> Result<&ParseNode, Error> {
    node.expressions()
        .next()
        .ok_or_else(|| malformed(node, "missing expression"))
}
