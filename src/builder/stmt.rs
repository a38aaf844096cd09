use tracing::trace;

use crate::{
    ast::{
        ast::Stmt,
        statements::{
            AssignmentStmt, BreakStmt, ExpressionStmt, FnDeclStmt, ForeachStmt, IfStmt,
            Parameter, PrintStmt, ReturnStmt, VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::parse_tree::{ParseNode, Rule},
};

use super::{
    builder::{build_block, build_type, malformed, required_expression, required_node, required_token},
    expr::{build_call, build_expr},
};

pub fn build_stmt(node: &ParseNode) -> Result<Stmt, Error> {
    trace!("building {} at {}", node.rule, node.span.start);

    match node.rule {
        // Both declaration spellings produce the same node
        Rule::VarDecl | Rule::VerboseVarDecl => {
            let identifier = required_token(node, TokenKind::Identifier)?.value.clone();
            let explicit_type = match node.type_node() {
                Some(type_node) => build_type(type_node)?,
                None => return Err(malformed(node, "missing type")),
            };
            let assigned_value = match node.expressions().next() {
                Some(value) => Some(build_expr(value)?),
                None => None,
            };

            Ok(Stmt::VarDecl(VarDeclStmt {
                identifier,
                explicit_type,
                assigned_value,
                span: node.span.clone(),
            }))
        }
        Rule::Assignment => Ok(Stmt::Assignment(AssignmentStmt {
            target: required_token(node, TokenKind::Identifier)?.value.clone(),
            value: build_expr(required_expression(node)?)?,
            span: node.span.clone(),
        })),
        Rule::CallStmt => Ok(Stmt::Expression(ExpressionStmt {
            expression: build_call(required_node(node, Rule::Call)?)?,
            span: node.span.clone(),
        })),
        Rule::Print => Ok(Stmt::Print(PrintStmt {
            value: build_expr(required_expression(node)?)?,
            span: node.span.clone(),
        })),
        Rule::Return => {
            let value = match node.expressions().next() {
                Some(value) => Some(build_expr(value)?),
                None => None,
            };

            Ok(Stmt::Return(ReturnStmt {
                value,
                span: node.span.clone(),
            }))
        }
        Rule::Break => Ok(Stmt::Break(BreakStmt {
            span: node.span.clone(),
        })),
        Rule::If => {
            let else_body = match node.node(Rule::Else) {
                Some(else_node) => Some(build_block(required_node(else_node, Rule::Block)?)?),
                None => None,
            };

            Ok(Stmt::If(IfStmt {
                condition: build_expr(required_expression(node)?)?,
                then_body: build_block(required_node(node, Rule::Block)?)?,
                else_body,
                span: node.span.clone(),
            }))
        }
        Rule::While => Ok(Stmt::While(WhileStmt {
            condition: build_expr(required_expression(node)?)?,
            body: build_block(required_node(node, Rule::Block)?)?,
            span: node.span.clone(),
        })),
        Rule::Foreach => Ok(Stmt::Foreach(ForeachStmt {
            variable: required_token(node, TokenKind::Identifier)?.value.clone(),
            iterable: build_expr(required_expression(node)?)?,
            body: build_block(required_node(node, Rule::Block)?)?,
            span: node.span.clone(),
        })),
        Rule::FunctionDef | Rule::VerboseFunctionDef => build_function(node),
        _ => Err(malformed(node, "expected a statement")),
    }
}

fn build_function(node: &ParseNode) -> Result<Stmt, Error> {
    let name = required_token(node, TokenKind::Identifier)?.value.clone();
    let params = required_node(node, Rule::Params)?;

    let mut parameters = vec![];
    for param in params.nodes() {
        if !matches!(param.rule, Rule::Param | Rule::VerboseParam) {
            return Err(malformed(param, "expected a parameter"));
        }

        let param_name = required_token(param, TokenKind::Identifier)?.value.clone();
        let param_type = match param.type_node() {
            Some(type_node) => build_type(type_node)?,
            None => {
                return Err(Error::new(
                    ErrorImpl::MissingParameterType {
                        function: name,
                        parameter: param_name,
                    },
                    param.span.start.clone(),
                ))
            }
        };

        parameters.push(Parameter {
            name: param_name,
            param_type,
            span: param.span.clone(),
        });
    }

    let return_type = match node.type_node() {
        Some(type_node) => Some(build_type(type_node)?),
        None => None,
    };

    Ok(Stmt::FnDecl(FnDeclStmt {
        name,
        parameters,
        return_type,
        body: build_block(required_node(node, Rule::Block)?)?,
        span: node.span.clone(),
    }))
}
