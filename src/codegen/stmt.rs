use tracing::trace;

use crate::{
    ast::{
        ast::Stmt,
        statements::{ForeachStmt, IfStmt},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    codegen::{default_value, Generator},
    expr::{gen_call, gen_expression, infer_type, CallContext},
    scope::FrameKind,
};

pub fn gen_statement(generator: &mut Generator, statement: &Stmt) -> Result<(), Error> {
    trace!("generating statement at {}", statement.get_span().start);

    match statement {
        Stmt::VarDecl(decl) => {
            // The initializer sees the bindings from before the declaration
            let value = match &decl.assigned_value {
                Some(value) => gen_expression(generator, value)?,
                None => default_value(&decl.explicit_type).to_string(),
            };
            let name = generator.declare_variable(&decl.identifier, Some(decl.explicit_type));

            generator.emit_line(&format!("{} = {}", name, value));
        }
        Stmt::Assignment(assignment) => {
            let value = gen_expression(generator, &assignment.value)?;
            let target = generator.resolve_assignment(&assignment.target);

            generator.emit_line(&format!("{} = {}", target, value));
        }
        Stmt::If(if_stmt) => gen_if(generator, if_stmt, "if")?,
        Stmt::While(while_stmt) => {
            let condition = gen_expression(generator, &while_stmt.condition)?;
            generator.emit_line(&format!("while {}:", condition));

            generator.loop_depth += 1;
            let result = gen_block(generator, &while_stmt.body);
            generator.loop_depth -= 1;
            result?;
        }
        Stmt::Foreach(foreach) => gen_foreach(generator, foreach)?,
        Stmt::FnDecl(function) => {
            return Err(Error::new(
                ErrorImpl::UnsupportedNode {
                    node: format!("nested function definition `{}`", function.name),
                },
                function.span.start.clone(),
            ))
        }
        Stmt::Return(ret) => {
            if generator.function_depth == 0 {
                return Err(Error::new(
                    ErrorImpl::ReturnOutsideFunction,
                    ret.span.start.clone(),
                ));
            }

            match &ret.value {
                Some(value) => {
                    let value = gen_expression(generator, value)?;
                    generator.emit_line(&format!("return {}", value));
                }
                None => generator.emit_line("return"),
            }
        }
        Stmt::Print(print) => {
            let value = gen_expression(generator, &print.value)?;
            generator.emit_line(&format!("print({})", value));
        }
        Stmt::Break(break_stmt) => {
            if generator.loop_depth == 0 {
                return Err(Error::new(
                    ErrorImpl::BreakOutsideLoop,
                    break_stmt.span.start.clone(),
                ));
            }

            generator.emit_line("break");
        }
        Stmt::Expression(expression) => {
            let call = gen_call(generator, &expression.expression, CallContext::Statement)?;
            generator.emit_line(&call);
        }
    }

    Ok(())
}

/// Emits the statements of an already opened block, or `pass` if there are
/// none.
pub fn gen_body(generator: &mut Generator, body: &[Stmt]) -> Result<(), Error> {
    if body.is_empty() {
        generator.emit_line("pass");
        return Ok(());
    }

    for statement in body {
        gen_statement(generator, statement)?;
    }

    Ok(())
}

/// Emits a nested block in its own scope frame, one level deeper.
pub fn gen_block(generator: &mut Generator, body: &[Stmt]) -> Result<(), Error> {
    generator.scopes.push(FrameKind::Block);
    generator.indent_level += 1;

    let result = gen_body(generator, body);

    generator.indent_level -= 1;
    generator.scopes.pop();

    result
}

fn gen_if(generator: &mut Generator, if_stmt: &IfStmt, keyword: &str) -> Result<(), Error> {
    let condition = gen_expression(generator, &if_stmt.condition)?;
    generator.emit_line(&format!("{} {}:", keyword, condition));
    gen_block(generator, &if_stmt.then_body)?;

    match if_stmt.else_body.as_deref() {
        None => Ok(()),
        Some([Stmt::If(nested)]) => gen_if(generator, nested, "elif"),
        Some(else_body) => {
            generator.emit_line("else:");
            gen_block(generator, else_body)
        }
    }
}

fn gen_foreach(generator: &mut Generator, foreach: &ForeachStmt) -> Result<(), Error> {
    let iterable = gen_expression(generator, &foreach.iterable)?;
    let element_type = infer_type(generator, &foreach.iterable).and_then(|ty| ty.element());

    generator.scopes.push(FrameKind::Block);
    let variable = generator.declare_variable(&foreach.variable, element_type);
    generator.emit_line(&format!("for {} in {}:", variable, iterable));

    generator.indent_level += 1;
    generator.loop_depth += 1;
    let result = gen_body(generator, &foreach.body);
    generator.loop_depth -= 1;
    generator.indent_level -= 1;
    generator.scopes.pop();

    result
}
