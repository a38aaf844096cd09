use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryOperator, CallExpr, Literal, UnaryOperator},
        types::{BaseType, Type},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    codegen::Generator,
    stdlib::{self, ReceiverKind},
};

/// Where a call appears, which decides whether statement-only library
/// entries are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallContext {
    Statement,
    Expression,
}

pub fn gen_expression(generator: &mut Generator, expression: &Expr) -> Result<String, Error> {
    match expression {
        Expr::Literal(literal) => Ok(gen_literal(&literal.value)),
        Expr::Symbol(symbol) => Ok(generator.resolve_variable(&symbol.value)),
        Expr::Binary(binary) => {
            let left = gen_expression(generator, &binary.left)?;
            let right = gen_expression(generator, &binary.right)?;

            Ok(format!("({} {} {})", left, python_operator(binary.operator), right))
        }
        Expr::Unary(unary) => {
            let operand = gen_expression(generator, &unary.operand)?;

            Ok(match unary.operator {
                UnaryOperator::Negate => format!("(-{})", operand),
                UnaryOperator::Plus => format!("(+{})", operand),
                UnaryOperator::Not => format!("(not {})", operand),
            })
        }
        Expr::Call(call) => gen_call(generator, call, CallContext::Expression),
        Expr::List(list) => {
            let elements = list
                .elements
                .iter()
                .map(|element| gen_expression(generator, element))
                .collect::<Result<Vec<String>, Error>>()?;

            Ok(format!("[{}]", elements.join(", ")))
        }
        Expr::Map(map) => {
            let mut entries = vec![];
            for (key, value) in &map.entries {
                let key = gen_expression(generator, key)?;
                let value = gen_expression(generator, value)?;
                entries.push(format!("{}: {}", key, value));
            }

            Ok(format!("{{{}}}", entries.join(", ")))
        }
    }
}

/// Resolves a call against the standard library first and user functions
/// second.
pub fn gen_call(
    generator: &mut Generator,
    call: &CallExpr,
    context: CallContext,
) -> Result<String, Error> {
    let arguments = call
        .arguments
        .iter()
        .map(|argument| gen_expression(generator, argument))
        .collect::<Result<Vec<String>, Error>>()?;

    if let Some(entry) = stdlib::lookup(&call.name) {
        if !entry.arity.accepts(arguments.len()) {
            return Err(Error::new(
                ErrorImpl::ArgumentCount {
                    function: call.name.clone(),
                    expected: entry.arity.to_string(),
                    received: arguments.len(),
                },
                call.span.start.clone(),
            ));
        }

        let receiver = match call.arguments.first() {
            Some(receiver) if entry.needs_receiver() => receiver_kind(generator, receiver),
            _ => None,
        };

        if entry.mutates_receiver() {
            if let Some(first) = call.arguments.first() {
                if infer_type(generator, first) == Some(Type::Base(BaseType::String)) {
                    return Err(Error::new(
                        ErrorImpl::ImmutableReceiver {
                            function: call.name.clone(),
                            receiver: describe_string_receiver(first),
                        },
                        call.span.start.clone(),
                    ));
                }
            }
        }

        let emission = match stdlib::resolve(entry, &arguments, receiver) {
            Some(emission) => emission,
            None => {
                return Err(Error::new(
                    ErrorImpl::AmbiguousReceiverType {
                        function: call.name.clone(),
                        receiver: describe_receiver(call.arguments.first()),
                    },
                    call.span.start.clone(),
                ))
            }
        };

        if emission.statement_only && context == CallContext::Expression {
            return Err(Error::new(
                ErrorImpl::StatementOnlyCall {
                    function: call.name.clone(),
                },
                call.span.start.clone(),
            ));
        }

        if let Some(helper) = emission.helper {
            generator.use_helper(helper);
        }

        return Ok(emission.text);
    }

    let callee = match generator.functions.get(&call.name) {
        Some(signature) => {
            if generator.options.strict_calls && signature.arity != arguments.len() {
                return Err(Error::new(
                    ErrorImpl::ArgumentCount {
                        function: call.name.clone(),
                        expected: signature.arity.to_string(),
                        received: arguments.len(),
                    },
                    call.span.start.clone(),
                ));
            }

            signature.emitted.clone()
        }
        None if generator.options.strict_calls => {
            return Err(Error::new(
                ErrorImpl::UnknownFunction {
                    function: call.name.clone(),
                },
                call.span.start.clone(),
            ))
        }
        None => generator.names.safe(&call.name),
    };

    Ok(format!("{}({})", callee, arguments.join(", ")))
}

/// The declared or evident type of an expression, where one is known.
pub fn infer_type(generator: &Generator, expression: &Expr) -> Option<Type> {
    match expression {
        Expr::Symbol(symbol) => generator.variable_type(&symbol.value),
        Expr::Literal(literal) => match literal.value {
            Literal::Integer(_) => Some(Type::Base(BaseType::Integer)),
            Literal::Float(_) => Some(Type::Base(BaseType::Float)),
            Literal::String(_) => Some(Type::Base(BaseType::String)),
            Literal::Boolean(_) => Some(Type::Base(BaseType::Boolean)),
            Literal::Null => None,
        },
        Expr::Call(call) if stdlib::lookup(&call.name).is_none() => generator
            .functions
            .get(&call.name)
            .and_then(|signature| signature.return_type),
        _ => None,
    }
}

/// Decides whether a collection call's receiver is indexed or keyed.
pub fn receiver_kind(generator: &Generator, receiver: &Expr) -> Option<ReceiverKind> {
    if let Some(ty) = infer_type(generator, receiver) {
        return match ty {
            Type::List(_) | Type::Base(BaseType::String) => Some(ReceiverKind::Sequence),
            Type::Map(_, _) => Some(ReceiverKind::Mapping),
            Type::Base(_) => None,
        };
    }

    match receiver {
        Expr::List(_) => Some(ReceiverKind::Sequence),
        Expr::Map(_) => Some(ReceiverKind::Mapping),
        Expr::Call(call) => stdlib::lookup(&call.name).and_then(|entry| entry.yields),
        _ => None,
    }
}

fn describe_receiver(receiver: Option<&Expr>) -> String {
    match receiver {
        Some(Expr::Symbol(symbol)) => {
            format!("`{}` is not declared as a LIST, MAP or STRING", symbol.value)
        }
        Some(Expr::Call(call)) => format!("the result of `{}` has no known collection type", call.name),
        _ => String::from("the receiver has no known collection type"),
    }
}

fn describe_string_receiver(receiver: &Expr) -> String {
    match receiver {
        Expr::Symbol(symbol) => format!("`{}`", symbol.value),
        Expr::Call(call) => format!("the result of `{}`", call.name),
        _ => String::from("a string literal"),
    }
}

pub fn gen_literal(literal: &Literal) -> String {
    match literal {
        Literal::Integer(value) => value.to_string(),
        Literal::Float(value) => format!("{:?}", value),
        Literal::String(value) => quote_string(value),
        Literal::Boolean(true) => String::from("True"),
        Literal::Boolean(false) => String::from("False"),
        Literal::Null => String::from("None"),
    }
}

fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');

    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }

    quoted.push('"');
    quoted
}

fn python_operator(operator: BinaryOperator) -> String {
    match operator {
        BinaryOperator::And => String::from("and"),
        BinaryOperator::Or => String::from("or"),
        other => other.to_string(),
    }
}
