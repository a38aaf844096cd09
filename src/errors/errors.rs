use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The pipeline stage that rejected the input.
    pub fn get_stage(&self) -> Stage {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnexpectedToken { .. } => Stage::Syntax,
            ErrorImpl::NumberParseError { .. }
            | ErrorImpl::MissingParameterType { .. }
            | ErrorImpl::MalformedProduction { .. } => Stage::Transform,
            ErrorImpl::AmbiguousReceiverType { .. }
            | ErrorImpl::UnknownFunction { .. }
            | ErrorImpl::ArgumentCount { .. }
            | ErrorImpl::StatementOnlyCall { .. }
            | ErrorImpl::ImmutableReceiver { .. }
            | ErrorImpl::InvalidIndentWidth { .. }
            | ErrorImpl::ReturnOutsideFunction
            | ErrorImpl::BreakOutsideLoop
            | ErrorImpl::UnsupportedNode { .. } => Stage::CodeGen,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::MissingParameterType { .. } => "MissingParameterType",
            ErrorImpl::MalformedProduction { .. } => "MalformedProduction",
            ErrorImpl::AmbiguousReceiverType { .. } => "AmbiguousReceiverType",
            ErrorImpl::UnknownFunction { .. } => "UnknownFunction",
            ErrorImpl::ArgumentCount { .. } => "ArgumentCount",
            ErrorImpl::StatementOnlyCall { .. } => "StatementOnlyCall",
            ErrorImpl::ImmutableReceiver { .. } => "ImmutableReceiver",
            ErrorImpl::InvalidIndentWidth { .. } => "InvalidIndentWidth",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::BreakOutsideLoop => "BreakOutsideLoop",
            ErrorImpl::UnsupportedNode { .. } => "UnsupportedNode",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("add the closing `\"`"))
            }
            ErrorImpl::UnexpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("insert {} here", expected))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "`{}` does not fit in a 64-bit number",
                token
            )),
            ErrorImpl::MissingParameterType { parameter, .. } => ErrorTip::Suggestion(format!(
                "write `{}: INTEGER` or `PARAM {} AS INTEGER`",
                parameter, parameter
            )),
            ErrorImpl::MalformedProduction { .. } => ErrorTip::None,
            ErrorImpl::AmbiguousReceiverType { .. } => ErrorTip::Suggestion(String::from(
                "pass a variable declared as a LIST, MAP or STRING",
            )),
            ErrorImpl::UnknownFunction { function } => ErrorTip::Suggestion(format!(
                "define `FUNCTION {}(...)` or check the spelling",
                function
            )),
            ErrorImpl::ArgumentCount { .. } => ErrorTip::None,
            ErrorImpl::StatementOnlyCall { function } => ErrorTip::Suggestion(format!(
                "call `{}` on its own line",
                function
            )),
            ErrorImpl::ImmutableReceiver { .. } => ErrorTip::Suggestion(String::from(
                "build a new value with CONCATENATE_STRINGS instead",
            )),
            ErrorImpl::InvalidIndentWidth { .. } => {
                ErrorTip::Suggestion(String::from("use an indentation width of at least 1"))
            }
            ErrorImpl::ReturnOutsideFunction | ErrorImpl::BreakOutsideLoop => ErrorTip::None,
            ErrorImpl::UnsupportedNode { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}: {}",
            self.get_stage(),
            self.position,
            self.internal_error
        )
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Syntax,
    Transform,
    CodeGen,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Syntax => write!(f, "SyntaxError"),
            Stage::Transform => write!(f, "TransformError"),
            Stage::CodeGen => write!(f, "CodeGenError"),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("parameter {parameter:?} of function {function:?} has no type")]
    MissingParameterType { function: String, parameter: String },
    #[error("malformed {rule} node: {message}")]
    MalformedProduction { rule: String, message: String },
    #[error("ambiguous receiver type in call to {function}: {receiver}")]
    AmbiguousReceiverType { function: String, receiver: String },
    #[error("call to undefined function {function:?}")]
    UnknownFunction { function: String },
    #[error("{function} expects {expected} arguments, received {received}")]
    ArgumentCount {
        function: String,
        expected: String,
        received: usize,
    },
    #[error("{function} cannot be used as an expression")]
    StatementOnlyCall { function: String },
    #[error("{function} cannot assign into {receiver}, a STRING is immutable")]
    ImmutableReceiver { function: String, receiver: String },
    #[error("indentation width must be positive, got {width}")]
    InvalidIndentWidth { width: usize },
    #[error("RETURN outside of a function")]
    ReturnOutsideFunction,
    #[error("BREAK outside of a loop")]
    BreakOutsideLoop,
    #[error("unsupported {node}")]
    UnsupportedNode { node: String },
}
