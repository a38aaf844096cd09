use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("VAR", TokenKind::Var);
        map.insert("AS", TokenKind::As);
        map.insert("FUNCTION", TokenKind::Function);
        map.insert("PARAM", TokenKind::Param);
        map.insert("RETURNS", TokenKind::Returns);
        map.insert("ENDFUNCTION", TokenKind::EndFunction);
        map.insert("END", TokenKind::End);
        map.insert("IF", TokenKind::If);
        map.insert("THEN", TokenKind::Then);
        map.insert("ELSE", TokenKind::Else);
        map.insert("ENDIF", TokenKind::EndIf);
        map.insert("WHILE", TokenKind::While);
        map.insert("DO", TokenKind::Do);
        map.insert("ENDWHILE", TokenKind::EndWhile);
        map.insert("FOREACH", TokenKind::Foreach);
        map.insert("IN", TokenKind::In);
        map.insert("ENDFOREACH", TokenKind::EndForeach);
        map.insert("RETURN", TokenKind::Return);
        map.insert("PRINT", TokenKind::Print);
        map.insert("BREAK", TokenKind::Break);
        map.insert("TRUE", TokenKind::True);
        map.insert("FALSE", TokenKind::False);
        map.insert("NULL", TokenKind::Null);
        map.insert("AND", TokenKind::And);
        map.insert("OR", TokenKind::Or);
        map.insert("NOT", TokenKind::Not);
        map.insert("INTEGER", TokenKind::IntegerType);
        map.insert("FLOAT", TokenKind::FloatType);
        map.insert("STRING", TokenKind::StringType);
        map.insert("BOOLEAN", TokenKind::BooleanType);
        map.insert("NOTHING", TokenKind::NothingType);
        map.insert("LIST", TokenKind::ListType);
        map.insert("MAP", TokenKind::MapType);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Float,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    Comma,
    Colon,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Var,
    As,
    Function,
    Param,
    Returns,
    EndFunction,
    End,
    If,
    Then,
    Else,
    EndIf,
    While,
    Do,
    EndWhile,
    Foreach,
    In,
    EndForeach,
    Return,
    Print,
    Break,
    True,
    False,
    Null,
    And,
    Or,
    Not,
    IntegerType,
    FloatType,
    StringType,
    BooleanType,
    NothingType,
    ListType,
    MapType,
}

/// The coarse lexical class of a token.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,
    Operator,
    Punctuation,
    End,
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::EOF => TokenCategory::End,
            TokenKind::Integer => TokenCategory::IntegerLiteral,
            TokenKind::Float => TokenCategory::FloatLiteral,
            TokenKind::String => TokenCategory::StringLiteral,
            TokenKind::Identifier => TokenCategory::Identifier,
            TokenKind::True | TokenKind::False => TokenCategory::BooleanLiteral,
            TokenKind::Null => TokenCategory::NullLiteral,
            TokenKind::OpenBracket
            | TokenKind::CloseBracket
            | TokenKind::OpenCurly
            | TokenKind::CloseCurly
            | TokenKind::OpenParen
            | TokenKind::CloseParen
            | TokenKind::Comma
            | TokenKind::Colon => TokenCategory::Punctuation,
            TokenKind::Assignment
            | TokenKind::Equals
            | TokenKind::NotEquals
            | TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals
            | TokenKind::Plus
            | TokenKind::Dash
            | TokenKind::Slash
            | TokenKind::Star
            | TokenKind::Percent => TokenCategory::Operator,
            _ => TokenCategory::Keyword,
        }
    }

    /// The source spelling of fixed-text tokens, or a short description
    /// for tokens whose text varies.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Var => "VAR",
            TokenKind::As => "AS",
            TokenKind::Function => "FUNCTION",
            TokenKind::Param => "PARAM",
            TokenKind::Returns => "RETURNS",
            TokenKind::EndFunction => "ENDFUNCTION",
            TokenKind::End => "END",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::EndIf => "ENDIF",
            TokenKind::While => "WHILE",
            TokenKind::Do => "DO",
            TokenKind::EndWhile => "ENDWHILE",
            TokenKind::Foreach => "FOREACH",
            TokenKind::In => "IN",
            TokenKind::EndForeach => "ENDFOREACH",
            TokenKind::Return => "RETURN",
            TokenKind::Print => "PRINT",
            TokenKind::Break => "BREAK",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::IntegerType => "INTEGER",
            TokenKind::FloatType => "FLOAT",
            TokenKind::StringType => "STRING",
            TokenKind::BooleanType => "BOOLEAN",
            TokenKind::NothingType => "NOTHING",
            TokenKind::ListType => "LIST",
            TokenKind::MapType => "MAP",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Float,
        ]) {
            write!(f, "{} ({})", self.kind, self.value)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// Describes the token for "found ..." diagnostics.
    pub fn describe(&self) -> String {
        match self.kind.category() {
            TokenCategory::End => String::from("end of input"),
            TokenCategory::Identifier => format!("identifier `{}`", self.value),
            TokenCategory::IntegerLiteral | TokenCategory::FloatLiteral => {
                format!("number `{}`", self.value)
            }
            TokenCategory::StringLiteral => format!("string {}", self.value),
            _ => format!("`{}`", self.value),
        }
    }
}
