//! The grammar-shaped tree produced by the parser.
//!
//! Each node records which production matched and keeps every child in source
//! order, including keywords, terminators and punctuation, as raw tokens. The
//! AST builder is the only consumer; it discards the syntactic noise.

use std::fmt::Display;

use crate::{lexer::tokens::Token, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Program,
    Block,

    VarDecl,
    VerboseVarDecl,
    Assignment,
    CallStmt,
    Print,
    Return,
    Break,
    If,
    Else,
    While,
    Foreach,
    FunctionDef,
    VerboseFunctionDef,
    Params,
    Param,
    VerboseParam,

    BaseType,
    ListType,
    MapType,

    Binary,
    Unary,
    Call,
    Arguments,
    Group,
    List,
    Map,
    MapEntry,
    Literal,
    Identifier,
}

impl Rule {
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Rule::Binary
                | Rule::Unary
                | Rule::Call
                | Rule::Group
                | Rule::List
                | Rule::Map
                | Rule::Literal
                | Rule::Identifier
        )
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Rule::BaseType | Rule::ListType | Rule::MapType)
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseElement {
    Node(ParseNode),
    Token(Token),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub rule: Rule,
    pub children: Vec<ParseElement>,
    pub span: Span,
}

impl ParseNode {
    pub fn new(rule: Rule, children: Vec<ParseElement>, span: Span) -> Self {
        ParseNode {
            rule,
            children,
            span,
        }
    }

    /// Child nodes in source order, skipping raw tokens.
    pub fn nodes(&self) -> impl Iterator<Item = &ParseNode> {
        self.children.iter().filter_map(|child| match child {
            ParseElement::Node(node) => Some(node),
            ParseElement::Token(_) => None,
        })
    }

    /// Raw token children in source order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(|child| match child {
            ParseElement::Token(token) => Some(token),
            ParseElement::Node(_) => None,
        })
    }

    pub fn node(&self, rule: Rule) -> Option<&ParseNode> {
        self.nodes().find(|node| node.rule == rule)
    }

    pub fn expressions(&self) -> impl Iterator<Item = &ParseNode> {
        self.nodes().filter(|node| node.rule.is_expression())
    }

    pub fn type_node(&self) -> Option<&ParseNode> {
        self.nodes().find(|node| node.rule.is_type())
    }

    /// Renders the tree as an indented outline, one node or token per line.
    pub fn pretty(&self) -> String {
        let mut output = String::new();
        self.write_pretty(&mut output, 0);
        output
    }

    fn write_pretty(&self, output: &mut String, depth: usize) {
        output.push_str(&"  ".repeat(depth));
        output.push_str(&self.rule.to_string());
        output.push('\n');

        for child in &self.children {
            match child {
                ParseElement::Node(node) => node.write_pretty(output, depth + 1),
                ParseElement::Token(token) => {
                    output.push_str(&"  ".repeat(depth + 1));
                    output.push_str(&token.to_string());
                    output.push('\n');
                }
            }
        }
    }
}
