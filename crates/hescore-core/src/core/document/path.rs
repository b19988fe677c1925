//! Compact path expressions over [`Element`] trees.
//!
//! The supported grammar is the subset of XPath 1.0 that requirement tables need:
//!
//! ```text
//! union      := path ('|' path)*
//! path       := '/'? step ('/' step)*  |  predicate+ ('/' step)*
//! step       := (NAME | '*' | '.' | '@' NAME) predicate*
//! predicate  := '[' or_expr ']'
//! or_expr    := and_expr ('or' and_expr)*
//! and_expr   := unary ('and' unary)*
//! unary      := 'not' '(' or_expr ')' | '(' or_expr ')' | union (('=' | '!=') literal)?
//! literal    := '"' chars '"' | '\'' chars '\'' | NAME
//! ```
//!
//! An attribute step (`@id`) yields an attribute node carrying the attribute value; further
//! steps below it select nothing.

use super::{Document, Element};
use logos::{Lexer, Logos};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid path expression '{expression}': {message}")]
pub struct PathSyntaxError {
    pub expression: String,
    pub message: String,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[token("//")]
    DescendantAxis,
    #[token("/")]
    Slash,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("|")]
    Pipe,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("@")]
    At,
    #[token("*")]
    Star,
    #[token("..")]
    ParentAxis,
    #[token(".")]
    Dot,
    #[regex(r"[A-Za-z0-9_-][A-Za-z0-9_.-]*", |lex| lex.slice().to_string())]
    Name(String),
    #[regex(r#""[^"]*""#, unquote)]
    #[regex(r"'[^']*'", unquote)]
    Literal(String),
}

fn unquote(lex: &mut Lexer<'_, Token>) -> String {
    let quoted = lex.slice();
    quoted[1..quoted.len() - 1].to_string()
}

#[derive(Debug, Clone, PartialEq)]
enum NodeTest {
    Name(String),
    Any,
    SelfNode,
    Attribute(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Step {
    test: NodeTest,
    predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, PartialEq)]
struct LocationPath {
    absolute: bool,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq)]
struct Union(Vec<LocationPath>);

#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    Or(Box<Predicate>, Box<Predicate>),
    And(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
    Exists(Union),
    Equals(Union, String),
    NotEquals(Union, String),
}

#[derive(Debug, Clone, Copy)]
enum Node<'a> {
    Element(&'a Element),
    Attribute {
        owner: &'a Element,
        name: &'a str,
        value: &'a str,
    },
}

impl<'a> Node<'a> {
    fn string_value(&self) -> &'a str {
        match *self {
            Node::Element(e) => e.text().unwrap_or(""),
            Node::Attribute { value, .. } => value,
        }
    }

    fn same_as(&self, other: &Node<'_>) -> bool {
        match (*self, *other) {
            (Node::Element(a), Node::Element(b)) => std::ptr::eq(a, b),
            (
                Node::Attribute {
                    owner: a, name: na, ..
                },
                Node::Attribute {
                    owner: b, name: nb, ..
                },
            ) => std::ptr::eq(a, b) && na == nb,
            _ => false,
        }
    }
}

/// A compiled path expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpr {
    source: String,
    union: Union,
}

impl PathExpr {
    pub fn parse(source: &str) -> Result<Self, PathSyntaxError> {
        let tokens = tokenize(source)?;
        let mut parser = Parser {
            source,
            tokens,
            pos: 0,
        };
        let union = parser.parse_union()?;
        if parser.pos != parser.tokens.len() {
            return Err(parser.error(format!(
                "unexpected trailing token {:?}",
                parser.tokens[parser.pos]
            )));
        }
        Ok(Self {
            source: source.to_string(),
            union,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn starts_with_predicate(&self) -> bool {
        self.source.trim_start().starts_with('[')
    }

    /// Number of distinct nodes selected from `context`.
    pub fn count(&self, document: &Document, context: &Element) -> usize {
        eval_union(&self.union, document, context).len()
    }

    /// Element nodes selected from `context`, in evaluation order.
    pub fn select<'a>(&self, document: &'a Document, context: &'a Element) -> Vec<&'a Element> {
        eval_union(&self.union, document, context)
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(e) => Some(e),
                Node::Attribute { .. } => None,
            })
            .collect()
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, PathSyntaxError> {
    let err = |message: String| PathSyntaxError {
        expression: source.to_string(),
        message,
    };
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(Token::DescendantAxis) => {
                return Err(err("descendant axis '//' is not supported".into()));
            }
            Ok(Token::ParentAxis) => return Err(err("parent axis '..' is not supported".into())),
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(match source[lexer.span().start..].chars().next() {
                    Some('"' | '\'') => err("unterminated string literal".into()),
                    Some(other) => err(format!("unexpected character '{}'", other)),
                    None => err("unexpected end of expression".into()),
                });
            }
        }
    }
    Ok(tokens)
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, message: String) -> PathSyntaxError {
        PathSyntaxError {
            expression: self.source.to_string(),
            message,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Name(name)) if name == keyword)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), PathSyntaxError> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            other => Err(self.error(format!("expected {:?}, found {:?}", expected, other))),
        }
    }

    fn parse_union(&mut self) -> Result<Union, PathSyntaxError> {
        let mut paths = vec![self.parse_path()?];
        while self.peek() == Some(&Token::Pipe) {
            self.pos += 1;
            paths.push(self.parse_path()?);
        }
        Ok(Union(paths))
    }

    fn parse_path(&mut self) -> Result<LocationPath, PathSyntaxError> {
        let mut steps = Vec::new();
        let absolute = self.peek() == Some(&Token::Slash);
        if absolute {
            self.pos += 1;
        }

        if !absolute && self.peek() == Some(&Token::LBracket) {
            steps.push(Step {
                test: NodeTest::SelfNode,
                predicates: self.parse_predicates()?,
            });
        } else {
            steps.push(self.parse_step()?);
        }

        while self.peek() == Some(&Token::Slash) {
            self.pos += 1;
            steps.push(self.parse_step()?);
        }
        Ok(LocationPath { absolute, steps })
    }

    fn parse_step(&mut self) -> Result<Step, PathSyntaxError> {
        let test = match self.next() {
            Some(Token::Name(name)) => NodeTest::Name(name),
            Some(Token::Star) => NodeTest::Any,
            Some(Token::Dot) => NodeTest::SelfNode,
            Some(Token::At) => match self.next() {
                Some(Token::Name(name)) => NodeTest::Attribute(name),
                other => {
                    return Err(self.error(format!("expected attribute name, found {:?}", other)));
                }
            },
            other => return Err(self.error(format!("expected a step, found {:?}", other))),
        };
        Ok(Step {
            test,
            predicates: self.parse_predicates()?,
        })
    }

    fn parse_predicates(&mut self) -> Result<Vec<Predicate>, PathSyntaxError> {
        let mut predicates = Vec::new();
        while self.peek() == Some(&Token::LBracket) {
            self.pos += 1;
            predicates.push(self.parse_or()?);
            self.expect(Token::RBracket)?;
        }
        Ok(predicates)
    }

    fn parse_or(&mut self) -> Result<Predicate, PathSyntaxError> {
        let mut lhs = self.parse_and()?;
        while self.peek_keyword("or") {
            self.pos += 1;
            let rhs = self.parse_and()?;
            lhs = Predicate::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Predicate, PathSyntaxError> {
        let mut lhs = self.parse_unary()?;
        while self.peek_keyword("and") {
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = Predicate::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Predicate, PathSyntaxError> {
        if self.peek_keyword("not") && self.tokens.get(self.pos + 1) == Some(&Token::LParen) {
            self.pos += 2;
            let inner = self.parse_or()?;
            self.expect(Token::RParen)?;
            return Ok(Predicate::Not(Box::new(inner)));
        }
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let inner = self.parse_or()?;
            self.expect(Token::RParen)?;
            return Ok(inner);
        }

        let union = self.parse_union()?;
        match self.peek() {
            Some(Token::Eq) => {
                self.pos += 1;
                Ok(Predicate::Equals(union, self.parse_literal()?))
            }
            Some(Token::NotEq) => {
                self.pos += 1;
                Ok(Predicate::NotEquals(union, self.parse_literal()?))
            }
            _ => Ok(Predicate::Exists(union)),
        }
    }

    fn parse_literal(&mut self) -> Result<String, PathSyntaxError> {
        match self.next() {
            Some(Token::Literal(value)) | Some(Token::Name(value)) => Ok(value),
            other => Err(self.error(format!("expected a literal, found {:?}", other))),
        }
    }
}

fn eval_union<'a>(union: &Union, document: &'a Document, context: &'a Element) -> Vec<Node<'a>> {
    let mut nodes: Vec<Node<'a>> = Vec::new();
    for path in &union.0 {
        for node in eval_path(path, document, context) {
            if !nodes.iter().any(|n| n.same_as(&node)) {
                nodes.push(node);
            }
        }
    }
    nodes
}

fn eval_path<'a>(
    path: &LocationPath,
    document: &'a Document,
    context: &'a Element,
) -> Vec<Node<'a>> {
    let mut steps = path.steps.iter();
    let mut current: Vec<Node<'a>> = if path.absolute {
        // The first absolute step is tested against the root element itself.
        match steps.next() {
            Some(first) => apply_step(first, vec![document.root()], document, true),
            None => return vec![Node::Element(document.root())],
        }
    } else {
        vec![Node::Element(context)]
    };

    for step in steps {
        let elements: Vec<&'a Element> = current
            .iter()
            .filter_map(|node| match node {
                Node::Element(e) => Some(*e),
                Node::Attribute { .. } => None,
            })
            .collect();
        current = apply_step(step, elements, document, false);
    }
    current
}

fn apply_step<'a>(
    step: &Step,
    inputs: Vec<&'a Element>,
    document: &'a Document,
    test_inputs_directly: bool,
) -> Vec<Node<'a>> {
    let mut selected: Vec<Node<'a>> = Vec::new();
    for input in inputs {
        match &step.test {
            NodeTest::SelfNode => selected.push(Node::Element(input)),
            NodeTest::Attribute(name) => {
                if let Some((key, value)) = input.attributes.get_key_value(name) {
                    selected.push(Node::Attribute {
                        owner: input,
                        name: key.as_str(),
                        value: value.as_str(),
                    });
                }
            }
            NodeTest::Name(name) if test_inputs_directly => {
                if &input.name == name {
                    selected.push(Node::Element(input));
                }
            }
            NodeTest::Any if test_inputs_directly => selected.push(Node::Element(input)),
            NodeTest::Name(name) => {
                selected.extend(input.children_named(name).map(Node::Element));
            }
            NodeTest::Any => selected.extend(input.children.iter().map(Node::Element)),
        }
    }

    selected
        .into_iter()
        .filter(|node| {
            step.predicates
                .iter()
                .all(|predicate| eval_predicate(predicate, document, *node))
        })
        .collect()
}

fn eval_predicate(predicate: &Predicate, document: &Document, node: Node<'_>) -> bool {
    let context = match node {
        Node::Element(e) => e,
        // Attribute nodes have no children; only self-referencing predicates make sense.
        Node::Attribute { owner, .. } => owner,
    };
    match predicate {
        Predicate::Or(a, b) => {
            eval_predicate(a, document, node) || eval_predicate(b, document, node)
        }
        Predicate::And(a, b) => {
            eval_predicate(a, document, node) && eval_predicate(b, document, node)
        }
        Predicate::Not(inner) => !eval_predicate(inner, document, node),
        Predicate::Exists(union) => !eval_union(union, document, context).is_empty(),
        Predicate::Equals(union, literal) => eval_union(union, document, context)
            .iter()
            .any(|n| n.string_value() == literal),
        Predicate::NotEquals(union, literal) => eval_union(union, document, context)
            .iter()
            .any(|n| n.string_value() != literal),
    }
}
