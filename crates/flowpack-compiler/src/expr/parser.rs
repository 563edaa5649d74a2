//! Recursive-descent expression parser.
//!
//! Precedence, low to high: `?:`, `||`, `&&`, `|`, `^`, `&`, equality,
//! relational, shifts, additive, multiplicative, unary, postfix, primary.

use std::ops::Range;

use super::ast::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
use super::lexer::{Token, TokenKind, lex, token_text, unescape};
use super::ExprError;
use crate::diagnostics::DiagnosticKind;

/// Nesting limit for parenthesized, unary and postfix chains.
pub const MAX_DEPTH: u32 = 64;

/// Limit on operator, access, call and literal-collection nodes in one
/// expression. Operator chains are left-nested, so this also bounds tree height.
pub const MAX_NODES: u32 = 512;

/// Binary operator levels, loosest first.
const BINARY_LEVELS: usize = 10;

pub fn parse(source: &str) -> Result<Expr, ExprError> {
    let mut parser = Parser::new(source);
    let expr = parser.conditional()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(parser.unexpected(token)),
    }
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
    nodes: u32,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            tokens: lex(source),
            pos: 0,
            depth: 0,
            nodes: 0,
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).cloned()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind() == Some(kind) {
            self.bump()
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ExprError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(self.error(
                format!(
                    "expected {} but found {}",
                    kind.describe(),
                    token.kind.describe()
                ),
                token.span,
            )),
            None => Err(self.error(
                format!("expected {} but reached end of expression", kind.describe()),
                self.end_span(),
            )),
        }
    }

    fn end_span(&self) -> Range<usize> {
        self.source.len()..self.source.len()
    }

    fn error(&self, message: impl Into<String>, span: Range<usize>) -> ExprError {
        ExprError::new(DiagnosticKind::ExpressionSyntax, message, span)
    }

    fn unexpected(&self, token: Token) -> ExprError {
        self.error(format!("unexpected {}", token.kind.describe()), token.span)
    }

    fn nested<T>(
        &mut self,
        at: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ExprError>,
    ) -> Result<T, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("expression nested too deeply", at..at));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Build a composite node, charging it against [`MAX_NODES`].
    fn node(&mut self, kind: ExprKind, span: Range<usize>) -> Result<Expr, ExprError> {
        if self.nodes >= MAX_NODES {
            return Err(self.error("expression too complex", span));
        }
        self.nodes += 1;
        Ok(Expr::new(kind, span))
    }

    fn conditional(&mut self) -> Result<Expr, ExprError> {
        let at = self.peek().map_or(self.source.len(), |t| t.span.start);
        self.nested(at, |p| {
            let test = p.binary(0)?;
            if p.eat(TokenKind::Question).is_none() {
                return Ok(test);
            }
            let consequent = p.conditional()?;
            p.expect(TokenKind::Colon)?;
            let alternate = p.conditional()?;
            let span = test.span.start..alternate.span.end;
            p.node(
                ExprKind::Conditional {
                    test: Box::new(test),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                },
                span,
            )
        })
    }

    fn binary(&mut self, level: usize) -> Result<Expr, ExprError> {
        if level == BINARY_LEVELS {
            return self.unary();
        }
        let mut left = self.binary(level + 1)?;
        while let Some(op) = self.peek_kind().and_then(|k| binary_op(k, level)) {
            self.pos += 1;
            let right = self.binary(level + 1)?;
            let span = left.span.start..right.span.end;
            left = self.node(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            )?;
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Plus) => UnaryOp::Plus,
            Some(TokenKind::Minus) => UnaryOp::Minus,
            Some(TokenKind::Tilde) => UnaryOp::BitNot,
            Some(TokenKind::Bang) => UnaryOp::Not,
            _ => return self.postfix(),
        };
        let Some(token) = self.bump() else {
            return self.postfix();
        };
        let arg = self.nested(token.span.start, Self::unary)?;
        let span = token.span.start..arg.span.end;
        self.node(
            ExprKind::Unary {
                op,
                arg: Box::new(arg),
            },
            span,
        )
    }

    fn postfix(&mut self) -> Result<Expr, ExprError> {
        let mut expr = self.primary()?;
        loop {
            match self.peek_kind() {
                Some(TokenKind::Dot) => {
                    self.pos += 1;
                    let name = self.expect(TokenKind::Ident)?;
                    let span = expr.span.start..name.span.end;
                    let property = token_text(self.source, &name).to_string();
                    expr = self.node(
                        ExprKind::Member {
                            object: Box::new(expr),
                            property,
                        },
                        span,
                    )?;
                }
                Some(TokenKind::BracketOpen) => {
                    self.pos += 1;
                    let index = self.conditional()?;
                    let close = self.expect(TokenKind::BracketClose)?;
                    let span = expr.span.start..close.span.end;
                    expr = self.node(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    )?;
                }
                Some(TokenKind::ParenOpen) => {
                    self.pos += 1;
                    let (args, close) = self.list(TokenKind::ParenClose, Self::conditional)?;
                    let span = expr.span.start..close.end;
                    expr = self.node(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    )?;
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Comma-separated items up to `close`. The opening token is already consumed.
    fn list<T>(
        &mut self,
        close: TokenKind,
        mut item: impl FnMut(&mut Self) -> Result<T, ExprError>,
    ) -> Result<(Vec<T>, Range<usize>), ExprError> {
        let mut items = Vec::new();
        if let Some(token) = self.eat(close) {
            return Ok((items, token.span));
        }
        loop {
            items.push(item(self)?);
            if self.eat(TokenKind::Comma).is_some() {
                continue;
            }
            let token = self.expect(close)?;
            return Ok((items, token.span));
        }
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let Some(token) = self.bump() else {
            return Err(self.error("unexpected end of expression", self.end_span()));
        };
        let text = token_text(self.source, &token);
        let span = token.span.clone();

        let kind = match token.kind {
            TokenKind::Number => ExprKind::Literal(parse_number(text, &span)?),
            TokenKind::HexNumber => ExprKind::Literal(parse_hex(text, &span)?),
            TokenKind::Str => ExprKind::Literal(Literal::String(unescape(text))),
            TokenKind::True => ExprKind::Literal(Literal::Boolean(true)),
            TokenKind::False => ExprKind::Literal(Literal::Boolean(false)),
            TokenKind::Null => ExprKind::Literal(Literal::Null),
            TokenKind::Undefined => ExprKind::Literal(Literal::Undefined),
            TokenKind::Ident => ExprKind::Identifier(text.to_string()),
            TokenKind::ParenOpen => {
                let inner = self.conditional()?;
                let close = self.expect(TokenKind::ParenClose)?;
                return Ok(Expr::new(inner.kind, span.start..close.span.end));
            }
            TokenKind::BracketOpen => {
                let (items, close) = self.list(TokenKind::BracketClose, Self::conditional)?;
                return self.node(ExprKind::Array(items), span.start..close.end);
            }
            TokenKind::BraceOpen => {
                let (fields, close) = self.list(TokenKind::BraceClose, Self::object_field)?;
                return self.node(ExprKind::Object(fields), span.start..close.end);
            }
            _ => return Err(self.unexpected(token)),
        };
        Ok(Expr::new(kind, span))
    }

    fn object_field(&mut self) -> Result<(String, Expr), ExprError> {
        let key = match self.bump() {
            Some(token) if token.kind == TokenKind::Ident => {
                token_text(self.source, &token).to_string()
            }
            Some(token) if token.kind == TokenKind::Str => {
                unescape(token_text(self.source, &token))
            }
            Some(token) => return Err(self.unexpected(token)),
            None => return Err(self.error("unexpected end of expression", self.end_span())),
        };
        self.expect(TokenKind::Colon)?;
        let value = self.conditional()?;
        Ok((key, value))
    }
}

fn binary_op(kind: TokenKind, level: usize) -> Option<BinaryOp> {
    let op = match (level, kind) {
        (0, TokenKind::PipePipe) => BinaryOp::Or,
        (1, TokenKind::AmpAmp) => BinaryOp::And,
        (2, TokenKind::Pipe) => BinaryOp::BitOr,
        (3, TokenKind::Caret) => BinaryOp::BitXor,
        (4, TokenKind::Amp) => BinaryOp::BitAnd,
        (5, TokenKind::EqEq) => BinaryOp::Equal,
        (5, TokenKind::BangEq) => BinaryOp::NotEqual,
        (6, TokenKind::Less) => BinaryOp::Less,
        (6, TokenKind::Greater) => BinaryOp::Greater,
        (6, TokenKind::LessEq) => BinaryOp::LessOrEqual,
        (6, TokenKind::GreaterEq) => BinaryOp::GreaterOrEqual,
        (7, TokenKind::ShiftLeft) => BinaryOp::ShiftLeft,
        (7, TokenKind::ShiftRight) => BinaryOp::ShiftRight,
        (8, TokenKind::Plus) => BinaryOp::Add,
        (8, TokenKind::Minus) => BinaryOp::Sub,
        (9, TokenKind::Star) => BinaryOp::Mul,
        (9, TokenKind::Slash) => BinaryOp::Div,
        (9, TokenKind::Percent) => BinaryOp::Mod,
        _ => return None,
    };
    Some(op)
}

/// Integer when written without fraction or exponent and it fits `i32`.
fn parse_number(text: &str, span: &Range<usize>) -> Result<Literal, ExprError> {
    if !text.contains(['.', 'e', 'E'])
        && let Ok(value) = text.parse::<i32>()
    {
        return Ok(Literal::Integer(value));
    }
    text.parse::<f64>().map(Literal::Double).map_err(|_| {
        ExprError::new(
            DiagnosticKind::ExpressionSyntax,
            format!("invalid number '{text}'"),
            span.clone(),
        )
    })
}

fn parse_hex(text: &str, span: &Range<usize>) -> Result<Literal, ExprError> {
    let value = u64::from_str_radix(&text[2..], 16).map_err(|_| {
        ExprError::new(
            DiagnosticKind::ExpressionSyntax,
            format!("invalid number '{text}'"),
            span.clone(),
        )
    })?;
    Ok(match i32::try_from(value) {
        Ok(v) => Literal::Integer(v),
        Err(_) => Literal::Double(value as f64),
    })
}
