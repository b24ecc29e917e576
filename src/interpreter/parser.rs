use crate::ast::{Expr, ExprKind};
use crate::diagnostic::{Diagnostic, Label, Span};
use crate::lexer::{self, Token};
use crate::value::Value;
use chumsky::Parser as _;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub expected: Vec<String>,
    pub found: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: Vec::new(),
            found: None,
        }
    }

    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = expected;
        self
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.message.clone())
            .with_code("E0101")
            .with_label(Label::primary(self.span, self.found_note()));

        if !self.expected.is_empty() {
            diag = diag.with_help(format!("expected {}", self.expected.join(" or ")));
        }

        diag
    }

    fn found_note(&self) -> String {
        match &self.found {
            Some(found) => format!("found {}", found),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(found) = &self.found {
            write!(f, ", found {}", found)?;
        }
        if !self.expected.is_empty() {
            write!(f, " (expected {})", self.expected.join(" or "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Turns a complete source string into a single expression tree.
///
/// A program is exactly one top-level expression; anything left over after
/// it is an error.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let (tokens, errors) = lexer::lexer().parse(source).into_output_errors();
    match tokens {
        Some(tokens) if errors.is_empty() => {
            TokenParser::from_lexer_output(tokens, source.len()).parse()
        }
        _ => {
            let span = errors
                .first()
                .map(|e| {
                    let s = e.span();
                    Span::new(s.start, s.end)
                })
                .unwrap_or_else(|| Span::new(0, source.len()));
            let remainder: String = source[span.start.min(source.len())..]
                .chars()
                .take(24)
                .collect();
            let mut err = ParseError::new("unrecognized syntax", span);
            if !remainder.is_empty() {
                err = err.with_found(format!("`{}`", remainder));
            }
            Err(err)
        }
    }
}

/// Recursive-descent parser over the lexed token stream.
pub struct TokenParser {
    tokens: Vec<SpannedToken>,
    current: usize,
    source_len: usize,
}

impl TokenParser {
    pub fn new(tokens: Vec<SpannedToken>, source_len: usize) -> Self {
        Self {
            tokens,
            current: 0,
            source_len,
        }
    }

    pub fn from_lexer_output(
        tokens: Vec<(Token, chumsky::span::SimpleSpan)>,
        source_len: usize,
    ) -> Self {
        let spanned_tokens: Vec<SpannedToken> = tokens
            .into_iter()
            .map(|(token, span)| SpannedToken {
                token,
                span: Span::new(span.start, span.end),
            })
            .collect();
        Self::new(spanned_tokens, source_len)
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|st| &st.token)
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.current)
            .map(|st| st.span)
            .unwrap_or_else(|| Span::new(self.source_len, self.source_len))
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let st = self.tokens.get(self.current).cloned();
        if st.is_some() {
            self.current += 1;
        }
        st
    }

    /// Parse one complete program: a single expression with nothing after it.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if let Some(token) = self.current_token() {
            return Err(
                ParseError::new("unexpected trailing input", self.current_span())
                    .with_found(describe(token)),
            );
        }
        Ok(expr)
    }

    /// One leaf token (literal or word), then any call suffixes.
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let st = match self.advance() {
            Some(st) => st,
            None => {
                return Err(
                    ParseError::new("unexpected end of input", self.current_span())
                        .with_expected(vec!["an expression".to_string()]),
                )
            }
        };

        let leaf = match st.token {
            Token::Number(numeric_value) => {
                Expr::new(ExprKind::Literal(Value::Number(numeric_value)), st.span)
            }
            Token::Text(text) => Expr::new(ExprKind::Literal(Value::Text(Rc::from(text))), st.span),
            Token::Word(name) => Expr::new(ExprKind::Word(Rc::from(name)), st.span),
            other => {
                return Err(ParseError::new("expected an expression", st.span)
                    .with_expected(vec!["a literal or a name".to_string()])
                    .with_found(describe(&other)))
            }
        };

        self.parse_apply(leaf)
    }

    /// If the next token opens a parenthesis, the expression so far is the
    /// operator of a call; collect its arguments and try again, so chained
    /// calls like `f(x)(y)` apply the result of the previous call.
    fn parse_apply(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        if !matches!(self.current_token(), Some(Token::LParen)) {
            return Ok(callee);
        }
        self.advance();

        let mut args = Vec::new();
        let close_span = loop {
            if matches!(self.current_token(), Some(Token::RParen)) {
                let span = self.current_span();
                self.advance();
                break span;
            }

            args.push(self.parse_expression()?);

            match self.current_token() {
                Some(Token::Comma) => {
                    self.advance();
                }
                Some(Token::RParen) => {
                    let span = self.current_span();
                    self.advance();
                    break span;
                }
                Some(token) => {
                    return Err(ParseError::new(
                        "expected `,` or `)` in argument list",
                        self.current_span(),
                    )
                    .with_expected(vec!["`,`".to_string(), "`)`".to_string()])
                    .with_found(describe(token)))
                }
                None => {
                    return Err(ParseError::new(
                        "unclosed argument list",
                        self.current_span(),
                    )
                    .with_expected(vec!["`,`".to_string(), "`)`".to_string()]))
                }
            }
        };

        let span = callee.span.merge(close_span);
        let apply = Expr::new(
            ExprKind::Apply {
                operator: Box::new(callee),
                args,
            },
            span,
        );
        self.parse_apply(apply)
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Word(name) => format!("the word `{}`", name),
        Token::Number(numeric_value) => format!("the number {}", numeric_value),
        Token::Text(_) => "a text literal".to_string(),
        Token::LParen => "`(`".to_string(),
        Token::RParen => "`)`".to_string(),
        Token::Comma => "`,`".to_string(),
    }
}
