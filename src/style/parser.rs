//! Recursive descent parser for style sheets.
//!
//! A sheet is a list of `selector[, selector] { property: value...; }` rules.
//! Structural problems (missing braces, stray tokens) are a [`ParseError`];
//! a declaration whose property or value is not understood is skipped with
//! a warning and the rest of the sheet still loads.

use logos::Logos;

use crate::style::cascade::StyleRules;
use crate::style::color::Color;
use crate::style::declared::DeclaredStyle;
use crate::style::properties::{apply_declaration, DeclarationValue};
use crate::style::selector::Selector;
use crate::style::tokenizer::Token;

/// Errors from sheet parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A parsed sheet: `(selector, record)` pairs in first-appearance order.
///
/// A selector that appears in several rules has its records merged, later
/// declarations winning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    rules: Vec<(Selector, DeclaredStyle)>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, selector: Selector, style: DeclaredStyle) {
        match self.rules.iter_mut().find(|(existing, _)| *existing == selector) {
            Some((_, record)) => *record = record.merge(&style),
            None => self.rules.push((selector, style)),
        }
    }

    /// The record for `selector`, if the sheet mentions it.
    pub fn get(&self, selector: impl Into<Selector>) -> Option<&DeclaredStyle> {
        let selector = selector.into();
        self.rules.iter().find(|(existing, _)| *existing == selector).map(|(_, style)| style)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Selector, &DeclaredStyle)> {
        self.rules.iter().map(|(selector, style)| (selector, style))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Store every record in `rules` (replace-or-append per selector).
    pub fn apply_to(&self, rules: &mut StyleRules) {
        for (selector, style) in &self.rules {
            rules.set(selector.clone(), style.clone());
        }
    }
}

/// A token with its index in the stream.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    pos: usize,
}

/// Replace each `/* ... */` comment with a single space.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            // Unterminated comment swallows the rest of the input.
            None => rest = "",
        }
    }
    result.push_str(rest);
    result
}

fn tokenize_positioned(input: &str) -> Vec<PToken> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .enumerate()
        .map(|(pos, (token, span))| PToken { token, text: input[span].to_string(), pos })
        .collect()
}

/// Parse sheet text into a [`StyleSheet`].
pub fn parse_sheet(input: &str) -> Result<StyleSheet, ParseError> {
    let cleaned = strip_comments(input);
    let mut parser = Parser { tokens: tokenize_positioned(&cleaned), cursor: 0 };

    let mut sheet = StyleSheet::new();
    while !parser.is_eof() {
        let (selectors, style) = parser.parse_rule()?;
        for selector in selectors {
            sheet.insert(selector, style.clone());
        }
    }
    Ok(sheet)
}

struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.peek().is_some_and(|t| &t.token == token)
    }

    fn advance(&mut self) -> Option<&PToken> {
        let tok = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(tok)
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {:?}", expected))),
        }
    }

    fn parse_rule(&mut self) -> Result<(Vec<Selector>, DeclaredStyle), ParseError> {
        let selectors = self.parse_selector_list()?;
        self.expect(&Token::BraceOpen)?;
        let style = self.parse_declarations()?;
        self.expect(&Token::BraceClose)?;
        Ok((selectors, style))
    }

    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![self.parse_selector()?];
        while self.peek_is(&Token::Comma) {
            self.advance();
            selectors.push(self.parse_selector()?);
        }
        Ok(selectors)
    }

    /// `*`, `trait`, `trait:state`, `:state`, or `trait:` (normalized to `trait`).
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let trait_name = match self.peek() {
            Some(t) if t.token == Token::Star => {
                self.advance();
                String::new()
            }
            Some(t) if t.token == Token::Ident => {
                let name = t.text.clone();
                self.advance();
                name
            }
            Some(t) if matches!(t.token, Token::PseudoClass | Token::Colon) => String::new(),
            Some(t) => {
                return Err(ParseError::UnexpectedToken {
                    position: t.pos,
                    message: format!("expected selector, got '{}'", t.text),
                })
            }
            None => return Err(ParseError::UnexpectedEof("expected selector".into())),
        };

        let state = match self.peek() {
            Some(t) if t.token == Token::PseudoClass => {
                let state = t.text.clone();
                self.advance();
                state
            }
            Some(t) if t.token == Token::Colon => {
                self.advance();
                ":".to_string()
            }
            _ => String::new(),
        };

        Ok(Selector::parse(&format!("{trait_name}{state}")))
    }

    /// Declarations up to (not including) the closing brace.
    fn parse_declarations(&mut self) -> Result<DeclaredStyle, ParseError> {
        let mut style = DeclaredStyle::new();

        while !self.is_eof() && !self.peek_is(&Token::BraceClose) {
            if self.peek_is(&Token::Semicolon) {
                self.advance();
                continue;
            }

            let name = self.expect(&Token::Ident)?;

            // `width:fill` lexes as Ident + PseudoClass; split the colon back off.
            let mut values = Vec::new();
            match self.peek() {
                Some(t) if t.token == Token::Colon => {
                    self.advance();
                }
                Some(t) if t.token == Token::PseudoClass => {
                    values.push(DeclarationValue::Ident(t.text[1..].to_string()));
                    self.advance();
                }
                Some(t) => {
                    return Err(ParseError::UnexpectedToken {
                        position: t.pos,
                        message: format!("expected ':' after '{}', got '{}'", name.text, t.text),
                    })
                }
                None => return Err(ParseError::UnexpectedEof(format!("expected ':' after '{}'", name.text))),
            }

            values.extend(self.parse_values());

            if let Err(err) = apply_declaration(&mut style, &name.text, &values) {
                tracing::warn!(property = %name.text, error = %err, "skipping style declaration");
            }
        }

        Ok(style)
    }

    /// Value tokens up to `;` or `}`. Unrecognized tokens are kept as
    /// identifiers so the property parser can report them.
    fn parse_values(&mut self) -> Vec<DeclarationValue> {
        let mut values = Vec::new();
        while let Some(tok) = self.peek() {
            let value = match tok.token {
                Token::Semicolon | Token::BraceClose => break,
                Token::Number => match tok.text.parse() {
                    Ok(n) => DeclarationValue::Number(n),
                    Err(_) => DeclarationValue::Ident(tok.text.clone()),
                },
                Token::HexColor => match Color::from_hex(&tok.text) {
                    Some(color) => DeclarationValue::Color(color),
                    None => DeclarationValue::Ident(tok.text.clone()),
                },
                _ => DeclarationValue::Ident(tok.text.clone()),
            };
            values.push(value);
            self.advance();
        }
        values
    }
}

// ===========================================================================
// Tests
// ===========================================================================
