//! logos-based tokenizer for the style sheet language.
//!
//! Longest match wins, so `#ff00aa` is a single [`Token::HexColor`] and
//! `:hover` is a single [`Token::PseudoClass`] rather than `Colon` + `Ident`.

use logos::Logos;

/// Style sheet token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `#fff`, `#ff00aa`, `#ff00aa80`.
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// `:hover`, `:active`, ... (also `:fill` in `width:fill`).
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoClass,

    /// Integer, possibly negative.
    #[regex(r"-?[0-9]+")]
    Number,

    /// Trait names, property names, keywords.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("*")]
    Star,
}

/// Tokenize into `(Token, text)` pairs, dropping anything that fails to lex.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}
