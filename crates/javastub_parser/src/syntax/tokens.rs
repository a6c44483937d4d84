use chumsky::error::Simple;
use chumsky::prelude::*;
use chumsky::Parser as ChumskyParser;
use javastub_lexer::{Token, TokenType};

fn kind(
    expected: TokenType,
    label: &'static str,
) -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    filter(move |token: &Token| token.token_type == expected).labelled(label)
}

pub fn identifier() -> impl ChumskyParser<Token, String, Error = Simple<Token>> + Clone {
    filter_map(|span, token: Token| match token.token_type {
        TokenType::Identifier(name) => Ok(name),
        _ => Err(Simple::expected_input_found(span, Vec::new(), Some(token))),
    })
    .labelled("identifier")
}

/// Matches the identifier `expected` exactly (contextual words such as `RuntimeException`).
pub fn word(expected: &'static str) -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    filter(move |token: &Token| {
        matches!(&token.token_type, TokenType::Identifier(name) if name == expected)
    })
    .labelled(expected)
}

/// `a.b.c` joined with dots.
pub fn dotted_identifier() -> impl ChumskyParser<Token, String, Error = Simple<Token>> + Clone {
    identifier()
        .then(token_dot().ignore_then(identifier()).repeated())
        .map(|(first, rest)| {
            rest.into_iter().fold(first, |mut name, segment| {
                name.push('.');
                name.push_str(&segment);
                name
            })
        })
}

/// Any modifier keyword, yielded as its keyword text.
pub fn modifier_keyword() -> impl ChumskyParser<Token, String, Error = Simple<Token>> + Clone {
    filter(|token: &Token| token.token_type.is_modifier())
        .map(|token: Token| token.lexeme)
        .labelled("modifier")
}

pub fn keyword_package() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Package, "'package'")
}

pub fn keyword_import() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Import, "'import'")
}

pub fn keyword_static() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Static, "'static'")
}

pub fn keyword_final() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Final, "'final'")
}

pub fn keyword_default() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Default, "'default'")
}

pub fn keyword_class() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Class, "'class'")
}

pub fn keyword_interface() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Interface, "'interface'")
}

pub fn keyword_at_interface() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::AtInterface, "'@interface'")
}

pub fn keyword_enum() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Enum, "'enum'")
}

pub fn keyword_extends() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Extends, "'extends'")
}

pub fn keyword_implements() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Implements, "'implements'")
}

pub fn keyword_throw() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Throw, "'throw'")
}

pub fn keyword_throws() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Throws, "'throws'")
}

pub fn keyword_super() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Super, "'super'")
}

pub fn keyword_new() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::New, "'new'")
}

pub fn token_left_paren() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::LeftParen, "'('")
}

pub fn token_right_paren() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::RightParen, "')'")
}

pub fn token_left_brace() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::LeftBrace, "'{'")
}

pub fn token_right_brace() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::RightBrace, "'}'")
}

pub fn token_left_bracket() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::LeftBracket, "'['")
}

pub fn token_right_bracket() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::RightBracket, "']'")
}

pub fn token_less() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Less, "'<'")
}

pub fn token_greater() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Greater, "'>'")
}

pub fn token_comma() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Comma, "','")
}

pub fn token_semicolon() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Semicolon, "';'")
}

pub fn token_dot() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Dot, "'.'")
}

pub fn token_ellipsis() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Ellipsis, "'...'")
}

pub fn token_assign() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Assign, "'='")
}

pub fn token_question() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Question, "'?'")
}

pub fn token_ampersand() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Ampersand, "'&'")
}

pub fn token_at() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::At, "'@'")
}

pub fn token_star() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Star, "'*'")
}

pub fn token_eof() -> impl ChumskyParser<Token, Token, Error = Simple<Token>> + Clone {
    kind(TokenType::Eof, "end of input")
}
