use chumsky::error::Simple;
use chumsky::prelude::*;
use chumsky::Parser as ChumskyParser;
use javastub_lexer::{Token, TokenType};

use super::tokens::{
    identifier, keyword_default, keyword_new, keyword_super, keyword_throw, token_dot,
    token_left_brace, token_left_bracket, token_left_paren, token_right_brace,
    token_right_bracket, token_right_paren, token_semicolon, token_star, word,
};

fn is_delimiter(token_type: &TokenType) -> bool {
    matches!(
        token_type,
        TokenType::LeftParen
            | TokenType::RightParen
            | TokenType::LeftBrace
            | TokenType::RightBrace
            | TokenType::LeftBracket
            | TokenType::RightBracket
            | TokenType::Eof
    )
}

/// A bracketed group (`(...)`, `{...}` or `[...]`) with arbitrary balanced content.
pub fn balanced_group() -> impl ChumskyParser<Token, (), Error = Simple<Token>> + Clone {
    recursive(|group| {
        let inner = group
            .or(filter(|token: &Token| !is_delimiter(&token.token_type)).ignored())
            .repeated();

        choice((
            inner
                .clone()
                .delimited_by(token_left_paren(), token_right_paren()),
            inner
                .clone()
                .delimited_by(token_left_brace(), token_right_brace()),
            inner.delimited_by(token_left_bracket(), token_right_bracket()),
        ))
        .ignored()
    })
}

/// Tokens and balanced groups up to (not including) the first top-level token
/// for which `stop` holds or an unmatched closing delimiter.
pub fn noise_until(
    stop: fn(&TokenType) -> bool,
) -> chumsky::combinator::Repeated<impl ChumskyParser<Token, (), Error = Simple<Token>> + Clone> {
    balanced_group()
        .or(filter(move |token: &Token| {
            !is_delimiter(&token.token_type) && !stop(&token.token_type)
        })
        .ignored())
        .repeated()
}

/// `super(...);`
fn super_call() -> impl ChumskyParser<Token, (), Error = Simple<Token>> + Clone {
    keyword_super()
        .ignore_then(balanced_group())
        .then_ignore(token_semicolon())
}

/// `throw new RuntimeException("Stub!");`
fn stub_throw() -> impl ChumskyParser<Token, (), Error = Simple<Token>> + Clone {
    let stub_message = filter(|token: &Token| {
        matches!(&token.token_type, TokenType::String(text) if text == "Stub!")
    });

    keyword_throw()
        .ignore_then(keyword_new())
        .ignore_then(word("RuntimeException"))
        .ignore_then(stub_message.delimited_by(token_left_paren(), token_right_paren()))
        .then_ignore(token_semicolon())
        .ignored()
}

/// A statement closed by a `{...}` group rather than `;`, such as
/// `if (x) { .. } else { .. }` or `try { .. } catch (E e) { .. }`.
fn braced_statement() -> impl ChumskyParser<Token, (), Error = Simple<Token>> + Clone {
    let plain = filter(|token: &Token| {
        !is_delimiter(&token.token_type) && !matches!(token.token_type, TokenType::Semicolon)
    })
    .ignored();
    let inner_group = token_left_paren()
        .or(token_left_bracket())
        .rewind()
        .ignore_then(balanced_group());
    let brace_group = token_left_brace().rewind().ignore_then(balanced_group());

    choice((plain, inner_group))
        .repeated()
        .then(brace_group)
        .repeated()
        .at_least(1)
        .ignored()
}

/// `{ statement* }` where a statement is a stub marker, a nested block, a
/// `;`-terminated balanced run or a run closed by a brace group.
pub fn block() -> impl ChumskyParser<Token, (), Error = Simple<Token>> + Clone {
    recursive(|block| {
        let other = noise_until(|token_type| matches!(token_type, TokenType::Semicolon))
            .then_ignore(token_semicolon())
            .ignored();
        let statement = choice((super_call(), stub_throw(), block, other, braced_statement()));

        statement
            .repeated()
            .delimited_by(token_left_brace(), token_right_brace())
            .ignored()
    })
}

/// What follows a method or constructor signature: `;`, an annotation
/// element default (`default 0;`), or a body block.
pub fn method_terminator() -> impl ChumskyParser<Token, (), Error = Simple<Token>> + Clone {
    let default_value = keyword_default()
        .ignore_then(
            noise_until(|token_type| matches!(token_type, TokenType::Semicolon)).at_least(1),
        )
        .then_ignore(token_semicolon())
        .ignored();

    choice((token_semicolon().ignored(), default_value, block()))
}

/// Arguments and class body of an enum constant, discarded.
pub fn enum_constant_tail() -> impl ChumskyParser<Token, (), Error = Simple<Token>> + Clone {
    balanced_group().repeated().ignored()
}

/// Qualified reference on the right of `import`, wildcard included.
pub fn import_target() -> impl ChumskyParser<Token, String, Error = Simple<Token>> + Clone {
    identifier()
        .then(
            token_dot()
                .ignore_then(identifier().or(token_star().to("*".to_string())))
                .repeated(),
        )
        .map(|(first, rest)| {
            rest.into_iter().fold(first, |mut name, segment| {
                name.push('.');
                name.push_str(&segment);
                name
            })
        })
}
