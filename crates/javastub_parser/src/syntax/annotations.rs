use chumsky::error::Simple;
use chumsky::prelude::*;
use chumsky::Parser as ChumskyParser;
use javastub_lexer::{Token, TokenType};

use super::bodies::noise_until;
use super::tokens::{
    dotted_identifier, identifier, token_assign, token_at, token_comma, token_left_paren,
    token_right_paren,
};

/// `@Name` with an optional element list; yields the annotation's type name as written.
pub fn annotation() -> impl ChumskyParser<Token, String, Error = Simple<Token>> + Clone {
    token_at()
        .ignore_then(dotted_identifier())
        .then_ignore(annotation_elements().or_not())
}

pub fn annotations() -> impl ChumskyParser<Token, Vec<String>, Error = Simple<Token>> + Clone {
    annotation().repeated()
}

/// `(value)` or `(key = value, ...)`. Element values are balanced token runs
/// and are not retained.
fn annotation_elements() -> impl ChumskyParser<Token, (), Error = Simple<Token>> + Clone {
    let value = noise_until(|token_type| matches!(token_type, TokenType::Comma)).at_least(1);
    let element = identifier()
        .then_ignore(token_assign())
        .or_not()
        .ignore_then(value);

    element
        .separated_by(token_comma())
        .allow_trailing()
        .delimited_by(token_left_paren(), token_right_paren())
        .ignored()
}
